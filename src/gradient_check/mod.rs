/*
 * @Description  : 数值梯度检查：用中心差分验证反向传播（含二阶反向传播）算出的梯度。
 *
 * 被检查的函数`f`接收一组输入`Var`并返回一组输出`Var`。每次求值都在一张新图上进行，
 * 检查本身不会改动调用方的任何图。
 *
 * 一阶检查不逐元素比较梯度，而是沿一个随机单位方向`d`比较方向导数：
 * 解析值`Σ <gx_i, d_i>`，数值值`(g(x + eps·d) − g(x − eps·d)) / 2eps`，其中`g(x) = Σ <y_j, gy_j>`。
 */

mod config;
mod error;

pub use config::GradCheckConfig;
pub use error::GradCheckError;

use crate::nn::{Graph, GraphError, Var};
use crate::tensor::Tensor;
use num_traits::Float;


/// 中心差分求各输入的数值梯度，即`Σ <y_j, gy_j>`对每个输入元素的偏导数
///
/// `grad_outputs`为None时每个输出都必须只含1个元素，种子为1。
/// 返回值位于主机内存，与`inputs`一一对应。
pub fn numerical_grad<F>(
    f: F,
    inputs: &[Tensor],
    grad_outputs: Option<&[Tensor]>,
    eps: f32,
) -> Result<Vec<Tensor>, GradCheckError>
where
    F: Fn(&[Var]) -> Result<Vec<Var>, GraphError>,
{
    let mut grads = Vec::with_capacity(inputs.len());
    for (index, x) in inputs.iter().enumerate() {
        let host = x.to_cpu().to_vec();
        let mut grad = Vec::with_capacity(host.len());
        for element in 0..host.len() {
            let mut shifted = inputs.to_vec();
            let mut evaluate = |delta: f32| -> Result<f64, GradCheckError> {
                let mut values = host.clone();
                values[element] += delta;
                shifted[index] = Tensor::new(&values, x.shape()).to_device(x.device())?;
                weighted_output_sum(&f, &shifted, grad_outputs)
            };
            let plus = evaluate(eps)?;
            let minus = evaluate(-eps)?;
            grad.push(((plus - minus) / (2.0 * f64::from(eps))) as f32);
        }
        grads.push(Tensor::new(&grad, x.shape()));
    }
    Ok(grads)
}

/// 检查`f`的反向传播（一阶）
///
/// 通过时返回Ok；解析方向导数与数值方向导数之差超过`atol + rtol·|数值|`时返回
/// `GradCheckError::Mismatch`。
pub fn check_backward<F>(
    f: F,
    inputs: &[Tensor],
    grad_outputs: Option<&[Tensor]>,
    config: &GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Var]) -> Result<Vec<Var>, GraphError>,
{
    config.validate()?;
    if inputs.is_empty() {
        return Err(GradCheckError::InvalidArgument("至少需要1个输入".to_string()));
    }
    let checked = config.checked_inputs(inputs.len())?;

    // 1. 解析梯度
    let graph = Graph::new();
    let xs = inputs.iter().map(|x| graph.variable(x)).collect::<Vec<_>>();
    let ys = f(&xs)?;
    let seeds = output_seeds(&ys, grad_outputs)?
        .iter()
        .map(|gy| graph.constant(gy))
        .collect::<Vec<_>>();
    let gxs = graph.grad(&ys, &xs, Some(&seeds), false)?;
    let mut analytic_grads = Vec::with_capacity(inputs.len());
    for (index, (gx, &is_checked)) in gxs.into_iter().zip(&checked).enumerate() {
        if is_checked {
            let gx = gx.ok_or(GradCheckError::MissingGrad(index))?;
            analytic_grads.push(Some(gx.data()));
        } else {
            analytic_grads.push(None);
        }
    }

    // 2. 随机单位方向（只覆盖参与检查的输入）
    let mut rng = config.rng();
    let directions = inputs
        .iter()
        .zip(&checked)
        .map(|(x, &is_checked)| {
            if is_checked {
                Tensor::new_normal_with_rng(x.shape(), &mut rng)
            } else {
                Tensor::zeros(x.shape())
            }
        })
        .collect::<Vec<_>>();
    let norm = directions
        .iter()
        .map(|d| host_dot(d, d))
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 {
        log::debug!("没有需要检查的输入元素，跳过梯度检查");
        return Ok(());
    }
    let directions = directions
        .iter()
        .map(|d| d * (1.0 / norm) as f32)
        .collect::<Vec<_>>();

    // 3. 解析方向导数
    let analytic = analytic_grads
        .iter()
        .zip(&directions)
        .filter_map(|(gx, d)| gx.as_ref().map(|gx| host_dot(gx, d)))
        .sum::<f64>();

    // 4. 数值方向导数
    let shifted = |scale: f32| -> Result<Vec<Tensor>, GradCheckError> {
        inputs
            .iter()
            .zip(&directions)
            .map(|(x, d)| {
                (&x.to_cpu() + &(d * scale))
                    .to_device(x.device())
                    .map_err(GradCheckError::from)
            })
            .collect()
    };
    let plus = weighted_output_sum(&f, &shifted(config.eps)?, grad_outputs)?;
    let minus = weighted_output_sum(&f, &shifted(-config.eps)?, grad_outputs)?;
    let numeric = (plus - minus) / (2.0 * f64::from(config.eps));

    if within_tolerance(analytic, numeric, config.atol, config.rtol) {
        log::debug!("梯度检查通过：解析值{analytic}，数值{numeric}");
        Ok(())
    } else {
        log::warn!(
            "梯度检查失败：解析值{analytic}，数值{numeric}（atol={}，rtol={}）",
            config.atol,
            config.rtol
        );
        Err(GradCheckError::Mismatch {
            analytic,
            numeric,
            atol: config.atol,
            rtol: config.rtol,
        })
    }
}

/// 检查`f`的二阶反向传播
///
/// 构造一阶梯度函数`(x…, gy…) ↦ (gx…)`（以`grad_outputs`为种子、开启二阶反向传播求得），
/// 再以`grad_grad_inputs`为输出梯度对它做一阶检查。
pub fn check_double_backward<F>(
    f: F,
    inputs: &[Tensor],
    grad_outputs: &[Tensor],
    grad_grad_inputs: &[Tensor],
    config: &GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Var]) -> Result<Vec<Var>, GraphError>,
{
    if inputs.is_empty() {
        return Err(GradCheckError::InvalidArgument("至少需要1个输入".to_string()));
    }
    if grad_grad_inputs.len() != inputs.len() {
        return Err(GradCheckError::InvalidArgument(format!(
            "二阶梯度种子有{}个，但输入有{}个",
            grad_grad_inputs.len(),
            inputs.len()
        )));
    }
    let input_count = inputs.len();

    let first_order_grad = |vars: &[Var]| -> Result<Vec<Var>, GraphError> {
        let (xs, gys) = vars.split_at(input_count);
        let ys = f(xs)?;
        if ys.len() != gys.len() {
            return Err(GraphError::InvalidOperation(format!(
                "函数有{}个输出，但给定的输出梯度有{}个",
                ys.len(),
                gys.len()
            )));
        }
        for (y, gy) in ys.iter().zip(gys) {
            y.set_grad_var(Some(gy))?;
        }
        xs[0].get_graph().backward_ex(&ys, true, false)?;
        xs.iter()
            .enumerate()
            .map(|(index, x)| {
                x.grad_var().ok_or_else(|| {
                    GraphError::ComputationError(format!("第{index}个输入没有得到梯度"))
                })
            })
            .collect()
    };

    let combined_inputs = inputs
        .iter()
        .chain(grad_outputs)
        .cloned()
        .collect::<Vec<_>>();
    let mut inner_config = config.clone();
    if let Some(no_grads) = &config.no_grads {
        if no_grads.len() != input_count {
            return Err(GradCheckError::InvalidArgument(format!(
                "no_grads有{}项，但输入有{}个",
                no_grads.len(),
                input_count
            )));
        }
        let mut extended = no_grads.clone();
        extended.resize(input_count + grad_outputs.len(), false);
        inner_config.no_grads = Some(extended);
    }

    check_backward(
        first_order_grad,
        &combined_inputs,
        Some(grad_grad_inputs),
        &inner_config,
    )
}

// ========== 私有函数 ==========

/// `|a − n| ≤ atol + rtol·|n|`（任一为NaN时不通过）
fn within_tolerance<T: Float>(analytic: T, numeric: T, atol: T, rtol: T) -> bool {
    (analytic - numeric).abs() <= atol + rtol * numeric.abs()
}

/// 在主机内存上以f64累加`Σ a_i·b_i`
fn host_dot(a: &Tensor, b: &Tensor) -> f64 {
    a.to_cpu()
        .to_vec()
        .iter()
        .zip(b.to_cpu().to_vec())
        .map(|(&x, y)| f64::from(x) * f64::from(y))
        .sum()
}

/// 各输出的梯度种子：给定时校验个数与形状，否则要求输出只含1个元素并以1为种子
fn output_seeds(ys: &[Var], grad_outputs: Option<&[Tensor]>) -> Result<Vec<Tensor>, GradCheckError> {
    match grad_outputs {
        Some(grad_outputs) => {
            if grad_outputs.len() != ys.len() {
                return Err(GradCheckError::InvalidArgument(format!(
                    "函数有{}个输出，但给定的输出梯度有{}个",
                    ys.len(),
                    grad_outputs.len()
                )));
            }
            ys.iter()
                .zip(grad_outputs)
                .map(|(y, gy)| {
                    let y = y.data();
                    if !y.is_same_shape(gy) {
                        return Err(GradCheckError::ShapeMismatch {
                            expected: y.shape().to_vec(),
                            got: gy.shape().to_vec(),
                            message: "输出梯度的形状必须与输出一致".to_string(),
                        });
                    }
                    gy.to_device(y.device()).map_err(GradCheckError::from)
                })
                .collect()
        }
        None => ys
            .iter()
            .map(|y| {
                let y = y.data();
                if y.size() != 1 {
                    return Err(GradCheckError::ShapeMismatch {
                        expected: vec![],
                        got: y.shape().to_vec(),
                        message: "未给定输出梯度时，输出必须只含1个元素".to_string(),
                    });
                }
                Tensor::ones(y.shape())
                    .to_device(y.device())
                    .map_err(GradCheckError::from)
            })
            .collect(),
    }
}

/// 在一张新图上求值`f`，返回`Σ <y_j, gy_j>`
fn weighted_output_sum<F>(
    f: &F,
    inputs: &[Tensor],
    grad_outputs: Option<&[Tensor]>,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Var]) -> Result<Vec<Var>, GraphError>,
{
    let graph = Graph::new();
    let xs = inputs.iter().map(|x| graph.variable(x)).collect::<Vec<_>>();
    let ys = f(&xs)?;
    let seeds = output_seeds(&ys, grad_outputs)?;
    Ok(ys
        .iter()
        .zip(&seeds)
        .map(|(y, gy)| host_dot(&y.data(), gy))
        .sum())
}
