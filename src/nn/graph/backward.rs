/*
 * @Description  : 反向传播（VJP）。梯度以图中的新节点来表示，
 *                 开启 enable_double_backprop 时这些节点会记录求导信息，从而支持二阶反向传播。
 */

use super::error::GraphError;
use super::handle::Graph;
use crate::nn::nodes::TraitNode;
use crate::nn::var::Var;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::{HashMap, HashSet};

impl Graph {
    /// 反向传播，梯度累加到各叶变量上（可通过`Var::grad`读取）
    pub fn backward(&self, outputs: &[Var]) -> Result<(), GraphError> {
        self.backward_ex(outputs, false, false)
    }

    /// 反向传播（扩展版本）
    ///
    /// - 每个输出若已通过`Var::set_grad_var`设置了梯度，则以其为种子；否则该输出必须只含1个元素，种子为1
    /// - `enable_double_backprop`：是否记录反向传播本身的计算，以便对梯度再求导
    /// - `retain_grad`：是否把梯度也写到中间节点上（默认只写叶变量）
    ///
    /// 叶变量上已有的梯度会与本次结果相加。
    pub fn backward_ex(
        &self,
        outputs: &[Var],
        enable_double_backprop: bool,
        retain_grad: bool,
    ) -> Result<(), GraphError> {
        let seeds = outputs
            .iter()
            .map(|y| match y.grad_var() {
                Some(grad) => Ok(grad),
                None => self.ones_seed(y),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let grads = self.compute_grads(outputs, &seeds, enable_double_backprop)?;

        let mut leaf_count = 0;
        for (node_id, grad) in grads {
            let (is_leaf, requires_grad, existing) = {
                let g = self.inner();
                let node = g.get_node(node_id)?;
                (node.is_leaf(), node.requires_grad(), node.grad())
            };
            if !requires_grad {
                continue;
            }
            if is_leaf {
                let grad = match existing {
                    Some(existing) => {
                        let existing = self.wrap_node_id(existing)?;
                        self.grad_mode_scope(enable_double_backprop, || existing.try_add(&grad))?
                    }
                    None => grad,
                };
                self.inner_mut().set_node_grad(node_id, Some(grad.node_id()))?;
                leaf_count += 1;
            } else if retain_grad {
                self.inner_mut().set_node_grad(node_id, Some(grad.node_id()))?;
            }
        }
        log::debug!(
            "反向传播完成：{}个输出，{}个叶变量得到梯度（二阶反向传播：{}）",
            outputs.len(),
            leaf_count,
            enable_double_backprop
        );
        Ok(())
    }

    /// 计算`outputs`对`inputs`的梯度并直接返回，不改动任何节点上记录的梯度
    ///
    /// `grad_outputs`为None时，每个输出都必须只含1个元素，种子为1。
    /// 返回值与`inputs`一一对应，与输出无关的输入得到None。
    pub fn grad(
        &self,
        outputs: &[Var],
        inputs: &[Var],
        grad_outputs: Option<&[Var]>,
        enable_double_backprop: bool,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        let seeds = match grad_outputs {
            Some(grad_outputs) => {
                if grad_outputs.len() != outputs.len() {
                    return Err(GraphError::InvalidOperation(format!(
                        "输出有{}个，但给定的输出梯度有{}个",
                        outputs.len(),
                        grad_outputs.len()
                    )));
                }
                grad_outputs.to_vec()
            }
            None => outputs
                .iter()
                .map(|y| self.ones_seed(y))
                .collect::<Result<Vec<_>, _>>()?,
        };

        for x in inputs {
            self.check_owns(x)?;
        }
        let grads = self.compute_grads(outputs, &seeds, enable_double_backprop)?;
        Ok(inputs
            .iter()
            .map(|x| grads.get(&x.node_id()).cloned())
            .collect())
    }

    // ========== 私有方法 ==========

    /// 为未给定梯度的输出生成全1种子
    fn ones_seed(&self, output: &Var) -> Result<Var, GraphError> {
        let value = output.data();
        if value.size() != 1 {
            return Err(GraphError::InvalidOperation(format!(
                "未指定梯度的输出必须只含1个元素，但其形状为{:?}",
                value.shape()
            )));
        }
        let ones = Tensor::ones(value.shape()).to_device(value.device())?;
        Ok(self.constant(&ones))
    }

    fn check_owns(&self, var: &Var) -> Result<(), GraphError> {
        if !self.ptr_eq(&var.get_graph()) {
            return Err(GraphError::InvalidOperation(format!(
                "节点{}不属于图{}",
                var.node_id(),
                self.inner().name()
            )));
        }
        Ok(())
    }

    /// 反向传播核心：返回每个需要梯度的节点（含输出本身）的梯度
    fn compute_grads(
        &self,
        outputs: &[Var],
        seeds: &[Var],
        enable_double_backprop: bool,
    ) -> Result<HashMap<NodeId, Var>, GraphError> {
        self.grad_mode_scope(enable_double_backprop, || {
            let mut grads: HashMap<NodeId, Var> = HashMap::new();
            for (y, gy) in outputs.iter().zip(seeds) {
                self.check_owns(y)?;
                self.check_owns(gy)?;
                if y.shape() != gy.shape() {
                    return Err(GraphError::ShapeMismatch {
                        expected: y.shape(),
                        got: gy.shape(),
                        message: format!("输出{}的梯度形状必须与其值一致", y.node_id()),
                    });
                }
                accumulate_grad(&mut grads, y.node_id(), gy.clone())?;
            }

            let order = self.backward_order(outputs)?;
            for node_id in order {
                let (raw_node, parent_ids) = {
                    let g = self.inner();
                    let node = g.get_node(node_id)?;
                    if node.is_leaf() || !node.requires_grad() {
                        continue;
                    }
                    (node.raw_node().clone(), node.parents().to_vec())
                };
                let Some(upstream_grad) = grads.get(&node_id).cloned() else {
                    continue;
                };

                let parents = parent_ids
                    .iter()
                    .map(|id| Var::new(*id, self.inner_rc()))
                    .collect::<Vec<_>>();
                let parent_grads = raw_node.calc_grads_to_parents(&parents, &upstream_grad)?;
                if parent_grads.len() != parents.len() {
                    return Err(GraphError::ComputationError(format!(
                        "节点{node_id}返回了{}个梯度，但其有{}个父节点",
                        parent_grads.len(),
                        parents.len()
                    )));
                }

                for (parent, grad) in parents.iter().zip(parent_grads) {
                    let Some(grad) = grad else {
                        continue;
                    };
                    if !parent.requires_grad() {
                        continue;
                    }
                    if grad.shape() != parent.shape() {
                        return Err(GraphError::ShapeMismatch {
                            expected: parent.shape(),
                            got: grad.shape(),
                            message: format!("节点{node_id}传给父节点{}的梯度形状有误", parent.node_id()),
                        });
                    }
                    accumulate_grad(&mut grads, parent.node_id(), grad)?;
                }
            }
            Ok(grads)
        })
    }

    /// 从输出出发、沿需要梯度的节点向上可达的所有节点，按编号从大到小（逆拓扑序）排列
    fn backward_order(&self, outputs: &[Var]) -> Result<Vec<NodeId>, GraphError> {
        let g = self.inner();
        let mut visited = HashSet::new();
        let mut stack = outputs.iter().map(Var::node_id).collect::<Vec<_>>();
        while let Some(node_id) = stack.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            let node = g.get_node(node_id)?;
            if node.requires_grad() {
                stack.extend(node.parents().iter().copied());
            }
        }
        let mut order = visited.into_iter().collect::<Vec<_>>();
        order.sort_unstable_by(|a, b| b.cmp(a));
        Ok(order)
    }
}

/// 同一节点收到多份梯度时相加
fn accumulate_grad(
    grads: &mut HashMap<NodeId, Var>,
    node_id: NodeId,
    grad: Var,
) -> Result<(), GraphError> {
    let grad = match grads.remove(&node_id) {
        Some(existing) => existing.try_add(&grad)?,
        None => grad,
    };
    grads.insert(node_id, grad);
    Ok(())
}
