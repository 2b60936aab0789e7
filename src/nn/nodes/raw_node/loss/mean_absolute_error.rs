use crate::nn::nodes::raw_node::ops::{check_parents_count, check_same_shape};
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// MAE（平均绝对误差）损失节点
///
/// ## 公式
/// `MAE = mean(|x0 - x1|) = sum(|x0 - x1|) / N`
///
/// ## 梯度
/// - `∂L/∂x0 = broadcast(gy / N) ⊙ sign(x0 - x1)`
/// - `∂L/∂x1 = -∂L/∂x0`
///
/// `sign(x0 - x1)`作为常量参与运算，所以MAE自身的二阶导数处处为0；
/// 但梯度仍是`gy`的函数，`MAE²`这类复合函数的二阶导数可以正确传回。
///
/// ## 输入
/// - 父节点 0: x0
/// - 父节点 1: x1（与x0形状严格一致）
///
/// ## 输出
/// - 0阶标量损失值，形状`[]`
///
/// ## 参考
/// - `PyTorch`: `torch.nn.L1Loss`
#[derive(Clone)]
pub(in crate::nn) struct MeanAbsoluteError {
    /// 缓存 x0 - x1，用于反向传播
    diff_cache: Option<Tensor>,
}

impl MeanAbsoluteError {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        check_parents_count("MeanAbsoluteError", parents, 2)?;
        // 2. 验证形状（两者dtype恒为f32，无需检查）
        check_same_shape("MeanAbsoluteError", parents[0], parents[1])?;

        Ok(Self { diff_cache: None })
    }
}

impl TraitNode for MeanAbsoluteError {
    fn type_name(&self) -> &'static str {
        "MeanAbsoluteError"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let diff = parents[0] - parents[1];
        let loss = diff.abs().mean();
        self.diff_cache = Some(diff);
        Ok(loss)
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        let diff = self.diff_cache.as_ref().ok_or_else(|| {
            GraphError::ComputationError("diff 缓存为空，需先执行前向传播".to_string())
        })?;

        let coeff = upstream_grad
            .scale(1.0 / diff.size() as f32)?
            .broadcast_to(diff.shape())?;
        let sign = upstream_grad.get_graph().constant(&diff.sign());

        let grad_x0 = coeff.try_mul(&sign)?;
        let grad_x1 = grad_x0.try_neg()?;
        Ok(vec![Some(grad_x0), Some(grad_x1)])
    }
}
