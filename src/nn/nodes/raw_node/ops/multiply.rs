use super::{check_parents_count, check_same_shape};
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 逐元素乘法（Hadamard积）：`y = a ⊙ b`
///
/// ## 梯度
/// - `∂L/∂a = gy ⊙ b`
/// - `∂L/∂b = gy ⊙ a`
///
/// 梯度里引用的是父节点本身（而非其值的拷贝），所以二阶反向传播时`gy ⊙ b`对`b`仍可导。
#[derive(Clone)]
pub(in crate::nn) struct Multiply;

impl Multiply {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Multiply", parents, 2)?;
        check_same_shape("Multiply", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "Multiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] * parents[1])
    }

    fn calc_grads_to_parents(
        &self,
        parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        let grad_a = upstream_grad.try_mul(&parents[1])?;
        let grad_b = upstream_grad.try_mul(&parents[0])?;
        Ok(vec![Some(grad_a), Some(grad_b)])
    }
}
