use super::{check_parents_count, check_same_shape};
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 逐元素减法：`y = a - b`
///
/// ## 梯度
/// - `∂L/∂a = gy`
/// - `∂L/∂b = -gy`
#[derive(Clone)]
pub(in crate::nn) struct Subtract;

impl Subtract {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Subtract", parents, 2)?;
        check_same_shape("Subtract", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Subtract {
    fn type_name(&self) -> &'static str {
        "Subtract"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] - parents[1])
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.clone()), Some(upstream_grad.try_neg()?)])
    }
}
