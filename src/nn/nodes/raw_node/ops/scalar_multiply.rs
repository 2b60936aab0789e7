use super::check_parents_count;
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 乘以一个固定的纯数：`y = factor * x`（`factor`不是节点，不求梯度）
#[derive(Clone)]
pub(in crate::nn) struct ScalarMultiply {
    factor: f32,
}

impl ScalarMultiply {
    pub(in crate::nn) fn new(parents: &[&NodeHandle], factor: f32) -> Result<Self, GraphError> {
        check_parents_count("ScalarMultiply", parents, 1)?;
        Ok(Self { factor })
    }
}

impl TraitNode for ScalarMultiply {
    fn type_name(&self) -> &'static str {
        "ScalarMultiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] * self.factor)
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.scale(self.factor)?)])
    }
}
