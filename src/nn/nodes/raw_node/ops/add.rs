use super::{check_parents_count, check_same_shape};
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 逐元素加法：`y = a + b`
#[derive(Clone)]
pub(in crate::nn) struct Add;

impl Add {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Add", parents, 2)?;
        check_same_shape("Add", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Add {
    fn type_name(&self) -> &'static str {
        "Add"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] + parents[1])
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.clone()), Some(upstream_grad.clone())])
    }
}
