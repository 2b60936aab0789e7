use super::check_parents_count;
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

#[derive(Clone)]
pub(in crate::nn) struct Negate;

impl Negate {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Negate", parents, 1)?;
        Ok(Self)
    }
}

impl TraitNode for Negate {
    fn type_name(&self) -> &'static str {
        "Negate"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(-parents[0])
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.try_neg()?)])
    }
}
