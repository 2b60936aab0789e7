use super::check_parents_count;
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 逐元素绝对值：`y = |x|`
///
/// ## 梯度
/// `∂L/∂x = gy ⊙ sign(x)`，其中`sign(x)`作为常量参与运算（在0处取0，即次梯度）。
/// 因此`|x|`的二阶导数处处为0。
#[derive(Clone)]
pub(in crate::nn) struct Abs;

impl Abs {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        check_parents_count("Abs", parents, 1)?;
        Ok(Self)
    }
}

impl TraitNode for Abs {
    fn type_name(&self) -> &'static str {
        "Abs"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].abs())
    }

    fn calc_grads_to_parents(
        &self,
        parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        let sign = parents[0].data().sign();
        let sign = upstream_grad.get_graph().constant(&sign);
        Ok(vec![Some(upstream_grad.try_mul(&sign)?)])
    }
}
