use super::check_parents_count;
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 将只含1个元素的父节点广播为指定形状
///
/// ## 梯度
/// `∂L/∂x = sum_to(gy, x.shape)`
#[derive(Clone)]
pub(in crate::nn) struct BroadcastTo {
    input_shape: Vec<usize>,
    shape: Vec<usize>,
}

impl BroadcastTo {
    pub(in crate::nn) fn new(parents: &[&NodeHandle], shape: &[usize]) -> Result<Self, GraphError> {
        check_parents_count("BroadcastTo", parents, 1)?;
        let input = parents[0].value();
        if !input.is_scalar() {
            return Err(GraphError::ShapeMismatch {
                expected: vec![],
                got: input.shape().to_vec(),
                message: "BroadcastTo节点的父节点只能含1个元素".to_string(),
            });
        }
        Ok(Self {
            input_shape: input.shape().to_vec(),
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for BroadcastTo {
    fn type_name(&self) -> &'static str {
        "BroadcastTo"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].broadcast_to(&self.shape))
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.sum_to(&self.input_shape)?)])
    }
}
