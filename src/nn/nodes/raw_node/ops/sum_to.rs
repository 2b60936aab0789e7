use super::check_parents_count;
use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::nodes::NodeHandle;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 对父节点所有元素求和，结果为只含1个元素的`shape`形状（如`[]`或`[1, 1]`）
///
/// ## 梯度
/// `∂L/∂x = broadcast_to(gy, x.shape)`
#[derive(Clone)]
pub(in crate::nn) struct SumTo {
    input_shape: Vec<usize>,
    shape: Vec<usize>,
}

impl SumTo {
    pub(in crate::nn) fn new(parents: &[&NodeHandle], shape: &[usize]) -> Result<Self, GraphError> {
        check_parents_count("SumTo", parents, 1)?;
        if shape.iter().product::<usize>() != 1 {
            return Err(GraphError::InvalidOperation(format!(
                "SumTo节点的目标形状只能含1个元素，实际为{shape:?}"
            )));
        }
        Ok(Self {
            input_shape: parents[0].value().shape().to_vec(),
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for SumTo {
    fn type_name(&self) -> &'static str {
        "SumTo"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].sum().reshape(&self.shape))
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![Some(upstream_grad.broadcast_to(&self.input_shape)?)])
    }
}
