mod abs;
mod add;
mod broadcast_to;
mod multiply;
mod negate;
mod scalar_multiply;
mod subtract;
mod sum_to;

pub(in crate::nn) use abs::Abs;
pub(in crate::nn) use add::Add;
pub(in crate::nn) use broadcast_to::BroadcastTo;
pub(in crate::nn) use multiply::Multiply;
pub(in crate::nn) use negate::Negate;
pub(in crate::nn) use scalar_multiply::ScalarMultiply;
pub(in crate::nn) use subtract::Subtract;
pub(in crate::nn) use sum_to::SumTo;

use crate::nn::nodes::NodeHandle;
use crate::nn::GraphError;

/// 验证父节点数量
pub(in crate::nn) fn check_parents_count(
    type_name: &str,
    parents: &[&NodeHandle],
    expected: usize,
) -> Result<(), GraphError> {
    if parents.len() != expected {
        return Err(GraphError::InvalidOperation(format!(
            "{type_name}节点需要{expected}个父节点，实际为{}个",
            parents.len()
        )));
    }
    Ok(())
}

/// 验证两个父节点的值形状严格一致（逐元素二元运算不做隐式广播）
pub(in crate::nn) fn check_same_shape(
    type_name: &str,
    left: &NodeHandle,
    right: &NodeHandle,
) -> Result<(), GraphError> {
    if !left.value().is_same_shape(right.value()) {
        return Err(GraphError::ShapeMismatch {
            expected: left.value().shape().to_vec(),
            got: right.value().shape().to_vec(),
            message: format!("{type_name}节点的两个父节点形状必须一致"),
        });
    }
    Ok(())
}
