use crate::errors::TensorError;
use crate::nn::NodeId;
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点{0}不存在")]
    NodeNotFound(NodeId),
    #[error("非法操作：{0}")]
    InvalidOperation(String),
    #[error("形状不匹配（期望{expected:?}，实际{got:?}）：{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("计算错误：{0}")]
    ComputationError(String),
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
