use thiserror::Error;
mod ops;
pub use self::ops::*;

use crate::tensor::Device;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("广播的源张量必须只含1个元素，实际形状为{0:?}")]
    BroadcastSourceNotScalar(Vec<usize>),
    #[error("张量不是标量，其形状为{0:?}")]
    NotScalar(Vec<usize>),

    // 设备相关
    #[error("两个张量位于不同设备：{left}与{right}")]
    DeviceMismatch { left: Device, right: Device },
    #[error("设备{0}不可用")]
    DeviceUnavailable(Device),
}
