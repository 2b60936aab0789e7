//! # MAE Autograd
//!
//! `mae_autograd`是一个用纯rust实现的小型动态图（define-by-run）自动求导库，
//! 核心是可求导的平均绝对误差（MAE）损失，并附带用于验证它的数值梯度检查工具
//! （一阶与二阶反向传播）以及CPU/GPU设备层。
//!

pub mod errors;
pub mod gradient_check;
pub mod nn;
pub mod tensor;
pub mod utils;

// 供导出的宏（如`require_gpu!`）在调用方crate中使用
#[doc(hidden)]
pub use log;
