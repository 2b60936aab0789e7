mod arithmetic;
mod property;

use crate::tensor::Device;

/// 单元测试并发执行，所有测试都以同一数量启用模拟GPU
const SIMULATED_GPUS: usize = 2;

/// 启用模拟GPU，之后`require_gpu!()`总能拿到设备
pub(crate) fn simulate_gpus() {
    Device::enable_simulated_gpus(SIMULATED_GPUS);
}

#[derive(Debug)]
struct TensorCheck {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
    pub expected: Vec<Vec<f32>>, // 外层Vec的每个元素代表一个期望值，内层Vec（期望值）整体代表张量的数据
}
