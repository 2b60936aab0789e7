/*
 * @Description  : 张量所在的设备（主机/GPU），以及主机与设备之间的拷贝
 */

use super::Tensor;
use crate::errors::TensorError;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 设为任意值后，即使编译进了GPU后端也只报告CPU可用
pub const FORCE_CPU_ENV: &str = "MAE_AUTOGRAD_FORCE_CPU";

/// 已编译进本crate的GPU后端探测函数，每个返回该后端可见的设备数。
/// 目前只有以主机内存模拟的后端（默认0块，见`Device::enable_simulated_gpus`）。
const GPU_BACKEND_PROBES: &[fn() -> usize] = &[simulated_gpu_count];

static SIMULATED_GPUS: AtomicUsize = AtomicUsize::new(0);

fn simulated_gpu_count() -> usize {
    SIMULATED_GPUS.load(Ordering::Relaxed)
}

/// 计算设备
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// 主机内存与CPU计算
    #[default]
    Cpu,
    /// 第`n`块GPU
    Gpu(usize),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu(ordinal) => write!(f, "gpu:{ordinal}"),
        }
    }
}

impl Device {
    /// 当前进程可见的GPU数量
    pub fn gpu_count() -> usize {
        if std::env::var_os(FORCE_CPU_ENV).is_some() {
            log::debug!("{FORCE_CPU_ENV}已设置，忽略所有GPU");
            return 0;
        }
        GPU_BACKEND_PROBES.iter().map(|probe| probe()).sum()
    }

    pub fn is_available(&self) -> bool {
        match self {
            Device::Cpu => true,
            Device::Gpu(ordinal) => *ordinal < Self::gpu_count(),
        }
    }

    /// 有GPU时返回第0块GPU，否则返回None
    pub fn gpu_if_available() -> Option<Self> {
        let gpu = Device::Gpu(0);
        if gpu.is_available() {
            Some(gpu)
        } else {
            log::debug!("未探测到可用的GPU");
            None
        }
    }

    pub const fn is_gpu(&self) -> bool {
        matches!(self, Device::Gpu(_))
    }

    /// 启用`count`块以主机内存模拟的GPU（`0`即关闭），对整个进程生效。
    ///
    /// 模拟设备上的数据仍在主机内存中，但设备标记、同设备检查与`to_device`/`to_cpu`拷贝
    /// 都与真实GPU走同一条路径，没有GPU硬件时可借此运行GPU版本的代码与测试。
    /// `MAE_AUTOGRAD_FORCE_CPU`同样会屏蔽模拟设备。
    pub fn enable_simulated_gpus(count: usize) {
        let previous = SIMULATED_GPUS.swap(count, Ordering::Relaxed);
        if previous != count {
            log::debug!("模拟GPU数量：{previous} -> {count}");
        }
    }
}

impl Tensor {
    pub const fn device(&self) -> Device {
        self.device
    }

    /// 拷贝到指定设备；设备不可用时返回错误
    pub fn to_device(&self, device: Device) -> Result<Self, TensorError> {
        if !device.is_available() {
            return Err(TensorError::DeviceUnavailable(device));
        }
        Ok(self.clone().on(device))
    }

    /// 拷贝回主机内存
    pub fn to_cpu(&self) -> Self {
        self.clone().on(Device::Cpu)
    }

    pub(crate) fn assert_same_device(&self, other: &Self) {
        assert!(
            self.device == other.device,
            "{}",
            TensorError::DeviceMismatch {
                left: self.device,
                right: other.device,
            }
        );
    }
}
