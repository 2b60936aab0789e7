use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::Rng;

mod device;
mod ops {
    #[macro_use]
    mod macros;

    pub mod add;
    pub mod approx;
    pub mod div;
    pub mod mul;
    pub mod neg;
    pub mod others;
    pub mod sub;
}
mod filter;
mod print;
mod property;

pub use device::{Device, FORCE_CPU_ENV};
pub use property::DType;

#[cfg(test)]
pub(crate) mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通过Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
///
/// 元素类型固定为`f32`；`device`记录张量所在的设备，二元运算要求两个操作数位于同一设备。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
    device: Device,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等（`shape`为`[]`时乘积为1），否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap_or_else(|_| {
            panic!(
                "数据长度{}与形状{:?}不匹配",
                data.len(),
                shape
            )
        });
        Self::from_array(data)
    }

    /// 创建一个0阶（形状为`[]`）的标量张量
    pub fn scalar(value: f32) -> Self {
        Self::new(&[value], &[])
    }

    /// 用`ndarray`的动态维数组直接构造张量（位于CPU）
    pub fn from_array(data: Array<f32, IxDyn>) -> Self {
        Self {
            data,
            device: Device::Cpu,
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_array(Array::zeros(IxDyn(shape)))
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::from_array(Array::ones(IxDyn(shape)))
    }

    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self::from_array(Array::from_elem(IxDyn(shape), value))
    }

    /// 创建与`self`形状、设备都相同的全零张量
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.shape()).on(self.device)
    }

    /// 创建一个随机张量，其值服从[min, max)上的均匀分布
    pub fn new_random(min: f32, max: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        Self::random_from(&mut rng, min, max, shape)
    }

    /// 同`new_random`，但使用指定的随机数生成器（便于复现）
    pub fn new_random_with_rng(min: f32, max: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        Self::random_from(rng, min, max, shape)
    }

    /// 创建一个服从标准正态分布的随机张量（Box-Muller）
    pub fn new_normal_with_rng(shape: &[usize], rng: &mut StdRng) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.gen();
            let u2: f32 = rng.gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = r * theta.cos();
            let z1 = r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}

// 私有方法
impl Tensor {
    fn random_from<R: Rng>(rng: &mut R, min: f32, max: f32, shape: &[usize]) -> Self {
        let uniform = Uniform::new(min, max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 换个设备标记，数据本身不动（仅供已确认设备可用的内部路径使用）
    pub(crate) fn on(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    fn generate_index_array(&self, shape: &[usize]) -> Vec<usize> {
        shape.iter().map(|_| 0).collect()
    }
}
