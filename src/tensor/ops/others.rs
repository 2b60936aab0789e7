use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::{Array, IxDyn, Zip};
use std::cmp::PartialEq;

impl From<f32> for Tensor {
    /// 实现 From<f32> trait 用于将`f32`类型转换为形状为`[]`的标量张量
    fn from(scalar: f32) -> Self {
        Tensor::scalar(scalar)
    }
}

impl PartialEq for Tensor {
    /// 数据与设备都一致才算相等
    fn eq(&self, other: &Self) -> bool {
        self.device == other.device && self.data == other.data
    }
}

/// 逐元素二元运算的统一入口（供各运算符实现调用）
///
/// 形状规则：严格一致，或其中一方只含1个元素（视作纯数）；否则panic。
pub(in crate::tensor) fn binary_op<F>(
    tensor_1: &Tensor,
    tensor_2: &Tensor,
    operator: Operator,
    f: F,
) -> Tensor
where
    F: Fn(f32, f32) -> f32,
{
    tensor_1.assert_same_device(tensor_2);

    let data = if tensor_1.is_same_shape(tensor_2) {
        Zip::from(&tensor_1.data)
            .and(&tensor_2.data)
            .map_collect(|&a, &b| f(a, b))
    } else if let Some(b) = tensor_2.number() {
        tensor_1.data.mapv(|a| f(a, b))
    } else if let Some(a) = tensor_1.number() {
        tensor_2.data.mapv(|b| f(a, b))
    } else {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: tensor_1.shape().to_vec(),
                tensor2_shape: tensor_2.shape().to_vec(),
            }
        )
    };

    Tensor {
        data,
        device: tensor_1.device,
    }
}

impl Tensor {
    /// 对每个元素应用`f`，返回同形状、同设备的新张量
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Tensor {
        Tensor {
            data: self.data.mapv(f),
            device: self.device,
        }
    }

    /// 对张量中的所有元素求和并返回一个形状为`[]`的标量（内部以f64累加）。
    pub fn sum(&self) -> Tensor {
        let value = self.data.iter().map(|&a| f64::from(a)).sum::<f64>();
        Tensor::scalar(value as f32).on(self.device)
    }

    /// 所有元素的平均值，形状为`[]`（空张量得到NaN）
    pub fn mean(&self) -> Tensor {
        let value = self.data.iter().map(|&a| f64::from(a)).sum::<f64>() / self.size() as f64;
        Tensor::scalar(value as f32).on(self.device)
    }

    pub fn abs(&self) -> Tensor {
        self.map(f32::abs)
    }

    /// 符号函数：正数→1，负数→-1，零（含-0.0）→0，NaN保持为NaN
    pub fn sign(&self) -> Tensor {
        self.map(|a| {
            if a > 0.0 {
                1.0
            } else if a < 0.0 {
                -1.0
            } else if a.is_nan() {
                f32::NAN
            } else {
                0.0
            }
        })
    }

    pub fn square(&self) -> Tensor {
        self.map(|a| a * a)
    }

    /// 将只含1个元素的张量广播为`shape`形状
    pub fn broadcast_to(&self, shape: &[usize]) -> Tensor {
        let value = self.number().unwrap_or_else(|| {
            panic!(
                "{}",
                TensorError::BroadcastSourceNotScalar(self.shape().to_vec())
            )
        });
        Tensor {
            data: Array::from_elem(IxDyn(shape), value),
            device: self.device,
        }
    }

    /// 改变形状，元素总数必须不变
    pub fn reshape(&self, shape: &[usize]) -> Tensor {
        let new_total_elements: usize = shape.iter().product();
        assert!(
            self.size() == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        let data = Array::from_shape_vec(IxDyn(shape), self.to_vec())
            .unwrap_or_else(|_| panic!("{}", TensorError::IncompatibleShape));
        Tensor {
            data,
            device: self.device,
        }
    }

    /// 对两个张量(或其中一个是标量)进行逐元素相乘，然后对结果求和，并返回一个形状为`[]`的标量。
    /// 这里`dot_sum`（点积和）的概念拓展自线性代数中向量内积的概念，但适用性更广---
    /// 这里只需保证两个张量的形状严格一致，或其中一个张量为标量即可运算
    pub fn dot_sum(&self, other: &Tensor) -> Tensor {
        if !self.is_same_shape(other) && !self.is_scalar() && !other.is_scalar() {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator: Operator::DotSum,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            );
        }
        (self * other).sum()
    }
}
