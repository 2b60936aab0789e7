/*
 * @Description  : 为张量实现`approx`的近似比较，测试中可直接写
 *                 `assert_abs_diff_eq!(a, b, epsilon = 1e-6)`、`assert_relative_eq!(a, b)`。
 *                 形状不同（或设备不同）的两个张量永远不近似相等。
 */

use crate::tensor::Tensor;
use approx::{AbsDiffEq, RelativeEq};

impl AbsDiffEq for Tensor {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.device == other.device
            && self.is_same_shape(other)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Tensor {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.device == other.device
            && self.is_same_shape(other)
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
