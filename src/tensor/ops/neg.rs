use crate::tensor::Tensor;
use std::ops::Neg;

impl Neg for Tensor {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|a| -a)
    }
}
