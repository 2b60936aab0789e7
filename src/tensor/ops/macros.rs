/// 为张量的某个二元运算符批量实现（不）带引用的张量与（不）带引用的张量、张量与f32、f32与张量的各种组合
macro_rules! impl_tensor_binary_op {
    ($op_trait:ident, $method:ident, $operator:expr, $op:tt) => {
        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与 （不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $op_trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                $crate::tensor::ops::others::binary_op(&self, &other, $operator, |a, b| a $op b)
            }
        }

        impl<'a> $op_trait<&'a Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &'a Tensor) -> Tensor {
                $crate::tensor::ops::others::binary_op(&self, other, $operator, |a, b| a $op b)
            }
        }

        impl $op_trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                $crate::tensor::ops::others::binary_op(self, &other, $operator, |a, b| a $op b)
            }
        }

        impl<'b> $op_trait<&'b Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                $crate::tensor::ops::others::binary_op(self, other, $operator, |a, b| a $op b)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与 （不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与 f32↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $op_trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                self.map(|a| a $op scalar)
            }
        }

        impl $op_trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                self.map(|a| a $op scalar)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与 f32↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓f32 与 （不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $op_trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                tensor.map(|a| self $op a)
            }
        }

        impl<'a> $op_trait<&'a Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &'a Tensor) -> Tensor {
                tensor.map(|a| self $op a)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑f32 与 （不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    };
}
