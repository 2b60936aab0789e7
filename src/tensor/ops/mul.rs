/*
 * @Description  : 张量的逐元素乘法（非矩阵乘法），形状规则与加法相同。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Mul;

impl_tensor_binary_op!(Mul, mul, Operator::Mul, *);
