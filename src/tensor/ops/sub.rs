/*
 * @Description  : 张量的减法，形状规则与加法相同。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Sub;

impl_tensor_binary_op!(Sub, sub, Operator::Sub, -);
