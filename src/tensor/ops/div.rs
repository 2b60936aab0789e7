/*
 * @Description  : 张量的逐元素除法，形状规则与加法相同。
 *                 除数为零时遵循IEEE 754（得到inf或NaN），不会panic。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Div;

impl_tensor_binary_op!(Div, div, Operator::Div, /);
