/*
 * @Description  : 张量的加法，实现了两个张量“逐元素”（或张量与纯数）相加的运算，并返回一个新的张量。
 *                 该运算支持以下情况：
 *                 1. 其中一个操作数为纯数而另一个为张量：则返回的张量形状与该张量相同。
 *                 2. 两个操作数形状严格一致：返回同形状张量。
 *                 3. 其中一个操作数只含1个元素：视作纯数广播到另一个操作数的形状。
 *                 两个操作数必须位于同一设备。
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Add;

impl_tensor_binary_op!(Add, add, Operator::Add, +);
