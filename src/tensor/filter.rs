use super::Tensor;

impl Tensor {
    /// 通用的条件过滤函数，可以灵活处理张量中的元素
    ///
    /// # 参数
    /// * `condition` - 条件函数，接收元素值并返回bool
    /// * `true_fn` - 当条件为true时的值转换函数
    /// * `false_fn` - 当条件为false时的值转换函数
    ///
    /// NaN元素不参与判断，原样保留为NaN。
    ///
    /// # 示例
    /// ```
    /// use mae_autograd::tensor::Tensor;
    /// let t = Tensor::new(&[-0.005, 0.3, 0.001], &[3]);
    ///
    /// // 类似 diff[abs(diff) < 0.01] = 0.5
    /// let result = t.where_with_f32(|x| x.abs() < 0.01, |_| 0.5, |x| x);
    /// assert_eq!(result, Tensor::new(&[0.5, 0.3, 0.5], &[3]));
    /// ```
    pub fn where_with_f32<F, T, U>(&self, condition: F, true_fn: T, false_fn: U) -> Self
    where
        F: Fn(f32) -> bool,
        T: Fn(f32) -> f32,
        U: Fn(f32) -> f32,
    {
        self.map(|x| {
            if x.is_nan() {
                f32::NAN
            } else if condition(x) {
                true_fn(x)
            } else {
                false_fn(x)
            }
        })
    }
}
