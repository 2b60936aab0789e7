/*
 * @Description  : GraphInner 梯度开关
 */

use super::GraphInner;

impl GraphInner {
    pub const fn is_grad_enabled(&self) -> bool {
        self.grad_enabled
    }

    /// 设置是否记录求导信息，返回设置前的状态（便于恢复）
    pub fn set_grad_enabled(&mut self, enabled: bool) -> bool {
        let previous = self.grad_enabled;
        self.grad_enabled = enabled;
        previous
    }
}
