/*
 * @Description  : Graph 句柄（用户级 API）
 */

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::var::Var;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄（PyTorch 风格用户 API）
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Var 自动持有图引用
/// - 动态图：每个运算在创建节点时就完成前向计算
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    // ==================== 创建 ====================

    /// 创建新图
    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（用于可重复的测试）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    pub fn with_name(name: &str) -> Self {
        Self::from_inner(GraphInner::with_name(name))
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// 从现有 Rc 创建句柄
    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 获取内部 Rc
    pub(crate) fn inner_rc(&self) -> Rc<RefCell<GraphInner>> {
        Rc::clone(&self.inner)
    }

    /// 判断两个句柄是否指向同一张图
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Result<Var, GraphError> {
        self.inner.borrow().get_node(node_id)?;
        Ok(Var::new(node_id, self.inner_rc()))
    }

    pub fn node_count(&self) -> usize {
        self.inner.borrow().node_count()
    }

    // ==================== 创建叶节点 ====================

    /// 创建需要梯度的变量（叶节点）
    pub fn variable(&self, data: &Tensor) -> Var {
        let node_id = self.inner.borrow_mut().new_variable_node(data, None);
        Var::new(node_id, self.inner_rc())
    }

    /// 创建命名变量
    pub fn variable_named(&self, data: &Tensor, name: &str) -> Var {
        let node_id = self.inner.borrow_mut().new_variable_node(data, Some(name));
        Var::new(node_id, self.inner_rc())
    }

    /// 创建元素在`[min, max)`上均匀分布的变量（有种子时可重复）
    pub fn random_variable(&self, min: f32, max: f32, shape: &[usize]) -> Var {
        let data = self.inner.borrow_mut().new_random_tensor(min, max, shape);
        self.variable(&data)
    }

    /// 创建不需要梯度的常量（叶节点）
    pub fn constant(&self, data: &Tensor) -> Var {
        let node_id = self.inner.borrow_mut().new_constant_node(data, None);
        Var::new(node_id, self.inner_rc())
    }

    // ==================== 梯度开关 ====================

    pub fn is_grad_enabled(&self) -> bool {
        self.inner.borrow().is_grad_enabled()
    }

    /// 在不记录求导信息的上下文中执行`f`，结束后恢复原状态
    pub fn no_grad_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.grad_mode_scope(false, f)
    }

    /// 在指定的梯度开关状态下执行`f`，结束后（含`f`中panic时）恢复原状态
    pub(crate) fn grad_mode_scope<F, R>(&self, enabled: bool, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let previous = self.inner.borrow_mut().set_grad_enabled(enabled);
        let _guard = GradModeGuard {
            inner: &self.inner,
            previous,
        };
        f()
    }
}

/// 离开作用域时把梯度开关恢复为`previous`
struct GradModeGuard<'a> {
    inner: &'a RefCell<GraphInner>,
    previous: bool,
}

impl Drop for GradModeGuard<'_> {
    fn drop(&mut self) {
        // panic展开到这里时，`f`内部的借用都已释放
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.set_grad_enabled(self.previous);
        }
    }
}
