/*
 * @Description  : Var - 变量句柄，支持算子重载和链式调用
 */

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::ops::{Add, Mul, Neg, Sub};
use std::rc::Rc;

/// 变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，实现算子重载
/// - Clone 语义（非 Copy），开销只是一次 Rc clone
/// - 动态图：创建即完成前向计算，`data()`随时可读
///
/// # 使用示例
/// ```
/// use mae_autograd::nn::{Graph, VarLossOps};
/// use mae_autograd::tensor::Tensor;
///
/// let graph = Graph::new();
/// let x0 = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
/// let x1 = graph.variable(&Tensor::new(&[2.0, 0.0], &[2]));
/// let loss = x0.mae_loss(&x1).unwrap();
/// assert_eq!(loss.item().unwrap(), 1.5);
/// loss.backward().unwrap();
/// assert_eq!(x0.grad().unwrap(), Tensor::new(&[-0.5, 0.5], &[2]));
/// ```
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// 获取内部图引用（供 trait 和内部模块使用）
    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    ///
    /// 即使原始 Graph handle 已 drop，此方法仍返回有效的 Graph。
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    fn check_same_graph(&self, other: &Self, op: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op}"
            )))
        }
    }

    fn wrap(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    // ==================== 值访问 ====================

    /// 获取节点的值（克隆的 Tensor）
    pub fn value(&self) -> Result<Tensor, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.clone())
    }

    /// 同`value`。Var只会指向已存在的节点，所以不会失败
    pub fn data(&self) -> Tensor {
        self.graph.borrow().node(self.id).value().clone()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.graph.borrow().node(self.id).value().shape().to_vec()
    }

    pub fn name(&self) -> String {
        self.graph.borrow().node(self.id).name().to_string()
    }

    /// 获取标量值（只含1个元素的张量）
    pub fn item(&self) -> Result<f32, GraphError> {
        Ok(self.data().get_data_number()?)
    }

    pub fn requires_grad(&self) -> bool {
        self.graph.borrow().node(self.id).requires_grad()
    }

    // ==================== 梯度 ====================

    /// 本节点的梯度（以节点形式，可继续参与运算与求导）
    pub fn grad_var(&self) -> Option<Self> {
        let grad = self.graph.borrow().node(self.id).grad();
        grad.map(|id| self.wrap(id))
    }

    /// 本节点梯度的值
    pub fn grad(&self) -> Option<Tensor> {
        self.grad_var().map(|g| g.data())
    }

    /// 手动设置梯度（如作为反向传播的种子），形状必须与本节点的值一致
    pub fn set_grad_var(&self, grad: Option<&Self>) -> Result<(), GraphError> {
        if let Some(grad) = grad {
            self.check_same_graph(grad, "梯度设置")?;
        }
        self.graph
            .borrow_mut()
            .set_node_grad(self.id, grad.map(Self::node_id))
    }

    pub fn clear_grad(&self) {
        // 节点必然存在，故忽略结果
        let _ = self.graph.borrow_mut().set_node_grad(self.id, None);
    }

    // ==================== 执行 ====================

    /// 以本节点为输出进行反向传播
    pub fn backward(&self) -> Result<(), GraphError> {
        self.backward_ex(false, false)
    }

    /// 同`Graph::backward_ex`
    pub fn backward_ex(
        &self,
        enable_double_backprop: bool,
        retain_grad: bool,
    ) -> Result<(), GraphError> {
        self.get_graph()
            .backward_ex(std::slice::from_ref(self), enable_double_backprop, retain_grad)
    }

    // ==================== 运算（返回 Result）====================

    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "加法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_add_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "减法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_subtract_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    /// 逐元素乘法
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "乘法")?;
        let id = self
            .graph
            .borrow_mut()
            .new_multiply_node(self.id, other.id, None)?;
        Ok(self.wrap(id))
    }

    pub fn try_neg(&self) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_negate_node(self.id, None)?;
        Ok(self.wrap(id))
    }

    /// 乘以纯数`factor`
    pub fn scale(&self, factor: f32) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_scalar_multiply_node(self.id, factor, None)?;
        Ok(self.wrap(id))
    }

    pub fn abs(&self) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_abs_node(self.id, None)?;
        Ok(self.wrap(id))
    }

    pub fn square(&self) -> Result<Self, GraphError> {
        self.try_mul(self)
    }

    /// 所有元素求和，结果形状为`[]`
    pub fn sum(&self) -> Result<Self, GraphError> {
        self.sum_to(&[])
    }

    /// 所有元素的平均值，结果形状为`[]`
    pub fn mean(&self) -> Result<Self, GraphError> {
        let size = self.graph.borrow().node(self.id).value().size();
        self.sum()?.scale(1.0 / size as f32)
    }

    /// 所有元素求和，结果为只含1个元素的`shape`形状
    pub fn sum_to(&self, shape: &[usize]) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_sum_to_node(self.id, shape, None)?;
        Ok(self.wrap(id))
    }

    /// 将只含1个元素的节点广播为`shape`形状
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_broadcast_to_node(self.id, shape, None)?;
        Ok(self.wrap(id))
    }
}

// ==================== 算子重载 ====================

// Add for &Var
impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).expect("Var 加法失败")
    }
}

// Add for Var (consumes self)
impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

// Add<Var> for &Var
impl Add<Var> for &Var {
    type Output = Var;

    fn add(self, other: Var) -> Var {
        self + &other
    }
}

// Add<&Var> for Var
impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}

// Sub for &Var
impl Sub for &Var {
    type Output = Var;

    fn sub(self, other: &Var) -> Var {
        self.try_sub(other).expect("Var 减法失败")
    }
}

// Sub for Var
impl Sub for Var {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

// Sub<Var> for &Var
impl Sub<Var> for &Var {
    type Output = Var;

    fn sub(self, other: Var) -> Var {
        self - &other
    }
}

// Sub<&Var> for Var
impl Sub<&Self> for Var {
    type Output = Self;

    fn sub(self, other: &Self) -> Self {
        &self - other
    }
}

// Mul for &Var（逐元素乘法）
impl Mul for &Var {
    type Output = Var;

    fn mul(self, other: &Var) -> Var {
        self.try_mul(other).expect("Var 乘法失败")
    }
}

// Mul for Var
impl Mul for Var {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

// Mul<Var> for &Var
impl Mul<Var> for &Var {
    type Output = Var;

    fn mul(self, other: Var) -> Var {
        self * &other
    }
}

// Mul<&Var> for Var
impl Mul<&Self> for Var {
    type Output = Self;

    fn mul(self, other: &Self) -> Self {
        &self * other
    }
}

// Neg for &Var
impl Neg for &Var {
    type Output = Var;

    fn neg(self) -> Var {
        self.try_neg().expect("Var 取反失败")
    }
}

// Neg for Var
impl Neg for Var {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
