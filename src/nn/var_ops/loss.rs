/*
 * @Description  : Var 损失函数扩展 trait
 *
 * 提供损失函数的链式调用支持，用户需 import 此 trait 后才能使用。
 */

use crate::nn::{GraphError, Var};
use std::rc::Rc;

/// 损失函数扩展 trait
///
/// - `mae_loss(target)`: 平均绝对误差（L1）损失 - 用于回归
///
/// # 使用示例
/// ```ignore
/// use mae_autograd::nn::{Var, VarLossOps};
///
/// let loss = output.mae_loss(&target)?;
/// ```
pub trait VarLossOps {
    /// MAE Loss（平均绝对误差）
    ///
    /// # 参数
    /// - `target`: 目标值，形状须与`self`严格一致
    ///
    /// # 返回
    /// 形状为`[]`的标量损失值节点
    fn mae_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn mae_loss(&self, target: &Var) -> Result<Var, GraphError> {
        if !self.same_graph(target) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 计算MAE损失".to_string(),
            ));
        }
        let id = self.graph().borrow_mut().new_mean_absolute_error_node(
            self.node_id(),
            target.node_id(),
            None,
        )?;
        Ok(Var::new(id, Rc::clone(self.graph())))
    }
}

/// 平均绝对误差：`sum(|x0 - x1|) / N`，同`x0.mae_loss(x1)`
pub fn mean_absolute_error(x0: &Var, x1: &Var) -> Result<Var, GraphError> {
    x0.mae_loss(x1)
}
