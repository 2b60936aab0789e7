mod leaf;
mod loss;
mod ops;

pub(in crate::nn) use leaf::{Constant, Variable};
pub(in crate::nn) use loss::*;
pub(in crate::nn) use ops::*;

use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Clone)]
pub(in crate::nn) enum NodeType {
    Variable(Variable),
    Constant(Constant),
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    Negate(Negate),
    ScalarMultiply(ScalarMultiply),
    Abs(Abs),
    BroadcastTo(BroadcastTo),
    SumTo(SumTo),
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    MeanAbsoluteError(MeanAbsoluteError),
}

use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    /// 节点类型名，用于生成默认节点名和报错信息
    fn type_name(&self) -> &'static str;

    /// 叶节点（`Variable`/`Constant`）没有父节点，其值只在创建时给定
    fn is_leaf(&self) -> bool {
        false
    }

    /// 根据父节点的值计算本节点的值（动态图：创建节点时即调用）。
    /// 允许在此缓存反向传播需要的中间结果，故为`&mut self`。
    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError>;

    /// VJP：给定本节点的上游梯度`upstream_grad`，返回对每个父节点的梯度（与`parents`一一对应，
    /// 不可导的父节点返回None）。
    ///
    /// 梯度必须用`Var`运算来表达，这样在开启二阶反向传播时，梯度本身也是可求导的。
    fn calc_grads_to_parents(
        &self,
        parents: &[Var],
        upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError>;
}
