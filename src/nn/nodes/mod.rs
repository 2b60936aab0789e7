mod node_handle;
pub(in crate::nn) mod raw_node;

pub(in crate::nn) use node_handle::NodeHandle;
pub(in crate::nn) use raw_node::{
    Abs, Add, BroadcastTo, Constant, MeanAbsoluteError, Multiply, Negate, NodeType,
    ScalarMultiply, Subtract, SumTo, TraitNode, Variable,
};

use std::fmt;

/// 节点在所属计算图中的唯一编号。
/// 由于采用动态图（define-by-run），节点创建时其父节点必然已存在，
/// 故编号递增的顺序本身就是一个合法的拓扑序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
