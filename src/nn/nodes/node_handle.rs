use super::raw_node::{NodeType, TraitNode};
use super::NodeId;
use crate::tensor::Tensor;
use std::fmt;

/// 计算图中的一个节点：具体的节点类型（`raw_node`）加上图需要记录的公共信息
pub struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    parents: Vec<NodeId>,
    /// 前向时即已算好的值（动态图）
    value: Tensor,
    /// 本节点梯度所在的节点（梯度本身也是图中的节点，以便二阶反向传播）
    grad: Option<NodeId>,
    requires_grad: bool,
}

impl NodeHandle {
    pub(in crate::nn) fn new(
        id: NodeId,
        name: String,
        raw_node: NodeType,
        parents: Vec<NodeId>,
        value: Tensor,
        requires_grad: bool,
    ) -> Self {
        Self {
            id,
            name,
            raw_node,
            parents,
            value,
            grad: None,
            requires_grad,
        }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) const fn raw_node(&self) -> &NodeType {
        &self.raw_node
    }

    pub fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub const fn value(&self) -> &Tensor {
        &self.value
    }

    pub const fn grad(&self) -> Option<NodeId> {
        self.grad
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<NodeId>) {
        self.grad = grad;
    }

    pub const fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn is_leaf(&self) -> bool {
        self.raw_node.is_leaf()
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[id={}, name={}, type={}]", self.id, self.name, self.type_name())
    }
}
