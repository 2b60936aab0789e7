/*
 * @Description  : GraphInner 核心操作 + 前向计算
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::errors::TensorError;
use crate::nn::nodes::{Constant, NodeHandle, NodeType, TraitNode, Variable};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    /// 创建一个带固定种子的计算图（确保可重复性）
    pub fn new_with_seed(seed: u64) -> Self {
        let mut graph = Self::new();
        graph.set_seed(seed);
        graph
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            grad_enabled: true,
            rng: None,
        }
    }

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// 检查图是否有固定种子
    pub const fn has_seed(&self) -> bool {
        self.rng.is_some()
    }

    /// `[min, max)`上均匀分布的随机张量；有种子时使用图的RNG
    pub fn new_random_tensor(&mut self, min: f32, max: f32, shape: &[usize]) -> Tensor {
        match self.rng.as_mut() {
            Some(rng) => Tensor::new_random_with_rng(min, max, shape, rng),
            None => Tensor::new_random(min, max, shape),
        }
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().map(NodeHandle::id).collect()
    }

    pub fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.nodes.get(index))
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.nodes.get_mut(index))
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// 按编号直接取节点。仅供`Var`使用：`Var`只会为已存在的节点创建，且节点从不删除
    pub(in crate::nn) fn node(&self, id: NodeId) -> &NodeHandle {
        &self.nodes[id.0 as usize]
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<&Tensor, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.get_node(id)?.parents().to_vec())
    }

    /// 节点梯度所在的节点（尚未反向传播时为None）
    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<NodeId>, GraphError> {
        Ok(self.get_node(id)?.grad())
    }

    pub fn set_node_grad(&mut self, id: NodeId, grad: Option<NodeId>) -> Result<(), GraphError> {
        if let Some(grad_id) = grad {
            let expected = self.get_node(id)?.value().shape();
            let got = self.get_node(grad_id)?.value().shape();
            if expected != got {
                return Err(GraphError::ShapeMismatch {
                    expected: expected.to_vec(),
                    got: got.to_vec(),
                    message: format!("节点{id}的梯度形状必须与其值一致"),
                });
            }
        }
        self.get_node_mut(id)?.set_grad(grad);
        Ok(())
    }

    // ========== 添加节点 ==========

    /// 添加一个需要梯度的叶节点
    pub fn new_variable_node(&mut self, value: &Tensor, name: Option<&str>) -> NodeId {
        self.push_node(Variable.into(), vec![], value.clone(), true, name)
    }

    /// 添加一个不需要梯度的叶节点
    pub fn new_constant_node(&mut self, value: &Tensor, name: Option<&str>) -> NodeId {
        self.push_node(Constant.into(), vec![], value.clone(), false, name)
    }

    /// 添加运算节点并立即根据父节点的值计算其值
    pub(in crate::nn::graph) fn add_op_node(
        &mut self,
        mut raw_node: NodeType,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let value = {
            let parent_values = parents
                .iter()
                .map(|id| self.get_node_value(*id))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some((first, rest)) = parent_values.split_first() {
                if let Some(other) = rest.iter().find(|v| v.device() != first.device()) {
                    return Err(TensorError::DeviceMismatch {
                        left: first.device(),
                        right: other.device(),
                    }
                    .into());
                }
            }
            raw_node.calc_value_by_parents(&parent_values)?
        };

        let requires_grad = self.grad_enabled
            && parents
                .iter()
                .map(|id| self.get_node(*id).map(NodeHandle::requires_grad))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .any(|r| r);

        Ok(self.push_node(raw_node, parents.to_vec(), value, requires_grad, name))
    }

    fn push_node(
        &mut self,
        raw_node: NodeType,
        parents: Vec<NodeId>,
        value: Tensor,
        requires_grad: bool,
        name: Option<&str>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        let name = name.map_or_else(
            || format!("{}_{}", raw_node.type_name(), id.0),
            str::to_string,
        );
        self.nodes.push(NodeHandle::new(
            id,
            name,
            raw_node,
            parents,
            value,
            requires_grad,
        ));
        id
    }
}
