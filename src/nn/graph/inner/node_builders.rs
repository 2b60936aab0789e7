/*
 * @Description  : GraphInner 节点构建方法 new_*_node
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::{
    Abs, Add, BroadcastTo, MeanAbsoluteError, Multiply, Negate, ScalarMultiply, Subtract, SumTo,
};
use crate::nn::NodeId;

impl GraphInner {
    pub fn new_add_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Add::new(&[self.get_node(left)?, self.get_node(right)?])?;
        self.add_op_node(node.into(), &[left, right], name)
    }

    pub fn new_subtract_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Subtract::new(&[self.get_node(left)?, self.get_node(right)?])?;
        self.add_op_node(node.into(), &[left, right], name)
    }

    pub fn new_multiply_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Multiply::new(&[self.get_node(left)?, self.get_node(right)?])?;
        self.add_op_node(node.into(), &[left, right], name)
    }

    pub fn new_negate_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Negate::new(&[self.get_node(parent)?])?;
        self.add_op_node(node.into(), &[parent], name)
    }

    pub fn new_scalar_multiply_node(
        &mut self,
        parent: NodeId,
        factor: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = ScalarMultiply::new(&[self.get_node(parent)?], factor)?;
        self.add_op_node(node.into(), &[parent], name)
    }

    pub fn new_abs_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = Abs::new(&[self.get_node(parent)?])?;
        self.add_op_node(node.into(), &[parent], name)
    }

    pub fn new_broadcast_to_node(
        &mut self,
        parent: NodeId,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = BroadcastTo::new(&[self.get_node(parent)?], shape)?;
        self.add_op_node(node.into(), &[parent], name)
    }

    pub fn new_sum_to_node(
        &mut self,
        parent: NodeId,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = SumTo::new(&[self.get_node(parent)?], shape)?;
        self.add_op_node(node.into(), &[parent], name)
    }

    pub fn new_mean_absolute_error_node(
        &mut self,
        x0: NodeId,
        x1: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = MeanAbsoluteError::new(&[self.get_node(x0)?, self.get_node(x1)?])?;
        self.add_op_node(node.into(), &[x0, x1], name)
    }
}
