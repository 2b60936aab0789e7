use super::TraitNode;
use crate::nn::{GraphError, Var};
use crate::tensor::Tensor;

/// 需要梯度的叶节点（参与反向传播，反向传播后可通过`Var::grad`读取梯度）
#[derive(Clone, Default)]
pub(in crate::nn) struct Variable;

/// 不需要梯度的叶节点（如反向传播中用到的符号掩码）
#[derive(Clone, Default)]
pub(in crate::nn) struct Constant;

fn leaf_has_no_parents(type_name: &str) -> GraphError {
    GraphError::InvalidOperation(format!(
        "{type_name}是叶节点，其值只能在创建时给定"
    ))
}

impl TraitNode for Variable {
    fn type_name(&self) -> &'static str {
        "Variable"
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(leaf_has_no_parents(self.type_name()))
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        _upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![])
    }
}

impl TraitNode for Constant {
    fn type_name(&self) -> &'static str {
        "Constant"
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(leaf_has_no_parents(self.type_name()))
    }

    fn calc_grads_to_parents(
        &self,
        _parents: &[Var],
        _upstream_grad: &Var,
    ) -> Result<Vec<Option<Var>>, GraphError> {
        Ok(vec![])
    }
}
