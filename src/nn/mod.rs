/*
 * @Description  : 负责动态计算图（define-by-run）的构建与反向传播
 */

mod graph;
mod nodes;
mod var;
mod var_ops;

pub use graph::{Graph, GraphError, GraphInner};
pub use nodes::NodeId;
pub use var::Var;
pub use var_ops::{mean_absolute_error, VarLossOps};

#[cfg(test)]
mod tests;
