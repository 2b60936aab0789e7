/*
 * @Description  : GraphInner 计算图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建、节点访问、添加节点（含前向计算）
 * - mode.rs: 梯度开关（no_grad）
 * - node_builders.rs: new_*_node
 */

mod core;
mod mode;
mod node_builders;

use crate::nn::nodes::NodeHandle;
use rand::rngs::StdRng;

/// 图的完整定义（核心实现）
///
/// 用户通常通过 `Graph` 句柄使用此结构。节点按创建顺序存放，`NodeId`即下标。
pub struct GraphInner {
    pub(in crate::nn::graph) name: String,
    pub(in crate::nn::graph) nodes: Vec<NodeHandle>,
    /// 关闭时新建的运算节点不记录求导信息（`requires_grad == false`）
    pub(in crate::nn::graph) grad_enabled: bool,
    /// 图级随机数生成器（None时退回到线程RNG）
    pub(in crate::nn::graph) rng: Option<StdRng>,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
