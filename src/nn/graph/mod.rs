/*
 * @Description  : Graph 模块：动态计算图的核心实现
 *
 * 公开 API：
 * - `Graph`: 用户级句柄（PyTorch 风格）
 * - `GraphInner`: 底层实现
 * - `GraphError`: 错误类型
 */

mod backward;
mod error;
mod handle;
mod inner;

pub use error::GraphError;
pub use handle::Graph;
pub use inner::GraphInner;
