/*
 * @Description  : Var 扩展 trait 模块
 *
 * 按功能领域组织 Var 的扩展方法，用户按需 import。
 *
 * # 使用示例
 * ```ignore
 * use mae_autograd::nn::{Var, VarLossOps};
 *
 * let loss = output.mae_loss(&target)?;
 * ```
 */

mod loss;

pub use loss::{mean_absolute_error, VarLossOps};
