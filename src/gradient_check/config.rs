/*
 * @Description  : 梯度检查的配置
 */

use super::error::GradCheckError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// 梯度检查的配置（可序列化，便于从测试夹具中读取）
///
/// 默认值按`f32`精度选取：`eps = 1e-3`，`atol = 1e-4`，`rtol = 1e-3`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradCheckConfig {
    /// 中心差分的步长
    pub eps: f32,
    /// 绝对容差
    pub atol: f64,
    /// 相对容差（相对数值结果）
    pub rtol: f64,
    /// 与输入一一对应；为true的输入不参与检查。None表示检查全部输入
    pub no_grads: Option<Vec<bool>>,
    /// 随机方向的种子；None时每次检查都使用新的随机方向
    pub seed: Option<u64>,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        Self {
            eps: 1e-3,
            atol: 1e-4,
            rtol: 1e-3,
            no_grads: None,
            seed: None,
        }
    }
}

impl GradCheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    pub fn with_no_grads(mut self, no_grads: Vec<bool>) -> Self {
        self.no_grads = Some(no_grads);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 每个输入是否参与检查
    pub(super) fn checked_inputs(&self, input_count: usize) -> Result<Vec<bool>, GradCheckError> {
        match &self.no_grads {
            None => Ok(vec![true; input_count]),
            Some(no_grads) if no_grads.len() == input_count => {
                Ok(no_grads.iter().map(|skip| !skip).collect())
            }
            Some(no_grads) => Err(GradCheckError::InvalidArgument(format!(
                "no_grads有{}项，但输入有{}个",
                no_grads.len(),
                input_count
            ))),
        }
    }

    pub(super) fn validate(&self) -> Result<(), GradCheckError> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(GradCheckError::InvalidArgument(format!(
                "eps必须是正的有限数，实际为{}",
                self.eps
            )));
        }
        if self.atol < 0.0 || self.rtol < 0.0 {
            return Err(GradCheckError::InvalidArgument(format!(
                "容差不能为负：atol={}，rtol={}",
                self.atol, self.rtol
            )));
        }
        Ok(())
    }

    pub(super) fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}
