use crate::errors::TensorError;
use crate::nn::GraphError;
use thiserror::Error;

/// 梯度检查错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error(
        "解析梯度与数值梯度不一致：解析方向导数为{analytic}，数值方向导数为{numeric}（atol={atol}，rtol={rtol}）"
    )]
    Mismatch {
        analytic: f64,
        numeric: f64,
        atol: f64,
        rtol: f64,
    },
    #[error("第{0}个输入没有得到梯度")]
    MissingGrad(usize),
    #[error("形状不匹配（期望{expected:?}，实际{got:?}）：{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("参数有误：{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
