/*
 * @Description  : MeanAbsoluteError 节点单元测试
 */

use crate::assert_err;
use crate::errors::TensorError;
use crate::nn::{mean_absolute_error, Graph, GraphError, VarLossOps};
use crate::tensor::tests::simulate_gpus;
use crate::tensor::{DType, Device, Tensor};
use approx::assert_abs_diff_eq;

// ========== 前向 ==========

/// PyTorch 验证:
/// ```python
/// input = torch.tensor([1.0, 2.0, 3.0], requires_grad=True)
/// target = torch.tensor([1.5, 1.5, 5.0])
/// loss = nn.L1Loss()(input, target)
/// # loss = 1.0
/// # grad = [-0.3333, 0.3333, -0.3333]
/// ```
#[test]
fn test_mae_forward_basic() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0, 3.0], &[3]));
    let x1 = graph.variable(&Tensor::new(&[1.5, 1.5, 5.0], &[3]));

    let loss = x0.mae_loss(&x1).unwrap();

    let value = loss.data();
    assert_eq!(value.dtype(), DType::F32);
    assert_eq!(value.shape(), &[] as &[usize]);
    assert_abs_diff_eq!(loss.item().unwrap(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_mae_forward_constant_offset() {
    let graph = Graph::new();
    let x0 = Tensor::full(0.1, &[4, 3]);
    let x1 = &x0 + 0.5;

    let loss = mean_absolute_error(&graph.variable(&x0), &graph.variable(&x1)).unwrap();

    assert_abs_diff_eq!(loss.item().unwrap(), 0.5, epsilon = 1e-5);
}

#[test]
fn test_mae_result_is_rank_0_for_any_input_shape() {
    for shape in [vec![], vec![5], vec![4, 3], vec![2, 3, 4], vec![1, 1]] {
        let graph = Graph::new_with_seed(7);
        let x0 = graph.random_variable(-1.0, 1.0, &shape);
        let x1 = graph.random_variable(-1.0, 1.0, &shape);

        let loss = x0.mae_loss(&x1).unwrap();

        assert_eq!(loss.shape(), Vec::<usize>::new(), "输入形状{shape:?}");
        let expected = (&x0.data() - &x1.data()).abs().to_vec().iter().sum::<f32>()
            / x0.data().size() as f32;
        assert_abs_diff_eq!(loss.item().unwrap(), expected, epsilon = 1e-5);
    }
}

#[test]
fn test_mae_free_function_matches_method() {
    let graph = Graph::new_with_seed(0);
    let x0 = graph.random_variable(-1.0, 1.0, &[4, 3]);
    let x1 = graph.random_variable(-1.0, 1.0, &[4, 3]);

    let by_function = mean_absolute_error(&x0, &x1).unwrap();
    let by_method = x0.mae_loss(&x1).unwrap();

    assert_eq!(by_function.data(), by_method.data());
}

#[test]
fn test_mae_node_name() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::zeros(&[2]));
    let x1 = graph.variable(&Tensor::ones(&[2]));

    let loss = x0.mae_loss(&x1).unwrap();

    assert_eq!(loss.name(), "MeanAbsoluteError_2");
    assert_eq!(x0.name(), "Variable_0");
}

// ========== 反向 ==========

#[test]
fn test_mae_backward_basic() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0, 3.0], &[3]));
    let x1 = graph.variable(&Tensor::new(&[1.5, 1.5, 5.0], &[3]));

    let loss = x0.mae_loss(&x1).unwrap();
    loss.backward().unwrap();

    let third = 1.0 / 3.0;
    assert_abs_diff_eq!(
        x0.grad().unwrap(),
        Tensor::new(&[-third, third, -third], &[3]),
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        x1.grad().unwrap(),
        Tensor::new(&[third, -third, third], &[3]),
        epsilon = 1e-6
    );
}

#[test]
fn test_mae_backward_with_upstream_grad() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, -1.0, 0.5, 2.0], &[2, 2]));
    let x1 = graph.variable(&Tensor::new(&[0.0, 0.0, 1.0, 1.0], &[2, 2]));

    let loss = x0.mae_loss(&x1).unwrap();
    let gy = graph.constant(&Tensor::scalar(2.0));
    loss.set_grad_var(Some(&gy)).unwrap();
    loss.backward().unwrap();

    // 2 * sign(x0 - x1) / 4
    assert_abs_diff_eq!(
        x0.grad().unwrap(),
        Tensor::new(&[0.5, -0.5, -0.5, 0.5], &[2, 2]),
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        x1.grad().unwrap(),
        Tensor::new(&[-0.5, 0.5, 0.5, -0.5], &[2, 2]),
        epsilon = 1e-6
    );
}

#[test]
fn test_mae_backward_zero_diff_gives_zero_grad() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    let x1 = graph.variable(&Tensor::new(&[1.0, 3.0], &[2]));

    x0.mae_loss(&x1).unwrap().backward().unwrap();

    assert_eq!(x0.grad().unwrap(), Tensor::new(&[0.0, -0.5], &[2]));
}

#[test]
fn test_mae_backward_to_constant_target() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    let target = graph.constant(&Tensor::new(&[0.0, 0.0], &[2]));

    x0.mae_loss(&target).unwrap().backward().unwrap();

    assert_eq!(x0.grad().unwrap(), Tensor::new(&[0.5, 0.5], &[2]));
    assert!(target.grad().is_none());
}

// ========== 错误 ==========

#[test]
fn test_mae_shape_mismatch() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::zeros(&[2, 3]));
    let x1 = graph.variable(&Tensor::zeros(&[3, 2]));

    assert_err!(
        x0.mae_loss(&x1),
        GraphError::ShapeMismatch(
            [2, 3],
            [3, 2],
            "MeanAbsoluteError节点的两个父节点形状必须一致"
        )
    );
    // [1, 3]与[3]也不算一致
    let x2 = graph.variable(&Tensor::zeros(&[1, 3]));
    let x3 = graph.variable(&Tensor::zeros(&[3]));
    assert_err!(x2.mae_loss(&x3), GraphError::ShapeMismatch { .. });
}

#[test]
fn test_mae_across_graphs() {
    let graph1 = Graph::new();
    let graph2 = Graph::new();
    let x0 = graph1.variable(&Tensor::zeros(&[2]));
    let x1 = graph2.variable(&Tensor::zeros(&[2]));

    assert_err!(
        mean_absolute_error(&x0, &x1),
        GraphError::InvalidOperation("不能对来自不同 Graph 的 Var 计算MAE损失")
    );
}

// ========== 设备 ==========

#[test]
fn test_mae_on_gpu() {
    simulate_gpus();
    let device = crate::require_gpu!();
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0, 3.0], &[3]).to_device(device).unwrap());
    let x1 = graph.variable(&Tensor::new(&[1.5, 1.5, 5.0], &[3]).to_device(device).unwrap());

    let loss = x0.mae_loss(&x1).unwrap();
    assert_eq!(loss.data().device(), device);
    assert_abs_diff_eq!(loss.data().to_cpu(), Tensor::scalar(1.0), epsilon = 1e-6);

    loss.backward().unwrap();
    let third = 1.0 / 3.0;
    let gx0 = x0.grad().unwrap();
    assert_eq!(gx0.device(), device);
    assert_abs_diff_eq!(
        gx0.to_cpu(),
        Tensor::new(&[-third, third, -third], &[3]),
        epsilon = 1e-6
    );
    assert_eq!(x1.grad().unwrap().device(), device);
}

#[test]
fn test_mae_across_devices() {
    simulate_gpus();
    let device = crate::require_gpu!();
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::ones(&[3]));
    let x1 = graph.variable(&Tensor::zeros(&[3]).to_device(device).unwrap());

    assert_err!(
        x0.mae_loss(&x1),
        GraphError::Tensor(TensorError::DeviceMismatch { left: Device::Cpu, right })
            if *right == device
    );
}
