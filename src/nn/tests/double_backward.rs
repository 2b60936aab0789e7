/*
 * @Description  : 二阶反向传播（enable_double_backprop）单元测试
 */

use crate::nn::{Graph, VarLossOps};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_double_backward_of_cube() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::scalar(2.0));
    let y = &(&x * &x) * &x;

    y.backward_ex(true, false).unwrap();
    let gx = x.grad_var().unwrap();
    // 3x²
    assert_eq!(gx.data(), Tensor::scalar(12.0));
    assert!(gx.requires_grad());

    x.clear_grad();
    gx.backward().unwrap();
    // 6x
    assert_eq!(x.grad().unwrap(), Tensor::scalar(12.0));
}

#[test]
fn test_double_backward_restores_grad_mode() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::scalar(2.0));
    let y = &x * &x;

    graph.no_grad_scope(|| {
        assert!(!graph.is_grad_enabled());
    });
    y.backward_ex(true, false).unwrap();
    assert!(graph.is_grad_enabled());
}

/// `mae`自身的二阶导数处处为0：一阶梯度不依赖于`x0`
#[test]
fn test_mae_second_derivative_is_zero() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    let x1 = graph.variable(&Tensor::new(&[0.0, 4.0], &[2]));
    let loss = x0.mae_loss(&x1).unwrap();

    loss.backward_ex(true, false).unwrap();
    let gx0 = x0.grad_var().unwrap();
    let w = graph.constant(&Tensor::new(&[1.0, 0.0], &[2]));
    let z = (&gx0 * &w).sum().unwrap();

    let grads = graph.grad(&[z], &[x0], None, false).unwrap();
    assert!(grads[0].is_none());
}

/// `y = mae(x0, x1)²`，一阶梯度`gx0 = gy · 2m · sign(d) / N`同时依赖`gy`与`m`
#[test]
fn test_mae_squared_double_backward() {
    let graph = Graph::new();
    let x0 = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    let x1 = graph.variable(&Tensor::new(&[0.0, 4.0], &[2]));
    let gy = graph.variable(&Tensor::scalar(2.0));

    let m = x0.mae_loss(&x1).unwrap();
    let y = m.square().unwrap();
    assert_abs_diff_eq!(y.item().unwrap(), 2.25, epsilon = 1e-6);

    y.set_grad_var(Some(&gy)).unwrap();
    y.backward_ex(true, false).unwrap();
    let gx0 = x0.grad_var().unwrap();
    let gx1 = x1.grad_var().unwrap();
    assert_abs_diff_eq!(gx0.data(), Tensor::new(&[3.0, -3.0], &[2]), epsilon = 1e-6);
    assert_abs_diff_eq!(gx1.data(), Tensor::new(&[-3.0, 3.0], &[2]), epsilon = 1e-6);

    // z = <gx0, w> = gy · m
    let w = graph.constant(&Tensor::new(&[1.0, 0.0], &[2]));
    let z = (&gx0 * &w).sum().unwrap();
    let grads = graph
        .grad(&[z], &[x0.clone(), x1.clone(), gy.clone()], None, false)
        .unwrap();

    assert_abs_diff_eq!(
        grads[0].as_ref().unwrap().data(),
        Tensor::new(&[1.0, -1.0], &[2]),
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        grads[1].as_ref().unwrap().data(),
        Tensor::new(&[-1.0, 1.0], &[2]),
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        grads[2].as_ref().unwrap().data(),
        Tensor::scalar(1.5),
        epsilon = 1e-6
    );
}
