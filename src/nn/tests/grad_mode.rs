use crate::assert_panic;
use crate::nn::Graph;
use crate::tensor::Tensor;

#[test]
fn test_no_grad_scope() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::new(&[1.0, 2.0], &[2]));
    assert!(graph.is_grad_enabled());

    let y = graph.no_grad_scope(|| {
        assert!(!graph.is_grad_enabled());
        &x * &x
    });
    assert!(graph.is_grad_enabled());

    // 值照常计算，但不记录求导信息
    assert_eq!(y.data(), Tensor::new(&[1.0, 4.0], &[2]));
    assert!(!y.requires_grad());
    assert!(x.requires_grad());

    let z = &x * &x;
    assert!(z.requires_grad());
}

#[test]
fn test_no_grad_scope_restores_mode_after_panic() {
    let graph = Graph::new();
    let other = Graph::new();
    let x = graph.variable(&Tensor::ones(&[2]));
    let y = other.variable(&Tensor::ones(&[2]));

    // 跨图运算的算子重载会panic
    assert_panic!(graph.no_grad_scope(|| &x + &y));

    assert!(graph.is_grad_enabled());
    assert!((&x * &x).requires_grad());
}

#[test]
fn test_nested_no_grad_scope() {
    let graph = Graph::new();
    graph.no_grad_scope(|| {
        graph.no_grad_scope(|| assert!(!graph.is_grad_enabled()));
        assert!(!graph.is_grad_enabled());
    });
    assert!(graph.is_grad_enabled());
}

#[test]
fn test_backward_through_no_grad_result() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::scalar(3.0));
    let detached = graph.no_grad_scope(|| x.scale(2.0).unwrap());
    let y = &detached * &x;

    y.backward().unwrap();
    // detached 视作常量 6
    assert_eq!(x.grad().unwrap(), Tensor::scalar(6.0));
}
