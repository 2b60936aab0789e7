/*
 * @Description  : 张量的逐元素四则运算与取反。
 *                 两个张量的形状须严格一致，或其中一个只含1个元素（视作纯数）；否则panic。
 */

use crate::assert_panic;
use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

use crate::tensor::tests::TensorCheck;

#[test]
fn test_add_with_or_without_ownership() {
    let tensor1 = Tensor::new(&[1., 2., 3.], &[3]);
    let tensor2 = Tensor::new(&[4., 5., 6.], &[3]);
    let expected = Tensor::new(&[5., 7., 9.], &[3]);

    // 不带引用的张量 + 不带引用的张量
    assert_eq!(tensor1.clone() + tensor2.clone(), expected);
    // 不带引用的张量 + 带引用的张量
    assert_eq!(tensor1.clone() + &tensor2, expected);
    // 带引用的张量 + 不带引用的张量
    assert_eq!(&tensor1 + tensor2.clone(), expected);
    // 带引用的张量 + 带引用的张量
    assert_eq!(&tensor1 + &tensor2, expected);

    // 与f32
    let expected = Tensor::new(&[6., 7., 8.], &[3]);
    assert_eq!(5. + tensor1.clone(), expected);
    assert_eq!(5. + &tensor1, expected);
    assert_eq!(tensor1.clone() + 5., expected);
    assert_eq!(&tensor1 + 5., expected);
}

#[test]
fn test_sub_mul_div() {
    let tensor1 = Tensor::new(&[6., 8., 10., 12.], &[2, 2]);
    let tensor2 = Tensor::new(&[1., 2., 4., 3.], &[2, 2]);

    assert_eq!(&tensor1 - &tensor2, Tensor::new(&[5., 6., 6., 9.], &[2, 2]));
    assert_eq!(&tensor1 * &tensor2, Tensor::new(&[6., 16., 40., 36.], &[2, 2]));
    assert_eq!(&tensor1 / &tensor2, Tensor::new(&[6., 4., 2.5, 4.], &[2, 2]));

    assert_eq!(1. - &tensor2, Tensor::new(&[0., -1., -3., -2.], &[2, 2]));
    assert_eq!(&tensor2 * 0.5, Tensor::new(&[0.5, 1., 2., 1.5], &[2, 2]));
    assert_eq!(12. / &tensor2, Tensor::new(&[12., 6., 3., 4.], &[2, 2]));
}

#[test]
fn test_neg() {
    let tensor = Tensor::new(&[1., -2., 0.], &[3]);
    assert_eq!(-&tensor, Tensor::new(&[-1., 2., -0.], &[3]));
    assert_eq!(-tensor, Tensor::new(&[-1., 2., 0.], &[3]));
}

#[test]
fn test_add_with_single_element_tensor() {
    let test_cases = vec![
        TensorCheck {
            shape: vec![],
            data: vec![1.],
            expected: vec![vec![3.]],
        },
        TensorCheck {
            shape: vec![1, 1],
            data: vec![1.],
            expected: vec![vec![3.]],
        },
        TensorCheck {
            shape: vec![3],
            data: vec![1., 2., 3.],
            expected: vec![vec![3., 4., 5.]],
        },
        TensorCheck {
            shape: vec![2, 2],
            data: vec![1., 2., 3., 4.],
            expected: vec![vec![3., 4., 5., 6.]],
        },
    ];

    for case in test_cases {
        let tensor = Tensor::new(&case.data, &case.shape);
        let expected = Tensor::new(&case.expected[0], &case.shape);
        // 形状为[]、[1]、[1, 1]的张量都视作纯数
        for scalar_shape in [vec![], vec![1], vec![1, 1]] {
            let scalar = Tensor::new(&[2.], &scalar_shape);
            assert_eq!(&tensor + &scalar, expected, "{case:?}");
            // 两边都只含1个元素时，结果取左操作数的形状
            assert_eq!((&scalar + &tensor).to_vec(), expected.to_vec(), "{case:?}");
        }
    }
}

#[test]
fn test_arithmetic_with_incompatible_shapes() {
    let tensor1 = Tensor::new(&[1., 2., 3.], &[3]);
    let tensor2 = Tensor::new(&[1., 2., 3., 4.], &[4]);
    for (operator, result) in [
        (Operator::Add, std::panic::catch_unwind(|| &tensor1 + &tensor2)),
        (Operator::Sub, std::panic::catch_unwind(|| &tensor1 - &tensor2)),
        (Operator::Mul, std::panic::catch_unwind(|| &tensor1 * &tensor2)),
        (Operator::Div, std::panic::catch_unwind(|| &tensor1 / &tensor2)),
    ] {
        let err = result.expect_err("形状不一致时应panic");
        let message = err.downcast_ref::<String>().expect("panic消息应为String");
        assert_eq!(
            message,
            &TensorError::OperatorError {
                operator,
                tensor1_shape: vec![3],
                tensor2_shape: vec![4],
            }
            .to_string()
        );
    }

    // [1, 3]与[3]形状不严格一致
    let tensor3 = Tensor::new(&[1., 2., 3.], &[1, 3]);
    assert_panic!(
        &tensor1 + &tensor3,
        TensorError::OperatorError {
            operator: Operator::Add,
            tensor1_shape: vec![3],
            tensor2_shape: vec![1, 3],
        }
    );
}
