use crate::errors::TensorError;
use crate::tensor::{DType, Tensor};

#[test]
fn test_shape_dimension_size() {
    let tensor = Tensor::zeros(&[4, 3]);
    assert_eq!(tensor.shape(), &[4, 3]);
    assert_eq!(tensor.dimension(), 2);
    assert_eq!(tensor.size(), 12);
    assert_eq!(Tensor::scalar(1.).size(), 1);
}

#[test]
fn test_dtype() {
    let tensor = Tensor::new_random(-1.0, 1.0, &[4, 3]);
    assert_eq!(tensor.dtype(), DType::F32);
    assert_eq!(tensor.dtype().to_string(), "float32");
}

#[test]
fn test_is_same_shape() {
    let tensor1 = Tensor::zeros(&[1, 4]);
    assert!(tensor1.is_same_shape(&Tensor::ones(&[1, 4])));
    assert!(!tensor1.is_same_shape(&Tensor::zeros(&[4])));
}

#[test]
fn test_is_scalar_and_number() {
    for shape in [vec![], vec![1], vec![1, 1], vec![1, 1, 1]] {
        let tensor = Tensor::new(&[0.5], &shape);
        assert!(tensor.is_scalar());
        assert_eq!(tensor.number(), Some(0.5));
        assert_eq!(tensor.get_data_number(), Ok(0.5));
    }

    let tensor = Tensor::zeros(&[2, 1]);
    assert!(!tensor.is_scalar());
    assert_eq!(tensor.number(), None);
    assert_eq!(
        tensor.get_data_number(),
        Err(TensorError::NotScalar(vec![2, 1]))
    );
}

#[test]
fn test_index_mut() {
    let mut tensor = Tensor::zeros(&[2, 2]);
    tensor[[0, 1]] = 3.;
    assert_eq!(tensor.to_vec(), vec![0., 3., 0., 0.]);
    tensor.view_mut().fill(1.);
    assert_eq!(tensor.view().sum(), 4.);
}
