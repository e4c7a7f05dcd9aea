use ndarray::Array2;
use tm_matrix::Matrix;

use crate::contender::Contender;
use crate::error::Result;

/// Optimized-library reference: `ndarray`'s `dot`, backed by the
/// `matrixmultiply` GEMM.
///
/// The conversion into and out of `Array2` is included in the timing. It is
/// O(n^2) against the O(n^3) product.
#[derive(Default)]
pub struct NdarrayContender;

impl NdarrayContender {
    pub fn new() -> Self {
        Self
    }
}

fn to_array(m: &Matrix) -> Result<Array2<f64>> {
    Ok(Array2::from_shape_vec(
        (m.rows(), m.cols()),
        m.as_slice().to_vec(),
    )?)
}

impl Contender for NdarrayContender {
    fn name(&self) -> &str {
        "ndarray"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        // Let tm-matrix produce the DimensionMismatch error; ndarray would panic.
        let shape = a.shape().matmul_shape(&b.shape())?;
        let c = to_array(a)?.dot(&to_array(b)?);
        Ok(Matrix::from_vec(
            shape.rows(),
            shape.cols(),
            c.iter().copied().collect(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_product() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let c = NdarrayContender::new().multiply(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_mismatch_is_an_error() {
        let a = Matrix::zeros(2, 3).unwrap();
        let b = Matrix::zeros(4, 5).unwrap();
        assert!(NdarrayContender::new().multiply(&a, &b).is_err());
    }
}
