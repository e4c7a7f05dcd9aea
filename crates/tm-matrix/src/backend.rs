use std::fmt::Debug;

use crate::error::{MatrixError, Result};
use crate::shape::Shape;

/// Trait for pluggable matrix multiplication kernels.
///
/// Operands are passed as row-major slices together with their dimensions
/// and the product is returned as a freshly allocated row-major vector. A
/// kernel never writes to its inputs.
pub trait MatmulBackend: Send + Sync + Debug {
    /// Returns the name of this kernel (e.g., "naive", "blocked").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// - `a`: row-major data of shape [m, k]
    /// - `b`: row-major data of shape [k, n]
    /// - Returns: row-major data of shape [m, n]
    fn matmul(&self, a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Result<Vec<f64>>;
}

/// Check that `a` and `b` hold exactly `m*k` and `k*n` elements.
pub fn check_operands(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Result<()> {
    check_len(a, Shape::new(m, k))?;
    check_len(b, Shape::new(k, n))
}

fn check_len(data: &[f64], shape: Shape) -> Result<()> {
    let expected = shape.checked_numel()?;
    if data.len() != expected {
        return Err(MatrixError::DataLength {
            shape,
            expected,
            got: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_operands() {
        assert!(check_operands(&[0.0; 6], &[0.0; 12], 2, 3, 4).is_ok());
        assert!(check_operands(&[], &[], 0, 0, 0).is_ok());

        let err = check_operands(&[0.0; 5], &[0.0; 12], 2, 3, 4).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DataLength {
                shape: Shape::new(2, 3),
                expected: 6,
                got: 5
            }
        );
        assert!(check_operands(&[0.0; 6], &[0.0; 11], 2, 3, 4).is_err());
    }
}
