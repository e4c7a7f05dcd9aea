use crate::error::{MatrixError, Result};
use std::fmt;

/// The `(rows, cols)` shape of a dense matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Create a new shape. Either dimension may be zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Create a shape from signed dimensions, as handed over by foreign callers.
    ///
    /// # Errors
    /// Returns `InvalidDimension` if either dimension is negative.
    pub fn from_signed(rows: i64, cols: i64) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(r), Ok(c)) => Ok(Shape::new(r, c)),
            _ => Err(MatrixError::InvalidDimension { rows, cols }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    ///
    /// Only meaningful for shapes that already back an allocated matrix; use
    /// [`Shape::checked_numel`] before allocating.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of elements, or `OutOfMemory` if `rows * cols` does not
    /// fit in the address space.
    pub fn checked_numel(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.cols)
            .ok_or(MatrixError::OutOfMemory {
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row-major offset of `(row, col)`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `row >= rows` or `col >= cols`.
    pub fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                shape: *self,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Shape of `self @ other`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` naming both shapes if `self.cols != other.rows`.
    pub fn matmul_shape(&self, other: &Shape) -> Result<Shape> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                left: *self,
                right: *other,
            });
        }
        Ok(Shape::new(self.rows, other.cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(2, 3);
        assert_eq!(s.rows(), 2);
        assert_eq!(s.cols(), 3);
        assert_eq!(s.dims(), (2, 3));
        assert_eq!(s.numel(), 6);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_empty_shapes() {
        assert!(Shape::new(0, 4).is_empty());
        assert!(Shape::new(4, 0).is_empty());
        assert_eq!(Shape::new(0, 0).numel(), 0);
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(Shape::from_signed(3, 0).unwrap(), Shape::new(3, 0));
        assert_eq!(
            Shape::from_signed(-1, 2),
            Err(MatrixError::InvalidDimension { rows: -1, cols: 2 })
        );
        assert!(Shape::from_signed(2, -7).is_err());
    }

    #[test]
    fn test_checked_numel_overflow() {
        let s = Shape::new(usize::MAX, 2);
        assert!(matches!(
            s.checked_numel(),
            Err(MatrixError::OutOfMemory { .. })
        ));
    }

    #[test]
    fn test_offset() {
        let s = Shape::new(2, 3);
        assert_eq!(s.offset(0, 0).unwrap(), 0);
        assert_eq!(s.offset(1, 2).unwrap(), 5);
        assert!(s.offset(2, 0).is_err());
        assert!(s.offset(0, 3).is_err());
    }

    #[test]
    fn test_matmul_shape() {
        let a = Shape::new(2, 3);
        let b = Shape::new(3, 5);
        assert_eq!(a.matmul_shape(&b).unwrap(), Shape::new(2, 5));

        let err = a.matmul_shape(&Shape::new(4, 5)).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(
            err.to_string(),
            "dimension mismatch: cannot multiply [2x3] by [4x5]"
        );
    }
}
