use thiserror::Error;

use crate::shape::Shape;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("invalid dimension: rows={rows}, cols={cols} (must be non-negative)")]
    InvalidDimension { rows: i64, cols: i64 },
    #[error("data length {got} does not match shape {shape} (expected {expected})")]
    DataLength {
        shape: Shape,
        expected: usize,
        got: usize,
    },
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("dimension mismatch: cannot multiply {left} by {right}")]
    DimensionMismatch { left: Shape, right: Shape },
    #[error("index ({row}, {col}) out of bounds for {shape} matrix")]
    IndexOutOfBounds { row: usize, col: usize, shape: Shape },
    #[error("out of memory: cannot allocate storage for a {rows}x{cols} matrix")]
    OutOfMemory { rows: usize, cols: usize },
}

impl MatrixError {
    /// True for every flavour of shape disagreement: constructor data of the
    /// wrong length or with ragged rows, and multiplication operands with
    /// different inner dimensions.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            MatrixError::DataLength { .. }
                | MatrixError::RaggedRow { .. }
                | MatrixError::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
