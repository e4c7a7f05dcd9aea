use tm_matrix::{Matrix, MatrixError};

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TMStatus {
    Ok = 0,
    ErrorInvalidDimension = 1,
    ErrorDimensionMismatch = 2,
    ErrorIndexOutOfBounds = 3,
    ErrorOutOfMemory = 4,
    ErrorInvalidArgument = 5,
    ErrorInternal = 6,
}

impl From<&MatrixError> for TMStatus {
    fn from(err: &MatrixError) -> Self {
        match err {
            MatrixError::InvalidDimension { .. } => TMStatus::ErrorInvalidDimension,
            MatrixError::DataLength { .. }
            | MatrixError::RaggedRow { .. }
            | MatrixError::DimensionMismatch { .. } => TMStatus::ErrorDimensionMismatch,
            MatrixError::IndexOutOfBounds { .. } => TMStatus::ErrorIndexOutOfBounds,
            MatrixError::OutOfMemory { .. } => TMStatus::ErrorOutOfMemory,
        }
    }
}

/// Opaque matrix handle owned by the foreign caller.
///
/// Created by `tm_matrix_create`, `tm_matrix_create_from` or `tm_multiply`
/// and released with `tm_matrix_destroy`.
pub struct TMMatrix {
    pub(crate) inner: Matrix,
}

impl TMMatrix {
    pub(crate) fn into_raw(inner: Matrix) -> *mut TMMatrix {
        Box::into_raw(Box::new(TMMatrix { inner }))
    }
}
