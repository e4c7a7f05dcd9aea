use crate::error::{MatrixError, Result};
use crate::shape::Shape;

/// Contiguous row-major f64 storage backing a matrix.
///
/// Allocation goes through `try_reserve_exact` so that an impossible request
/// surfaces as `OutOfMemory` instead of aborting the process.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuStorage {
    data: Vec<f64>,
}

impl CpuStorage {
    /// Allocate storage for `shape`, every element set to `fill`.
    ///
    /// # Errors
    /// Returns `OutOfMemory` if the element count overflows or the
    /// allocator refuses the request.
    pub fn filled(shape: Shape, fill: f64) -> Result<Self> {
        let n = shape.checked_numel()?;
        let mut data = Vec::new();
        data.try_reserve_exact(n)
            .map_err(|_| MatrixError::OutOfMemory {
                rows: shape.rows(),
                cols: shape.cols(),
            })?;
        data.resize(n, fill);
        Ok(CpuStorage { data })
    }

    /// Zero-filled storage for `shape`.
    pub fn zeros(shape: Shape) -> Result<Self> {
        Self::filled(shape, 0.0)
    }

    /// Wrap an existing vector without copying.
    pub fn from_vec(data: Vec<f64>) -> Self {
        CpuStorage { data }
    }

    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
