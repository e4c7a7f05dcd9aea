use tm_matrix::{CpuBackend, Matrix, NaiveBackend};

use crate::error::Result;

/// One multiplication implementation taking part in a comparison.
pub trait Contender: Send + Sync {
    /// Returns the name printed in the comparison table.
    fn name(&self) -> &str;

    /// Compute `a @ b`.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}

/// The cache-blocked kernel from `tm-matrix`.
pub struct TiledContender {
    backend: CpuBackend,
}

impl TiledContender {
    pub fn new(backend: CpuBackend) -> Self {
        Self { backend }
    }
}

impl Default for TiledContender {
    fn default() -> Self {
        Self::new(CpuBackend::new())
    }
}

impl Contender for TiledContender {
    fn name(&self) -> &str {
        "Tiled"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        Ok(a.matmul(b, &self.backend)?)
    }
}

/// Plain i-j-k triple loop.
#[derive(Default)]
pub struct NaiveContender;

impl NaiveContender {
    pub fn new() -> Self {
        Self
    }
}

impl Contender for NaiveContender {
    fn name(&self) -> &str {
        "Naive"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        Ok(a.matmul(b, &NaiveBackend::new())?)
    }
}
