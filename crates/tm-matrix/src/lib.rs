//! `tm-matrix` - Dense matrix value and cache-blocked multiplication kernels.
//!
//! This crate provides:
//! - A `Matrix` type: fixed shape, row-major `f64` storage
//! - A `MatmulBackend` trait for pluggable multiplication kernels
//! - `CpuBackend`, a tiled kernel with optional row-block parallelism
//! - `NaiveBackend`, the reference triple loop
//! - `KernelConfig` for block size and threading, with `TM_*` env overrides

pub mod backend;
pub mod config;
pub mod cpu;
pub mod error;
pub mod matrix;
pub mod shape;
pub mod storage;

// Re-export primary types at the crate root for convenience.
pub use backend::MatmulBackend;
pub use config::{ConfigError, KernelConfig};
pub use cpu::{CpuBackend, NaiveBackend};
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use shape::Shape;
pub use storage::CpuStorage;

/// Multiply `a` by `b` with the default blocked kernel.
///
/// Returns a new `(a.rows(), b.cols())` matrix. Fails with
/// `DimensionMismatch` if `a.cols() != b.rows()`, before any allocation.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.matmul(b, &CpuBackend::new())
}
