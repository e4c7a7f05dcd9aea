//! `tm-bench` - Time the tiled kernel against reference implementations.
//!
//! [`compare`] runs each [`Contender`] on the same operands, checks that all
//! of them agree with the first, and returns the timings as data. Rendering
//! is left to the caller ([`Comparison::to_tsv`] covers the usual table).

pub mod compare;
pub mod contender;
pub mod error;
pub mod ndarray_ref;
pub mod random;

pub use compare::{compare, Comparison, TimingRow};
pub use contender::{Contender, NaiveContender, TiledContender};
pub use error::{BenchError, Result};
pub use ndarray_ref::NdarrayContender;
pub use random::{random_matrix, random_pair};
