use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("matrix error: {0}")]
    Matrix(#[from] tm_matrix::MatrixError),
    #[error("ndarray shape error: {0}")]
    Ndarray(#[from] ndarray::ShapeError),
    #[error("{name} disagrees with {baseline}: max abs difference {max_abs_diff:e}")]
    Disagreement {
        name: String,
        baseline: String,
        max_abs_diff: f64,
    },
    #[error("no contenders to compare")]
    NoContenders,
}

pub type Result<T> = std::result::Result<T, BenchError>;
