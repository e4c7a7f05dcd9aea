use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tm_matrix::Matrix;

use crate::error::Result;

/// A `rows x cols` matrix with elements drawn uniformly from `[0, 1)`.
pub fn random_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Matrix> {
    let data = (0..rows * cols).map(|_| rng.gen_range(0.0..1.0)).collect();
    Ok(Matrix::from_vec(rows, cols, data)?)
}

/// Two `n x n` random operands, reproducible from `seed`.
pub fn random_pair(n: usize, seed: u64) -> Result<(Matrix, Matrix)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = random_matrix(n, n, &mut rng)?;
    let b = random_matrix(n, n, &mut rng)?;
    Ok((a, b))
}
