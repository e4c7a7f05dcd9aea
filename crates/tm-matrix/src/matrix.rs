use std::ops::{Index, IndexMut};

use crate::backend::MatmulBackend;
use crate::error::{MatrixError, Result};
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// A dense, row-major matrix of f64 values.
///
/// The shape is fixed at construction; element values can be changed in
/// place. Multiplication always returns a new matrix and never touches its
/// operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    storage: CpuStorage,
    shape: Shape,
}

impl Matrix {
    /// Create a matrix with every element set to `fill`.
    pub fn filled(rows: usize, cols: usize, fill: f64) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        Ok(Matrix {
            storage: CpuStorage::filled(shape, fill)?,
            shape,
        })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `DataLength` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let expected = shape.checked_numel()?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                shape,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix {
            storage: CpuStorage::from_vec(data),
            shape,
        })
    }

    /// Create a matrix from a list of rows.
    ///
    /// An empty list yields a `0x0` matrix.
    ///
    /// # Errors
    /// Returns `RaggedRow` naming the first row whose length differs from
    /// the first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Self::from_vec(n_rows, n_cols, data)
    }

    /// Returns the matrix shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// True if the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Read element `(row, col)`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` outside `[0, rows) x [0, cols)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.shape.offset(row, col)?;
        Ok(self.storage.as_slice()[idx])
    }

    /// Overwrite element `(row, col)`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` outside `[0, rows) x [0, cols)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.shape.offset(row, col)?;
        self.storage.as_mut_slice()[idx] = value;
        Ok(())
    }

    /// Row-major element data.
    pub fn as_slice(&self) -> &[f64] {
        self.storage.as_slice()
    }

    /// Borrow row `row` as a slice.
    ///
    /// # Panics
    /// Panics if `row >= rows()`.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows(), "row {row} out of bounds for {}", self.shape);
        let cols = self.cols();
        &self.as_slice()[row * cols..(row + 1) * cols]
    }

    /// Copy the elements out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows()).map(|r| self.row(r).to_vec()).collect()
    }

    /// Consume the matrix and return its row-major data.
    pub fn into_vec(self) -> Vec<f64> {
        self.storage.into_vec()
    }

    /// Matrix product `self @ other` using the given kernel.
    ///
    /// self is [m, k], other is [k, n], result is [m, n].
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `self.cols() != other.rows()`; nothing
    /// is allocated in that case. May return `OutOfMemory` for the output.
    pub fn matmul(&self, other: &Matrix, backend: &dyn MatmulBackend) -> Result<Matrix> {
        let out = self.shape.matmul_shape(&other.shape)?;
        let m = self.rows();
        let k = self.cols();
        let n = other.cols();

        let data = backend.matmul(self.as_slice(), other.as_slice(), m, k, n)?;
        Ok(Matrix {
            storage: CpuStorage::from_vec(data),
            shape: out,
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// # Panics
    /// Panics on an out-of-range index.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        match self.shape.offset(row, col) {
            Ok(idx) => &self.storage.as_slice()[idx],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        match self.shape.offset(row, col) {
            Ok(idx) => &mut self.storage.as_mut_slice()[idx],
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::CpuBackend;

    #[test]
    fn test_from_vec() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape().dims(), (2, 3));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
        assert_eq!(m[(0, 2)], 3.0);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_filled_and_zeros() {
        let z = Matrix::zeros(2, 3).unwrap();
        assert_eq!(z.as_slice(), &[0.0; 6]);

        let f = Matrix::filled(3, 1, 2.5).unwrap();
        assert_eq!(f.as_slice(), &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn test_empty_matrices() {
        let m = Matrix::zeros(0, 5).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.shape(), Shape::new(0, 5));
        assert!(m.to_rows().is_empty());
        assert!(Matrix::from_vec(4, 0, vec![]).is_ok());
    }

    #[test]
    fn test_identity() {
        let i = Matrix::identity(3).unwrap();
        assert_eq!(
            i.to_rows(),
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0]
            ]
        );
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Matrix::zeros(2, 2).unwrap();
        m.set(1, 1, 7.0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 7.0);

        assert_eq!(
            m.get(2, 0),
            Err(MatrixError::IndexOutOfBounds {
                row: 2,
                col: 0,
                shape: Shape::new(2, 2)
            })
        );
        assert!(m.set(0, 2, 1.0).is_err());
        assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let m = Matrix::zeros(2, 2).unwrap();
        let _value = m[(0, 2)];
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let m = Matrix::from_rows(rows.clone()).unwrap();
        assert_eq!(m.shape(), Shape::new(3, 2));
        assert_eq!(m.row(2), &[5.0, 6.0]);
        assert_eq!(m.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_dimension_mismatch());

        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0, 7.0]])
            .unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRow {
                row: 2,
                expected: 2,
                got: 3
            }
        );
        assert_eq!(err.to_string(), "row 2 has 3 elements, expected 2");
        assert_eq!(Matrix::from_rows(vec![]).unwrap().shape(), Shape::new(0, 0));
    }

    #[test]
    fn test_matmul() {
        let backend = CpuBackend::new();
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
        let c = a.matmul(&b, &backend).unwrap();
        assert_eq!(c.shape().dims(), (2, 2));
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let backend = CpuBackend::new();
        let a = Matrix::zeros(2, 3).unwrap();
        let b = Matrix::zeros(4, 5).unwrap();
        let err = a.matmul(&b, &backend).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                left: Shape::new(2, 3),
                right: Shape::new(4, 5)
            }
        );
    }
}
