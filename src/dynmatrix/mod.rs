mod linalg;
mod ops;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::linalg::{DimensionMismatch, LinalgError};
use crate::traits::{MatrixMut, MatrixRef, Scalar};
use crate::Matrix;

/// Dynamically-sized heap-allocated matrix.
///
/// Column-major `Vec<T>` storage, matching the layout of fixed-size [`Matrix`].
/// Dimensions are set at runtime, and every binary operation checks them,
/// returning [`LinalgError::DimensionMismatch`] instead of truncating or
/// padding.
///
/// # Examples
///
/// ```
/// use linkalman::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let b = DynMatrix::<f64>::eye(2);
/// assert_eq!(a.try_mul(&b).unwrap(), a);
///
/// let h = DynMatrix::from_rows(1, 2, &[1.0, 0.0]).unwrap();
/// assert!(h.try_add(&a).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Fails if `row_major.len() != nrows * ncols`.
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Result<Self, LinalgError> {
        if row_major.len() != nrows * ncols {
            return Err(LinalgError::mismatch(
                (nrows, ncols),
                (row_major.len() / ncols.max(1), ncols),
            ));
        }
        let mut data = vec![T::zero(); nrows * ncols];
        for i in 0..nrows {
            for j in 0..ncols {
                data[j * nrows + i] = row_major[i * ncols + j];
            }
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Create an `n x 1` column vector.
    ///
    /// ```
    /// use linkalman::DynMatrix;
    /// let x = DynMatrix::from_column(&[0.0_f64, 1.5]);
    /// assert_eq!(x.nrows(), 2);
    /// assert_eq!(x[(1, 0)], 1.5);
    /// ```
    pub fn from_column(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
            nrows: values.len(),
            ncols: 1,
        }
    }

    /// Diagonal matrix from the given diagonal entries.
    pub fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }
}

impl<T> DynMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Column-major element slice. For a column vector this is the vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Fail unless the shape equals `expected`.
    pub fn expect_shape(&self, expected: (usize, usize)) -> Result<(), DimensionMismatch> {
        if self.shape() == expected {
            Ok(())
        } else {
            Err(DimensionMismatch {
                expected,
                got: self.shape(),
            })
        }
    }
}

// ── Trait impls ─────────────────────────────────────────────────────

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.nrows && col < self.ncols, "index out of bounds");
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.nrows && col < self.ncols, "index out of bounds");
        &mut self.data[col * self.nrows + row]
    }
}

// ── Conversions with fixed-size Matrix ──────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> From<Matrix<T, M, N>> for DynMatrix<T> {
    /// Convert a fixed-size `Matrix` into a `DynMatrix`.
    ///
    /// ```
    /// use linkalman::{DynMatrix, Matrix};
    /// let f = Matrix::new([[1.0, 1.0], [0.0, 1.0]]);
    /// let d: DynMatrix<f64> = f.into();
    /// assert_eq!(d.shape(), (2, 2));
    /// assert_eq!(d[(0, 1)], 1.0);
    /// ```
    fn from(m: Matrix<T, M, N>) -> Self {
        Self {
            data: m.data.iter().flatten().copied().collect(),
            nrows: M,
            ncols: N,
        }
    }
}

impl<T: Scalar, const M: usize, const N: usize> TryFrom<&DynMatrix<T>> for Matrix<T, M, N> {
    type Error = DimensionMismatch;

    /// Fails if the runtime dimensions don't match `M x N`.
    fn try_from(d: &DynMatrix<T>) -> Result<Self, Self::Error> {
        d.expect_shape((M, N))?;
        let mut out = Matrix::<T, M, N>::zeros();
        for j in 0..N {
            for i in 0..M {
                out[(i, j)] = d[(i, j)];
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_is_row_major() {
        let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        // column-major storage
        assert_eq!(m.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn from_rows_rejects_wrong_length() {
        let err = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch(_)));
    }

    #[test]
    fn eye_and_diagonal() {
        let id = DynMatrix::<f64>::eye(3);
        assert_eq!(id[(2, 2)], 1.0);
        assert_eq!(id[(0, 2)], 0.0);

        let q = DynMatrix::from_diagonal(&[0.1, 0.2]);
        assert_eq!(q[(1, 1)], 0.2);
        assert_eq!(q[(1, 0)], 0.0);
    }

    #[test]
    fn fixed_roundtrip() {
        let h = Matrix::new([[1.0, 0.0]]);
        let d = DynMatrix::from(h);
        assert_eq!(d.shape(), (1, 2));
        let back: Matrix<f64, 1, 2> = (&d).try_into().unwrap();
        assert_eq!(back, h);

        let wrong: Result<Matrix<f64, 2, 1>, _> = (&d).try_into();
        assert_eq!(
            wrong.unwrap_err(),
            DimensionMismatch {
                expected: (2, 1),
                got: (1, 2)
            }
        );
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_checks_bounds() {
        let m = DynMatrix::<f64>::zeros(2, 1);
        let _ = m[(0, 1)];
    }
}
