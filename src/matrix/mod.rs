pub mod aliases;
mod ops;
mod square;
pub mod vector;

use core::ops::{Index, IndexMut};

use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Fixed-size matrix with `M` rows and `N` columns.
///
/// Storage is column-major: `data[col][row]`.
/// Stack-allocated, no-std compatible. Shapes are part of the type, so
/// multiplying or adding incompatible matrices does not compile.
///
/// # Examples
///
/// ```
/// use linkalman::Matrix;
///
/// let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b: Matrix<f64, 3, 3> = Matrix::eye();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    pub(crate) data: [[T; M]; N],
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix from a row-major 2D array.
    ///
    /// The input is `[[row0], [row1], ...]` (M arrays of N elements each).
    /// Internally transposed to column-major storage.
    #[inline]
    pub fn new(rows: [[T; N]; M]) -> Self
    where
        T: Copy,
    {
        let init = rows[0][0];
        let mut data: [[T; M]; N] = [[init; M]; N];
        for (col, column) in data.iter_mut().enumerate() {
            for (row, value) in column.iter_mut().enumerate() {
                *value = rows[row][col];
            }
        }
        Self { data }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use linkalman::Matrix;
    /// let m: Matrix<f64, 2, 2> = Matrix::from_fn(|i, j| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(m, Matrix::eye());
    /// ```
    pub fn from_fn(f: impl Fn(usize, usize) -> T) -> Self
    where
        T: Copy + Default,
    {
        let mut data = [[T::default(); M]; N];
        for (j, column) in data.iter_mut().enumerate() {
            for (i, value) in column.iter_mut().enumerate() {
                *value = f(i, j);
            }
        }
        Self { data }
    }

    /// Number of rows.
    #[inline]
    pub const fn nrows(&self) -> usize {
        M
    }

    /// Number of columns.
    #[inline]
    pub const fn ncols(&self) -> usize {
        N
    }
}

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix filled with zeros.
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); M]; N],
        }
    }

    /// Whether every element is finite.
    pub fn is_finite(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.data.iter().flatten().all(|x| x.is_finite())
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Create an identity matrix (square matrices only).
    pub fn eye() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m.data[i][i] = T::one();
        }
        m
    }
}

impl<T, const M: usize, const N: usize> MatrixRef<T> for Matrix<T, M, N> {
    #[inline]
    fn nrows(&self) -> usize {
        M
    }

    #[inline]
    fn ncols(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col][row]
    }
}

impl<T, const M: usize, const N: usize> MatrixMut<T> for Matrix<T, M, N> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col][row]
    }
}

// Index by (row, col) tuple
impl<T, const M: usize, const N: usize> Index<(usize, usize)> for Matrix<T, M, N> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col][row]
    }
}

impl<T, const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<T, M, N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col][row]
    }
}

pub use aliases::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_eye() {
        let z: Matrix<f64, 3, 3> = Matrix::zeros();
        assert_eq!(z[(0, 0)], 0.0);
        assert_eq!(z[(2, 2)], 0.0);

        let id: Matrix<f64, 3, 3> = Matrix::eye();
        assert_eq!(id[(0, 0)], 1.0);
        assert_eq!(id[(1, 1)], 1.0);
        assert_eq!(id[(0, 1)], 0.0);
    }

    #[test]
    fn new_is_row_major() {
        let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m[(1, 1)], 4.0);
    }

    #[test]
    fn measurement_row_shape() {
        let h = Matrix::new([[1.0, 0.0]]);
        assert_eq!(h.nrows(), 1);
        assert_eq!(h.ncols(), 2);
        assert_eq!(MatrixRef::shape(&h), (1, 2));
    }

    #[test]
    fn from_fn_builds_transition() {
        let dt = 0.5;
        let f: Matrix<f64, 2, 2> = Matrix::from_fn(|i, j| match (i, j) {
            (0, 1) => dt,
            (i, j) if i == j => 1.0,
            _ => 0.0,
        });
        assert_eq!(f, Matrix::new([[1.0, 0.5], [0.0, 1.0]]));
    }

    #[test]
    fn index_mut() {
        let mut m: Matrix<f64, 2, 2> = Matrix::zeros();
        m[(0, 1)] = 5.0;
        assert_eq!(m[(0, 1)], 5.0);
    }

    #[test]
    fn finiteness() {
        let mut m: Matrix<f64, 2, 2> = Matrix::eye();
        assert!(m.is_finite());
        m[(1, 0)] = f64::NAN;
        assert!(!m.is_finite());
    }

    #[test]
    fn swap_rows_through_trait() {
        let mut m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        MatrixMut::swap_rows(&mut m, 0, 1);
        assert_eq!(m, Matrix::new([[3.0, 4.0], [1.0, 2.0]]));
    }
}
