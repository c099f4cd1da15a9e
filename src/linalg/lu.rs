use crate::linalg::LinalgError;
use crate::matrix::vector::ColumnVector;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Whether `value` is numerically zero next to entries of magnitude `scale`.
/// NaN counts as zero.
#[inline]
pub(crate) fn negligible<T: FloatScalar>(value: T, scale: T) -> bool {
    !(value.abs() > T::singular_tol(scale))
}

/// Largest entry magnitude; NaN entries propagate.
fn max_abs<T: FloatScalar>(a: &impl MatrixRef<T>) -> T {
    let mut m = T::zero();
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            let v = a.get(i, j).abs();
            if v.is_nan() {
                return v;
            }
            if v > m {
                m = v;
            }
        }
    }
    m
}

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm` is filled with the row permutation indices.
/// Returns `true` if the number of row swaps was even.
///
/// Fails with [`LinalgError::DimensionMismatch`] for a non-square input or a
/// permutation buffer of the wrong length, and with [`LinalgError::Singular`]
/// when a pivot is zero relative to the largest entry of `a` (below
/// `epsilon · max|aᵢⱼ|`), so the test does not depend on the units of `a`.
pub fn lu_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, LinalgError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LinalgError::mismatch((n, n), a.shape()));
    }
    if perm.len() != n {
        return Err(LinalgError::mismatch((n, 1), (perm.len(), 1)));
    }

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let scale = max_abs(a);
    let mut even = true;

    for col in 0..n {
        // Partial pivoting: largest magnitude in this column
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let val = a.get(row, col).abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        // NaN pivots fail this comparison too
        if negligible(max_val, scale) {
            return Err(LinalgError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            a.swap_rows(col, max_row);
            even = !even;
        }

        let inv_pivot = T::one() / *a.get(col, col);
        for row in (col + 1)..n {
            *a.get_mut(row, col) = *a.get(row, col) * inv_pivot;
        }

        for j in (col + 1)..n {
            let u = *a.get(col, j);
            for row in (col + 1)..n {
                *a.get_mut(row, j) = *a.get(row, j) - *a.get(row, col) * u;
            }
        }
    }

    Ok(even)
}

/// Solve Ax = b given the packed LU decomposition and permutation.
///
/// `lu` is the packed L/U matrix from `lu_in_place`.
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Forward substitution: Ly = Pb
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution: Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition of a fixed-size square matrix.
///
/// Stores the packed L/U factors and permutation vector.
///
/// # Example
///
/// ```
/// use linkalman::{ColumnVector, Matrix};
///
/// let a = Matrix::new([[2.0_f64, 1.0], [5.0, 3.0]]);
/// let lu = a.lu().unwrap();
///
/// let x = lu.solve(&ColumnVector::from_column([4.0, 11.0]));
/// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T, const N: usize> {
    lu: Matrix<T, N, N>,
    perm: [usize; N],
    even: bool,
}

impl<T: FloatScalar, const N: usize> LuDecomposition<T, N> {
    /// Decompose a matrix. Returns an error if the matrix is singular.
    pub fn new(a: &Matrix<T, N, N>) -> Result<Self, LinalgError> {
        let mut lu = *a;
        let mut perm = [0usize; N];
        let even = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &ColumnVector<T, N>) -> ColumnVector<T, N> {
        let b_flat = b.to_array();
        let mut x_flat = [T::zero(); N];
        lu_solve(&self.lu, &self.perm, &b_flat, &mut x_flat);
        ColumnVector::from_column(x_flat)
    }

    /// Compute the matrix inverse, one unit column at a time.
    pub fn inverse(&self) -> Matrix<T, N, N> {
        let mut inv = Matrix::<T, N, N>::zeros();
        let mut e = [T::zero(); N];

        for col in 0..N {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&self.lu, &self.perm, &e, &mut inv.data[col]);
        }

        inv
    }

    /// Compute the determinant.
    pub fn det(&self) -> T {
        let mut d = if self.even { T::one() } else { -T::one() };
        for i in 0..N {
            d = d * self.lu[(i, i)];
        }
        d
    }
}

/// Closed-form inverse for 1×1 and 2×2, which covers the innovation
/// covariance of every scalar or planar measurement model.
#[inline]
fn inverse_direct<T: FloatScalar, const N: usize>(
    m: &Matrix<T, N, N>,
) -> Result<Matrix<T, N, N>, LinalgError> {
    let mut out = Matrix::<T, N, N>::zeros();
    match N {
        1 => {
            let a = m[(0, 0)];
            if negligible(a, a.abs()) {
                return Err(LinalgError::Singular);
            }
            out.data[0][0] = T::one() / a;
        }
        2 => {
            let (a, b) = (m[(0, 0)], m[(0, 1)]);
            let (c, d) = (m[(1, 0)], m[(1, 1)]);
            let det = a * d - b * c;
            let scale = max_abs(m);
            if negligible(det, scale * scale) {
                return Err(LinalgError::Singular);
            }
            let inv_det = T::one() / det;
            out[(0, 0)] = d * inv_det;
            out[(0, 1)] = -b * inv_det;
            out[(1, 0)] = -c * inv_det;
            out[(1, 1)] = a * inv_det;
        }
        _ => return Ok(LuDecomposition::new(m)?.inverse()),
    }
    Ok(out)
}

/// Convenience methods on square matrices.
impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T, N>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Solve `Ax = b` for `x` via LU decomposition.
    pub fn solve(&self, b: &ColumnVector<T, N>) -> Result<ColumnVector<T, N>, LinalgError> {
        Ok(self.lu()?.solve(b))
    }

    /// Matrix inverse.
    ///
    /// Fails with [`LinalgError::Singular`] when the determinant (1×1, 2×2)
    /// or any LU pivot (larger sizes) is numerically zero relative to the
    /// size of the entries, rather than dividing by zero. A 1×1 matrix is
    /// singular only when its entry is zero or NaN.
    ///
    /// ```
    /// use linkalman::Matrix;
    /// let s = Matrix::new([[4.0_f64]]);
    /// assert_eq!(s.inverse().unwrap()[(0, 0)], 0.25);
    ///
    /// let zero = Matrix::new([[0.0_f64]]);
    /// assert!(zero.inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        inverse_direct(self)
    }
}
