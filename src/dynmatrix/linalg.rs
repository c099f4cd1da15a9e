use alloc::vec;

use crate::linalg::lu::negligible;
use crate::linalg::{lu_in_place, lu_solve, LinalgError};
use crate::traits::FloatScalar;

use super::DynMatrix;

impl<T: FloatScalar> DynMatrix<T> {
    /// Matrix inverse.
    ///
    /// A 1×1 matrix is inverted by division (singular only for zero or NaN);
    /// larger ones go through LU with partial pivoting, pivots compared
    /// against `epsilon · max|aᵢⱼ|`. Fails with [`LinalgError::DimensionMismatch`]
    /// for a non-square matrix and [`LinalgError::Singular`] for a
    /// numerically zero pivot.
    ///
    /// ```
    /// use linkalman::DynMatrix;
    /// let s = DynMatrix::from_rows(1, 1, &[4.0_f64]).unwrap();
    /// assert_eq!(s.inverse().unwrap()[(0, 0)], 0.25);
    /// ```
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        let n = self.nrows;
        if !self.is_square() {
            return Err(LinalgError::mismatch((n, n), self.shape()));
        }
        if n == 1 {
            let a = self.data[0];
            if negligible(a, a.abs()) {
                return Err(LinalgError::Singular);
            }
            return Ok(DynMatrix::from_column(&[T::one() / a]));
        }

        let mut lu = self.clone();
        let mut perm = vec![0usize; n];
        lu_in_place(&mut lu, &mut perm)?;

        let mut inv = DynMatrix::zeros(n, n);
        let mut e = vec![T::zero(); n];
        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&lu, &perm, &e, &mut inv.data[col * n..(col + 1) * n]);
        }
        Ok(inv)
    }

    /// Determinant; zero when the matrix is singular.
    pub fn det(&self) -> Result<T, LinalgError> {
        let n = self.nrows;
        if !self.is_square() {
            return Err(LinalgError::mismatch((n, n), self.shape()));
        }
        let mut lu = self.clone();
        let mut perm = vec![0usize; n];
        let even = match lu_in_place(&mut lu, &mut perm) {
            Ok(even) => even,
            Err(LinalgError::Singular) => return Ok(T::zero()),
            Err(e) => return Err(e),
        };
        let mut d = if even { T::one() } else { -T::one() };
        for i in 0..n {
            d = d * lu[(i, i)];
        }
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_roundtrip() {
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]).unwrap();
        let id = a.try_mul(&a.inverse().unwrap()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn inverse_small_scale() {
        let s = DynMatrix::from_rows(1, 1, &[2.0e-12_f64]).unwrap();
        assert!((s.inverse().unwrap()[(0, 0)] * 2.0e-12 - 1.0).abs() < 1e-12);

        let a = DynMatrix::from_rows(
            3,
            3,
            &[1.0e-20_f64, 2.0e-20, 3.0e-20, 0.0, 1.0e-20, 4.0e-20, 5.0e-20, 6.0e-20, 0.0],
        )
        .unwrap();
        let id = a.try_mul(&a.inverse().unwrap()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn inverse_scalar_zero() {
        let z = DynMatrix::from_rows(1, 1, &[0.0_f64]).unwrap();
        assert_eq!(z.inverse().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn inverse_singular() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]).unwrap();
        assert_eq!(a.inverse().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn inverse_non_square() {
        let a = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(a.inverse().unwrap_err(), LinalgError::mismatch((2, 2), (2, 3)));
    }

    #[test]
    fn det_values() {
        let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]).unwrap();
        assert!((a.det().unwrap() - (-14.0)).abs() < 1e-12);

        let s = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]).unwrap();
        assert_eq!(s.det().unwrap(), 0.0);
    }
}
