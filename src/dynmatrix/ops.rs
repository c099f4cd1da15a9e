use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    fn check_same_shape(&self, rhs: &Self) -> Result<(), LinalgError> {
        if self.shape() != rhs.shape() {
            return Err(LinalgError::mismatch(self.shape(), rhs.shape()));
        }
        Ok(())
    }

    /// Element-wise sum; both operands must share a shape.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self.add_unchecked(rhs))
    }

    /// Element-wise difference; both operands must share a shape.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self.sub_unchecked(rhs))
    }

    /// Matrix product `(m×k) · (k×n) → (m×n)`.
    ///
    /// The mismatch error reports the row count `rhs` would need
    /// (`expected`) against what it has (`got`).
    ///
    /// ```
    /// use linkalman::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let b = DynMatrix::from_rows(2, 2, &[1.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert!(a.try_mul(&b).is_err());
    /// assert_eq!(b.try_mul(&a).unwrap(), a);
    /// ```
    pub fn try_mul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::mismatch(
                (self.ncols, rhs.ncols),
                (rhs.nrows, rhs.ncols),
            ));
        }
        Ok(self.mul_unchecked(rhs))
    }

    /// Product for operands whose shapes were validated up front.
    pub(crate) fn mul_unchecked(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.ncols, rhs.nrows);
        let mut out = DynMatrix::zeros(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let mut sum = T::zero();
                for k in 0..self.ncols {
                    sum = sum + self.data[k * self.nrows + i] * rhs.data[j * rhs.nrows + k];
                }
                out.data[j * out.nrows + i] = sum;
            }
        }
        out
    }

    /// Sum for operands whose shapes were validated up front.
    pub(crate) fn add_unchecked(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.shape(), rhs.shape());
        DynMatrix {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a + b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Difference for operands whose shapes were validated up front.
    pub(crate) fn sub_unchecked(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.shape(), rhs.shape());
        DynMatrix {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a - b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        DynMatrix {
            data: self.data.iter().map(|&x| x * k).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transpose: (m×n) → (n×m).
    pub fn transpose(&self) -> Self {
        let mut out = DynMatrix::zeros(self.ncols, self.nrows);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }
}
