use crate::linalg::LuDecomposition;
use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Sum of diagonal elements.
    pub fn trace(&self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Diagonal matrix with `value` on every diagonal entry.
    ///
    /// ```
    /// use linkalman::Matrix2;
    /// let q = Matrix2::from_diagonal_value(0.1);
    /// assert_eq!(q[(1, 1)], 0.1);
    /// assert_eq!(q[(0, 1)], 0.0);
    /// ```
    pub fn from_diagonal_value(value: T) -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m[(i, i)] = value;
        }
        m
    }

    /// Integer matrix power via repeated squaring.
    ///
    /// `pow(0)` returns the identity matrix. Used to propagate a state
    /// several steps ahead in one product: `Fᵏ · x`.
    pub fn pow(&self, mut n: u32) -> Self {
        let mut result = Self::eye();
        let mut base = *self;
        while n > 0 {
            if n & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            n >>= 1;
        }
        result
    }

    /// Check if the matrix is exactly symmetric (A == Aᵀ).
    pub fn is_symmetric(&self) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Symmetric within an absolute tolerance.
    pub fn is_symmetric_within(&self, tol: T) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Symmetric part `(A + Aᵀ) / 2`.
    pub fn symmetrize(&self) -> Self {
        let half = T::one() / (T::one() + T::one());
        (*self + self.transpose()) * half
    }

    /// Determinant via LU decomposition; zero when the matrix is singular.
    pub fn det(&self) -> T {
        match LuDecomposition::new(self) {
            Ok(lu) => lu.det(),
            Err(_) => T::zero(),
        }
    }
}
