use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::Scalar;
use crate::Matrix;

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Combine two same-shape matrices element by element.
    #[inline]
    fn zip_map(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = *self;
        for (out_col, rhs_col) in out.data.iter_mut().zip(rhs.data.iter()) {
            for (a, &b) in out_col.iter_mut().zip(rhs_col.iter()) {
                *a = f(*a, b);
            }
        }
        out
    }

    /// Transpose: (M×N) → (N×M).
    pub fn transpose(&self) -> Matrix<T, N, M> {
        let mut out = Matrix::<T, N, M>::zeros();
        for i in 0..M {
            for j in 0..N {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }
}

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Add for Matrix<T, M, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a + b)
    }
}

impl<T: Scalar, const M: usize, const N: usize> Sub for Matrix<T, M, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(&rhs, |a, b| a - b)
    }
}

impl<T: Scalar, const M: usize, const N: usize> AddAssign for Matrix<T, M, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const M: usize, const N: usize> SubAssign for Matrix<T, M, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const M: usize, const N: usize> Neg for Matrix<T, M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::zeros() - self
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>>
    for Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Matrix<T, M, P> {
        let mut out = Matrix::<T, M, P>::zeros();
        for i in 0..M {
            for j in 0..P {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = sum;
            }
        }
        out
    }
}

// ── Scalar multiplication: matrix * scalar ──────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Mul<T> for Matrix<T, M, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        out *= rhs;
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize> MulAssign<T> for Matrix<T, M, N> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut().flatten() {
            *x = *x * rhs;
        }
    }
}

// ── Reference variants ──────────────────────────────────────────────
// Matrix is Copy, so &Matrix ops just deref and delegate.

macro_rules! forward_ref_binop {
    ($Op:ident, $method:ident) => {
        impl<T: Scalar, const M: usize, const N: usize> $Op<&Matrix<T, M, N>>
            for Matrix<T, M, N>
        {
            type Output = Matrix<T, M, N>;
            fn $method(self, rhs: &Matrix<T, M, N>) -> Matrix<T, M, N> {
                self.$method(*rhs)
            }
        }

        impl<T: Scalar, const M: usize, const N: usize> $Op<&Matrix<T, M, N>>
            for &Matrix<T, M, N>
        {
            type Output = Matrix<T, M, N>;
            fn $method(self, rhs: &Matrix<T, M, N>) -> Matrix<T, M, N> {
                (*self).$method(*rhs)
            }
        }
    };
}

forward_ref_binop!(Add, add);
forward_ref_binop!(Sub, sub);

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<&Matrix<T, N, P>>
    for &Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;
    fn mul(self, rhs: &Matrix<T, N, P>) -> Matrix<T, M, P> {
        (*self).mul(*rhs)
    }
}

// ── scalar * matrix (concrete impls to avoid orphan rules) ──────────

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl<const M: usize, const N: usize> Mul<Matrix<$t, M, N>> for $t {
                type Output = Matrix<$t, M, N>;

                fn mul(self, rhs: Matrix<$t, M, N>) -> Matrix<$t, M, N> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnVector;

    #[test]
    fn add_sub() {
        let p = Matrix::new([[1.0, 0.5], [0.5, 2.0]]);
        let q = Matrix::new([[0.1, 0.0], [0.0, 0.1]]);

        let inflated = p + q;
        assert_eq!(inflated[(0, 0)], 1.1);
        assert_eq!(inflated[(0, 1)], 0.5);

        assert_eq!(inflated - q, p);
    }

    #[test]
    fn assign_ops() {
        let mut p = Matrix::new([[1.0, 0.0], [0.0, 1.0]]);
        let q = Matrix::new([[0.25, 0.0], [0.0, 0.25]]);
        p += q;
        assert_eq!(p[(1, 1)], 1.25);
        p -= q;
        assert_eq!(p, Matrix::eye());
    }

    #[test]
    fn negation() {
        let y = ColumnVector::from_column([1.5, -2.0]);
        assert_eq!((-y).to_array(), [-1.5, 2.0]);
    }

    #[test]
    fn propagate_covariance() {
        // F P Fᵀ for the unit-step constant-velocity transition
        let f = Matrix::new([[1.0, 1.0], [0.0, 1.0]]);
        let p: Matrix<f64, 2, 2> = Matrix::eye();
        let fpft = f * p * f.transpose();
        assert_eq!(fpft, Matrix::new([[2.0, 1.0], [1.0, 1.0]]));
    }

    #[test]
    fn non_square_chain() {
        // H (1×2) * P (2×2) * Hᵀ (2×1) → 1×1
        let h = Matrix::new([[1.0, 0.0]]);
        let p = Matrix::new([[3.0, 1.0], [1.0, 2.0]]);
        let s = h * p * h.transpose();
        assert_eq!(s.nrows(), 1);
        assert_eq!(s.ncols(), 1);
        assert_eq!(s[(0, 0)], 3.0);
    }

    #[test]
    fn scalar_multiply() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = a * 0.5;
        assert_eq!(b[(1, 1)], 2.0);
        assert_eq!(0.5 * a, b);

        let mut c = a;
        c *= 2.0;
        assert_eq!(c[(0, 1)], 4.0);
    }

    #[test]
    fn transpose() {
        let a = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = a.transpose();

        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn ref_variants_match_owned() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::new([[5.0, 6.0], [7.0, 8.0]]);

        assert_eq!(&a + &b, a + b);
        assert_eq!(a - &b, a - b);
        assert_eq!(&a * &b, a * b);
    }
}
