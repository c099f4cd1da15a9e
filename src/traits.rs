use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that divides or compares against machine epsilon:
/// inversion, determinants, and the Kalman filters themselves.
pub trait FloatScalar: Scalar + Float {
    /// Threshold below which a pivot or determinant counts as zero, for a
    /// matrix whose entries have magnitude `scale`.
    #[inline]
    fn singular_tol(scale: Self) -> Self {
        Self::epsilon() * scale
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// Lets the LU routines operate on both fixed-size `Matrix`
/// and heap-allocated `DynMatrix`.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// `(rows, cols)` pair, as reported in dimension errors.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap two rows in place.
    fn swap_rows(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for j in 0..self.ncols() {
            let tmp = *self.get(a, j);
            *self.get_mut(a, j) = *self.get(b, j);
            *self.get_mut(b, j) = tmp;
        }
    }
}
