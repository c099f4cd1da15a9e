use core::ops::{Index, IndexMut};

use crate::traits::Scalar;
use crate::Matrix;

/// A row vector (1×N matrix).
///
/// Supports single-index access (`v[i]`) and dot products.
/// Use [`ColumnVector`] for state and measurement vectors.
///
/// # Examples
///
/// ```
/// use linkalman::Vector;
///
/// let v = Vector::from_array([3.0_f64, 4.0]);
/// assert_eq!(v[0], 3.0);
/// assert_eq!(v.dot(&v), 25.0);
/// ```
pub type Vector<T, const N: usize> = Matrix<T, 1, N>;

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Create a vector from a 1D array.
    #[inline]
    pub fn from_array(data: [T; N]) -> Self {
        Self::new([data])
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the vector has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[(0, i)] * rhs[(0, i)];
        }
        sum
    }
}

// Single-index access: v[i] instead of v[(0, i)]
impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self[(0, i)]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self[(0, i)]
    }
}

// ── Column vector ───────────────────────────────────────────────────

/// A column vector (N×1 matrix).
///
/// Enables natural `Matrix * ColumnVector` multiplication:
/// `(M×N) * (N×1) → (M×1)`. Element access uses `cv[(i, 0)]`.
pub type ColumnVector<T, const N: usize> = Matrix<T, N, 1>;

impl<T: Scalar, const N: usize> ColumnVector<T, N> {
    /// Create a column vector from a 1D array.
    ///
    /// ```
    /// use linkalman::ColumnVector;
    /// let cv = ColumnVector::from_column([1.0, 2.0, 3.0]);
    /// assert_eq!(cv[(0, 0)], 1.0);
    /// assert_eq!(cv[(2, 0)], 3.0);
    /// ```
    #[inline]
    pub fn from_column(data: [T; N]) -> Self {
        Self { data: [data] }
    }

    /// Copy the elements out as a plain array.
    #[inline]
    pub fn to_array(&self) -> [T; N] {
        self.data[0]
    }
}
