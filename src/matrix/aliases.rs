//! Type aliases for the small sizes a state estimator typically needs.

use crate::matrix::vector::{ColumnVector, Vector};
use crate::Matrix;

// ── Square matrix aliases ──────────────────────────────────────────

/// 1×1 matrix (scalar measurement covariance).
pub type Matrix1<T> = Matrix<T, 1, 1>;
/// 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;
/// 3×3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;
/// 4×4 matrix.
pub type Matrix4<T> = Matrix<T, 4, 4>;

// ── Rectangular matrix aliases ─────────────────────────────────────

/// 1×2 matrix (position-only measurement of a 2-state model).
pub type Matrix1x2<T> = Matrix<T, 1, 2>;
/// 1×3 matrix.
pub type Matrix1x3<T> = Matrix<T, 1, 3>;
/// 1×4 matrix.
pub type Matrix1x4<T> = Matrix<T, 1, 4>;
/// 2×1 matrix (gain of a 2-state, 1-measurement model).
pub type Matrix2x1<T> = Matrix<T, 2, 1>;
/// 2×4 matrix.
pub type Matrix2x4<T> = Matrix<T, 2, 4>;
/// 4×2 matrix.
pub type Matrix4x2<T> = Matrix<T, 4, 2>;

// ── Row vector aliases ─────────────────────────────────────────────

/// 1-element row vector.
pub type Vector1<T> = Vector<T, 1>;
/// 2-element row vector.
pub type Vector2<T> = Vector<T, 2>;
/// 3-element row vector.
pub type Vector3<T> = Vector<T, 3>;
/// 4-element row vector.
pub type Vector4<T> = Vector<T, 4>;

// ── Column vector aliases ──────────────────────────────────────────

/// 1-element column vector.
pub type ColumnVector1<T> = ColumnVector<T, 1>;
/// 2-element column vector.
pub type ColumnVector2<T> = ColumnVector<T, 2>;
/// 3-element column vector.
pub type ColumnVector3<T> = ColumnVector<T, 3>;
/// 4-element column vector.
pub type ColumnVector4<T> = ColumnVector<T, 4>;
