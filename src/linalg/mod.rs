//! Dense linear algebra: LU decomposition, inversion, and the error types
//! shared by the fixed-size and runtime-sized matrices.

pub(crate) mod lu;

pub use lu::{lu_in_place, lu_solve, LuDecomposition};

/// Shape disagreement between two operands.
///
/// Carried inside [`LinalgError::DimensionMismatch`] and the estimator
/// errors so callers can report exactly which shapes collided.
///
/// ```
/// use linkalman::linalg::DimensionMismatch;
///
/// let e = DimensionMismatch { expected: (2, 2), got: (2, 3) };
/// assert_eq!(e.to_string(), "dimension mismatch: expected 2x2, got 2x3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Expected `(rows, cols)`.
    pub expected: (usize, usize),
    /// Got `(rows, cols)`.
    pub got: (usize, usize),
}

impl core::fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "dimension mismatch: expected {}x{}, got {}x{}",
            self.expected.0, self.expected.1, self.got.0, self.got.1
        )
    }
}

/// Errors from linear algebra operations.
///
/// ```
/// use linkalman::Matrix;
/// use linkalman::linalg::LinalgError;
///
/// let singular = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    Singular,
    /// Operand shapes are incompatible for the requested operation.
    DimensionMismatch(DimensionMismatch),
}

impl LinalgError {
    pub(crate) fn mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        LinalgError::DimensionMismatch(DimensionMismatch { expected, got })
    }
}

impl From<DimensionMismatch> for LinalgError {
    fn from(e: DimensionMismatch) -> Self {
        LinalgError::DimensionMismatch(e)
    }
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::DimensionMismatch(e) => e.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DimensionMismatch {}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
