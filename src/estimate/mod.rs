//! Linear Kalman filtering.
//!
//! Two estimators share the same recursion:
//!
//! - [`KalmanFilter`]: const-generic state (`N`) and measurement (`M`)
//!   dimensions, stack-allocated, fully no-std. Shape consistency of the
//!   model is enforced by the type system.
//! - [`DynKalmanFilter`]: runtime dimensions on [`DynMatrix`](crate::DynMatrix)
//!   (requires `alloc`). Shapes are checked once at construction and
//!   rejected with [`EstimateError::InvalidConfig`].
//!
//! Both expose `predict()` (`x ← F·x`, `P ← F·P·Fᵀ + Q`) and `update(z)`
//! (innovation, gain, state and covariance correction). The caller composes
//! them, canonically predict-then-update once per measurement; either may
//! be called on its own, e.g. predict-only dead reckoning between sparse
//! measurements.
//!
//! # Constant-velocity tracking
//!
//! ```
//! use linkalman::estimate::ConstantVelocity;
//!
//! let mut kf = ConstantVelocity::<f64>::default().build();
//! for z in [0.0, 1.0, 2.2, 2.9, 4.1] {
//!     kf.step_scalar(z).unwrap();
//! }
//! assert!((kf.position() - 3.5713333701195755).abs() < 1e-9);
//! ```
//!
//! # Covariance update form
//!
//! The default [`CovarianceUpdate::Simple`] form `P ← (I − K·H)·P` is cheap
//! and reproduces the textbook recursion exactly, but under floating-point
//! rounding `P` slowly loses symmetry and can lose positive
//! semi-definiteness over long runs, particularly when `R` is small relative
//! to `H·P·Hᵀ`. [`CovarianceUpdate::Joseph`] keeps `P` symmetric PSD at the
//! cost of two extra products; `with_symmetrize(true)` additionally replaces
//! `P` by `(P + Pᵀ)/2` after every update.

#[cfg(feature = "alloc")]
mod dynkalman;
mod kalman;
mod models;


#[cfg(feature = "alloc")]
pub use dynkalman::{DynInnovation, DynKalmanFilter};
pub use kalman::{Innovation, KalmanFilter};
pub use models::ConstantVelocity;

use crate::linalg::{DimensionMismatch, LinalgError};

/// How the covariance is corrected in the update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceUpdate {
    /// `P ← (I − K·H)·P`.
    #[default]
    Simple,
    /// `P ← (I − K·H)·P·(I − K·H)ᵀ + K·R·Kᵀ`.
    Joseph,
}

/// Errors from state estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateError {
    /// Innovation covariance `S = H·P·Hᵀ + R` is singular, so no gain exists.
    /// The filter state is left untouched.
    SingularInnovation,
    /// An operand handed to the filter has the wrong shape
    /// (e.g. a measurement of the wrong length).
    DimensionMismatch(DimensionMismatch),
    /// Model matrices or initial belief have mutually inconsistent shapes.
    InvalidConfig {
        /// Which input was rejected (`"F"`, `"H"`, `"Q"`, `"R"`, `"x0"`, `"P0"`).
        matrix: &'static str,
        /// Shape implied by the rest of the model.
        expected: (usize, usize),
        /// Shape supplied.
        got: (usize, usize),
    },
}

impl From<LinalgError> for EstimateError {
    fn from(e: LinalgError) -> Self {
        match e {
            LinalgError::Singular => EstimateError::SingularInnovation,
            LinalgError::DimensionMismatch(d) => EstimateError::DimensionMismatch(d),
        }
    }
}

impl From<DimensionMismatch> for EstimateError {
    fn from(d: DimensionMismatch) -> Self {
        EstimateError::DimensionMismatch(d)
    }
}

impl core::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EstimateError::SingularInnovation => {
                write!(f, "innovation covariance is singular")
            }
            EstimateError::DimensionMismatch(d) => d.fmt(f),
            EstimateError::InvalidConfig {
                matrix,
                expected,
                got,
            } => write!(
                f,
                "invalid filter configuration: {} must be {}x{}, got {}x{}",
                matrix, expected.0, expected.1, got.0, got.1
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EstimateError {}
