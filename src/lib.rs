//! # linkalman
//!
//! Linear Kalman filtering on small dense matrices, no-std compatible.
//! Suitable for embedded trackers (no heap allocation in the fixed-size
//! filter, no FPU assumptions).
//!
//! ## Quick start
//!
//! ```
//! use linkalman::estimate::ConstantVelocity;
//!
//! // Track a target moving at roughly unit speed from noisy positions
//! let mut kf = ConstantVelocity::<f64>::default().build();
//! for z in [0.0, 1.0, 2.2, 2.9, 4.1] {
//!     kf.step_scalar(z).unwrap();
//! }
//! assert!((kf.position() - 3.5713).abs() < 1e-4);
//! assert!((kf.velocity() - 0.7655).abs() < 1e-4);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Fixed-size `Matrix<T, M, N>` with const-generic dimensions.
//!   Stack-allocated column-major storage. Arithmetic, transpose, integer
//!   powers, symmetry helpers. [`Vector<T, N>`] and [`ColumnVector<T, N>`]
//!   are type aliases for 1-row and 1-column matrices.
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions
//!   (requires `alloc` feature, included with `std`). Shape-checked
//!   arithmetic returning [`linalg::LinalgError::DimensionMismatch`].
//!
//! - [`linalg`]: LU decomposition with partial pivoting: `solve()`,
//!   `inverse()`, `det()`, with singularity detection.
//!
//! - [`estimate`]: [`KalmanFilter`](estimate::KalmanFilter) (const-generic),
//!   [`DynKalmanFilter`](estimate::DynKalmanFilter) (runtime shapes) and the
//!   [`ConstantVelocity`](estimate::ConstantVelocity) model.
//!
//! - [`fixture`]: Plain-text measurement series, Q8.8 hex input and Q8.8 count output
//!   (requires `std`).
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by the filters
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm, `fixture` module |
//! | `alloc`   | via std  | `DynMatrix`, `DynKalmanFilter`, `filter_all` |
//! | `tracing` | no       | Structured `tracing` events from the filters |
//! | `all`     | no       | `std` + `tracing` |
//!
//! Without `std`, float math comes from the pure-Rust `libm` backend of
//! `num-traits`, which is always enabled.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod estimate;
#[cfg(feature = "std")]
pub mod fixture;
pub mod linalg;
pub mod matrix;
pub mod traits;

pub use matrix::aliases::{
    ColumnVector1, ColumnVector2, ColumnVector3, ColumnVector4, Matrix1, Matrix1x2, Matrix1x3,
    Matrix1x4, Matrix2, Matrix2x1, Matrix2x4, Matrix3, Matrix4, Matrix4x2, Vector1, Vector2,
    Vector3, Vector4,
};
pub use matrix::vector::{ColumnVector, Vector};
pub use matrix::Matrix;
#[cfg(feature = "alloc")]
pub use dynmatrix::DynMatrix;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
