#[cfg(feature = "alloc")]
use crate::dynmatrix::DynMatrix;
use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;
use crate::Matrix;

#[cfg(feature = "alloc")]
use super::{DynKalmanFilter, EstimateError};
use super::{CovarianceUpdate, KalmanFilter};

/// Configuration for a one-dimensional constant-velocity tracker.
///
/// State is `[position, velocity]`, only position is measured:
///
/// ```text
/// F = [[1, dt], [0, 1]]    H = [1, 0]
/// Q = q·I                  R = [r]
/// x₀ = [p₀, v₀]            P₀ = σ₀²·I
/// ```
///
/// Defaults reproduce the reference setup: `dt = 1`, `q = 0.1`, `r = 4`
/// (measurement standard deviation 2), starting at rest at the origin with
/// unit variance.
///
/// ```
/// use linkalman::estimate::{ConstantVelocity, CovarianceUpdate};
///
/// let settings = ConstantVelocity {
///     dt: 0.5,
///     covariance_update: CovarianceUpdate::Joseph,
///     ..ConstantVelocity::<f64>::default()
/// };
/// let kf = settings.build();
/// assert_eq!(kf.transition()[(0, 1)], 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVelocity<T> {
    /// Time step between measurements (default: 1.0).
    pub dt: T,
    /// Diagonal process noise `q` (default: 0.1).
    pub process_noise: T,
    /// Measurement noise variance `r` (default: 4.0).
    pub measurement_noise: T,
    /// Initial position estimate (default: 0.0).
    pub initial_position: T,
    /// Initial velocity estimate (default: 0.0).
    pub initial_velocity: T,
    /// Initial variance on both components (default: 1.0).
    pub initial_variance: T,
    /// Covariance update form (default: [`CovarianceUpdate::Simple`]).
    pub covariance_update: CovarianceUpdate,
}

impl Default for ConstantVelocity<f64> {
    fn default() -> Self {
        Self {
            dt: 1.0,
            process_noise: 0.1,
            measurement_noise: 4.0,
            initial_position: 0.0,
            initial_velocity: 0.0,
            initial_variance: 1.0,
            covariance_update: CovarianceUpdate::Simple,
        }
    }
}

impl Default for ConstantVelocity<f32> {
    fn default() -> Self {
        Self {
            dt: 1.0,
            process_noise: 0.1,
            measurement_noise: 4.0,
            initial_position: 0.0,
            initial_velocity: 0.0,
            initial_variance: 1.0,
            covariance_update: CovarianceUpdate::Simple,
        }
    }
}

impl<T: FloatScalar> ConstantVelocity<T> {
    /// `F = [[1, dt], [0, 1]]`.
    pub fn transition(&self) -> Matrix<T, 2, 2> {
        Matrix::new([[T::one(), self.dt], [T::zero(), T::one()]])
    }

    /// `H = [1, 0]`.
    pub fn observation(&self) -> Matrix<T, 1, 2> {
        Matrix::new([[T::one(), T::zero()]])
    }

    /// Build the fixed-size filter.
    pub fn build(&self) -> KalmanFilter<T, 2, 1> {
        KalmanFilter::new(
            self.transition(),
            self.observation(),
            Matrix::from_diagonal_value(self.process_noise),
            Matrix::new([[self.measurement_noise]]),
            ColumnVector::from_column([self.initial_position, self.initial_velocity]),
            Matrix::from_diagonal_value(self.initial_variance),
        )
        .with_covariance_update(self.covariance_update)
    }

    /// Build the runtime-sized equivalent of [`build`](Self::build).
    #[cfg(feature = "alloc")]
    pub fn build_dyn(&self) -> Result<DynKalmanFilter<T>, EstimateError> {
        Ok(DynKalmanFilter::new(
            self.transition().into(),
            self.observation().into(),
            DynMatrix::from_diagonal(&[self.process_noise; 2]),
            DynMatrix::from_diagonal(&[self.measurement_noise]),
            DynMatrix::from_column(&[self.initial_position, self.initial_velocity]),
            DynMatrix::from_diagonal(&[self.initial_variance; 2]),
        )?
        .with_covariance_update(self.covariance_update))
    }
}
