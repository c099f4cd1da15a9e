#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::matrix::vector::ColumnVector;
use crate::traits::FloatScalar;
use crate::Matrix;

use super::{CovarianceUpdate, EstimateError};

/// Innovation produced by a successful update.
///
/// `residual` is `y = z − H·x` evaluated at the prior state and `covariance`
/// is `S = H·P·Hᵀ + R`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Innovation<T, const M: usize> {
    /// Measurement residual `y`.
    pub residual: ColumnVector<T, M>,
    /// Innovation covariance `S`.
    pub covariance: Matrix<T, M, M>,
    s_inv: Matrix<T, M, M>,
}

impl<T: FloatScalar, const M: usize> Innovation<T, M> {
    /// Normalized innovation squared, `yᵀ·S⁻¹·y`.
    ///
    /// χ²-distributed with `M` degrees of freedom when the filter is
    /// consistent; useful for gating outliers.
    pub fn normalized_squared(&self) -> T {
        (self.residual.transpose() * self.s_inv * self.residual)[(0, 0)]
    }
}

/// Linear Kalman filter with const-generic state and measurement dimensions.
///
/// `N` is the state dimension, `M` is the measurement dimension. The model
/// `F` (N×N), `H` (M×N), `Q` (N×N), `R` (M×M) is fixed at construction; the
/// belief `x`, `P` evolves through [`predict`](Self::predict) and
/// [`update`](Self::update).
///
/// All operations are stack-allocated: no heap, fully no-std compatible.
///
/// # Example
///
/// ```
/// use linkalman::estimate::KalmanFilter;
/// use linkalman::{ColumnVector, Matrix};
///
/// let f = Matrix::new([[1.0_f64, 1.0], [0.0, 1.0]]);
/// let h = Matrix::new([[1.0, 0.0]]);
/// let q = Matrix::new([[0.1, 0.0], [0.0, 0.1]]);
/// let r = Matrix::new([[4.0]]);
/// let mut kf = KalmanFilter::new(f, h, q, r, ColumnVector::from_column([0.0, 0.0]), Matrix::eye());
///
/// kf.predict();
/// kf.update(&ColumnVector::from_column([1.0])).unwrap();
/// assert!(kf.state()[(0, 0)] > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct KalmanFilter<T, const N: usize, const M: usize> {
    f: Matrix<T, N, N>,
    h: Matrix<T, M, N>,
    q: Matrix<T, N, N>,
    r: Matrix<T, M, M>,
    x: ColumnVector<T, N>,
    p: Matrix<T, N, N>,
    form: CovarianceUpdate,
    symmetrize: bool,
    last: Option<Innovation<T, M>>,
}

impl<T: FloatScalar, const N: usize, const M: usize> KalmanFilter<T, N, M> {
    /// Create a filter from the model matrices and the initial belief.
    pub fn new(
        f: Matrix<T, N, N>,
        h: Matrix<T, M, N>,
        q: Matrix<T, N, N>,
        r: Matrix<T, M, M>,
        x0: ColumnVector<T, N>,
        p0: Matrix<T, N, N>,
    ) -> Self {
        Self {
            f,
            h,
            q,
            r,
            x: x0,
            p: p0,
            form: CovarianceUpdate::default(),
            symmetrize: false,
            last: None,
        }
    }

    /// Select the covariance update form.
    pub fn with_covariance_update(mut self, form: CovarianceUpdate) -> Self {
        self.form = form;
        self
    }

    /// Replace `P` by its symmetric part after every update.
    pub fn with_symmetrize(mut self, on: bool) -> Self {
        self.symmetrize = on;
        self
    }

    /// Reference to the current state estimate.
    #[inline]
    pub fn state(&self) -> &ColumnVector<T, N> {
        &self.x
    }

    /// Reference to the current state covariance.
    #[inline]
    pub fn covariance(&self) -> &Matrix<T, N, N> {
        &self.p
    }

    #[inline]
    pub fn transition(&self) -> &Matrix<T, N, N> {
        &self.f
    }

    #[inline]
    pub fn observation(&self) -> &Matrix<T, M, N> {
        &self.h
    }

    #[inline]
    pub fn process_noise(&self) -> &Matrix<T, N, N> {
        &self.q
    }

    #[inline]
    pub fn measurement_noise(&self) -> &Matrix<T, M, M> {
        &self.r
    }

    #[inline]
    pub fn covariance_update(&self) -> CovarianceUpdate {
        self.form
    }

    /// Innovation from the most recent successful update.
    #[inline]
    pub fn last_innovation(&self) -> Option<&Innovation<T, M>> {
        self.last.as_ref()
    }

    /// Discard the current belief and start again from `(x0, p0)`.
    pub fn reset(&mut self, x0: ColumnVector<T, N>, p0: Matrix<T, N, N>) {
        self.x = x0;
        self.p = p0;
        self.last = None;
    }

    /// Project the belief one step forward.
    ///
    /// Updates: `x = F·x`, `P = F·P·Fᵀ + Q`.
    pub fn predict(&mut self) {
        self.x = self.f * self.x;
        self.p = self.f * self.p * self.f.transpose() + self.q;

        #[cfg(feature = "tracing")]
        tracing::trace!(state = ?self.x.to_array(), "kalman predict");
    }

    /// Correct the belief with measurement `z`.
    ///
    /// 1. `y = z − H·x`
    /// 2. `S = H·P·Hᵀ + R`
    /// 3. `K = P·Hᵀ·S⁻¹`
    /// 4. `x = x + K·y`
    /// 5. `P = (I − K·H)·P`, or the Joseph form if selected
    ///
    /// Fails with [`EstimateError::SingularInnovation`] when `S` cannot be
    /// inverted; in that case `x` and `P` are unchanged and the caller
    /// decides whether to skip the measurement or stop.
    pub fn update(&mut self, z: &ColumnVector<T, M>) -> Result<Innovation<T, M>, EstimateError> {
        let ht = self.h.transpose();
        let y = *z - self.h * self.x;
        let s = self.h * self.p * ht + self.r;

        let s_inv = match s.inverse() {
            Ok(s_inv) => s_inv,
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(innovation_covariance = ?s, "rejecting measurement, singular innovation covariance");
                return Err(EstimateError::SingularInnovation);
            }
        };
        let k = self.p * ht * s_inv; // N×M

        let i_kh = Matrix::<T, N, N>::eye() - k * self.h;
        let mut p = match self.form {
            CovarianceUpdate::Simple => i_kh * self.p,
            CovarianceUpdate::Joseph => {
                i_kh * self.p * i_kh.transpose() + k * self.r * k.transpose()
            }
        };
        if self.symmetrize {
            p = p.symmetrize();
        }

        self.x = self.x + k * y;
        self.p = p;

        let innovation = Innovation {
            residual: y,
            covariance: s,
            s_inv,
        };
        self.last = Some(innovation);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            residual = ?y.to_array(),
            state = ?self.x.to_array(),
            "kalman update"
        );

        Ok(innovation)
    }

    /// One full cycle: [`predict`](Self::predict) then [`update`](Self::update).
    ///
    /// If the update fails the prediction has still been applied.
    pub fn step(&mut self, z: &ColumnVector<T, M>) -> Result<Innovation<T, M>, EstimateError> {
        self.predict();
        self.update(z)
    }

    /// Run [`step`](Self::step) over every measurement and collect the
    /// posterior state after each one. Stops at the first failed update.
    #[cfg(feature = "alloc")]
    pub fn filter_all<I>(&mut self, measurements: I) -> Result<Vec<ColumnVector<T, N>>, EstimateError>
    where
        I: IntoIterator<Item = ColumnVector<T, M>>,
    {
        let iter = measurements.into_iter();
        let mut estimates = Vec::with_capacity(iter.size_hint().0);
        for z in iter {
            self.step(&z)?;
            estimates.push(self.x);
        }
        Ok(estimates)
    }
}

/// Scalar-measurement conveniences.
impl<T: FloatScalar, const N: usize> KalmanFilter<T, N, 1> {
    /// [`update`](Self::update) with a single measured value.
    pub fn update_scalar(&mut self, z: T) -> Result<Innovation<T, 1>, EstimateError> {
        self.update(&ColumnVector::from_column([z]))
    }

    /// [`step`](Self::step) with a single measured value.
    pub fn step_scalar(&mut self, z: T) -> Result<Innovation<T, 1>, EstimateError> {
        self.predict();
        self.update_scalar(z)
    }
}

/// Accessors for position/velocity state layouts.
impl<T: FloatScalar, const M: usize> KalmanFilter<T, 2, M> {
    /// First state component.
    #[inline]
    pub fn position(&self) -> T {
        self.x[(0, 0)]
    }

    /// Second state component.
    #[inline]
    pub fn velocity(&self) -> T {
        self.x[(1, 0)]
    }
}
