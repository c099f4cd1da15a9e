use crate::dynmatrix::DynMatrix;
use crate::linalg::DimensionMismatch;
use crate::traits::FloatScalar;

use super::{CovarianceUpdate, EstimateError};

/// Innovation produced by a successful [`DynKalmanFilter::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynInnovation<T> {
    /// Measurement residual `y = z − H·x` (m×1).
    pub residual: DynMatrix<T>,
    /// Innovation covariance `S = H·P·Hᵀ + R` (m×m).
    pub covariance: DynMatrix<T>,
    s_inv: DynMatrix<T>,
}

impl<T: FloatScalar> DynInnovation<T> {
    /// Normalized innovation squared, `yᵀ·S⁻¹·y`.
    pub fn normalized_squared(&self) -> T {
        let y = &self.residual;
        y.transpose().mul_unchecked(&self.s_inv).mul_unchecked(y)[(0, 0)]
    }
}

/// Linear Kalman filter over runtime-sized matrices.
///
/// Same recursion as [`KalmanFilter`](super::KalmanFilter), for models whose
/// dimensions are only known at run time (e.g. read from configuration).
/// Every shape is validated in [`new`](Self::new); afterwards
/// [`predict`](Self::predict) cannot fail and [`update`](Self::update)
/// fails only on a wrongly sized measurement or a singular innovation.
///
/// ```
/// use linkalman::estimate::{DynKalmanFilter, EstimateError};
/// use linkalman::DynMatrix;
///
/// let f = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1.0]).unwrap();
/// let h = DynMatrix::from_rows(1, 2, &[1.0, 0.0]).unwrap();
/// let q = DynMatrix::from_diagonal(&[0.1, 0.1]);
/// let r = DynMatrix::from_diagonal(&[4.0]);
/// let x0 = DynMatrix::from_column(&[0.0, 0.0]);
/// let p0 = DynMatrix::eye(2);
///
/// let mut kf = DynKalmanFilter::new(f, h.clone(), q.clone(), r.clone(), x0.clone(), p0.clone()).unwrap();
/// kf.predict();
/// kf.update(&[1.0]).unwrap();
///
/// // H with three columns cannot observe a two-state model
/// let bad_h = DynMatrix::from_rows(1, 3, &[1.0, 0.0, 0.0]).unwrap();
/// let f = DynMatrix::eye(2);
/// let err = DynKalmanFilter::new(f, bad_h, q, r, x0, p0).unwrap_err();
/// assert!(matches!(err, EstimateError::InvalidConfig { matrix: "H", .. }));
/// ```
#[derive(Debug, Clone)]
pub struct DynKalmanFilter<T> {
    f: DynMatrix<T>,
    h: DynMatrix<T>,
    q: DynMatrix<T>,
    r: DynMatrix<T>,
    x: DynMatrix<T>,
    p: DynMatrix<T>,
    form: CovarianceUpdate,
    symmetrize: bool,
    last: Option<DynInnovation<T>>,
}

fn check_shape<T>(
    matrix: &'static str,
    m: &DynMatrix<T>,
    expected: (usize, usize),
) -> Result<(), EstimateError> {
    if m.shape() == expected {
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::warn!(matrix, ?expected, got = ?m.shape(), "rejecting filter configuration");
    Err(EstimateError::InvalidConfig {
        matrix,
        expected,
        got: m.shape(),
    })
}

impl<T: FloatScalar> DynKalmanFilter<T> {
    /// Create a filter, checking that `F` is n×n, `H` is m×n, `Q` is n×n,
    /// `R` is m×m, `x0` is n×1 and `P0` is n×n with n, m ≥ 1.
    pub fn new(
        f: DynMatrix<T>,
        h: DynMatrix<T>,
        q: DynMatrix<T>,
        r: DynMatrix<T>,
        x0: DynMatrix<T>,
        p0: DynMatrix<T>,
    ) -> Result<Self, EstimateError> {
        let n = f.nrows().max(1);
        check_shape("F", &f, (n, n))?;
        let m = h.nrows().max(1);
        check_shape("H", &h, (m, n))?;
        check_shape("Q", &q, (n, n))?;
        check_shape("R", &r, (m, m))?;
        check_shape("x0", &x0, (n, 1))?;
        check_shape("P0", &p0, (n, n))?;

        Ok(Self {
            f,
            h,
            q,
            r,
            x: x0,
            p: p0,
            form: CovarianceUpdate::default(),
            symmetrize: false,
            last: None,
        })
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

    /// State dimension n.
    #[inline]
    pub fn state_dim(&self) -> usize {
        self.f.nrows()
    }

    /// Measurement dimension m.
    #[inline]
    pub fn measurement_dim(&self) -> usize {
        self.h.nrows()
    }

    /// Current state estimate as a slice of length n.
    #[inline]
    pub fn state(&self) -> &[T] {
        self.x.as_slice()
    }

    /// Current state covariance (n×n).
    #[inline]
    pub fn covariance(&self) -> &DynMatrix<T> {
        &self.p
    }

    /// Innovation from the most recent successful update.
    #[inline]
    pub fn last_innovation(&self) -> Option<&DynInnovation<T>> {
        self.last.as_ref()
    }

    /// Discard the current belief and start again from `(x0, p0)`.
    pub fn reset(&mut self, x0: DynMatrix<T>, p0: DynMatrix<T>) -> Result<(), EstimateError> {
        let n = self.state_dim();
        check_shape("x0", &x0, (n, 1))?;
        check_shape("P0", &p0, (n, n))?;
        self.x = x0;
        self.p = p0;
        self.last = None;
        Ok(())
    }

    fn check_measurement(&self, z: &[T]) -> Result<(), DimensionMismatch> {
        let m = self.measurement_dim();
        if z.len() != m {
            return Err(DimensionMismatch {
                expected: (m, 1),
                got: (z.len(), 1),
            });
        }
        Ok(())
    }

    /// Project the belief one step forward: `x = F·x`, `P = F·P·Fᵀ + Q`.
    pub fn predict(&mut self) {
        self.x = self.f.mul_unchecked(&self.x);
        self.p = self
            .f
            .mul_unchecked(&self.p)
            .mul_unchecked(&self.f.transpose())
            .add_unchecked(&self.q);

        #[cfg(feature = "tracing")]
        tracing::trace!(state = ?self.x.as_slice(), "kalman predict");
    }

    /// Correct the belief with measurement `z` (length m).
    ///
    /// Fails with [`EstimateError::DimensionMismatch`] if `z` has the wrong
    /// length and [`EstimateError::SingularInnovation`] if `S` cannot be
    /// inverted. On failure the belief is unchanged.
    pub fn update(&mut self, z: &[T]) -> Result<&DynInnovation<T>, EstimateError> {
        self.check_measurement(z)?;

        let z = DynMatrix::from_column(z);
        let ht = self.h.transpose();
        let y = z.sub_unchecked(&self.h.mul_unchecked(&self.x));
        let s = self.h.mul_unchecked(&self.p).mul_unchecked(&ht).add_unchecked(&self.r);

        let s_inv = match s.inverse() {
            Ok(s_inv) => s_inv,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(innovation_covariance = ?s.as_slice(), "rejecting measurement, singular innovation covariance");
                return Err(e.into());
            }
        };
        let k = self.p.mul_unchecked(&ht).mul_unchecked(&s_inv);

        let n = self.state_dim();
        let i_kh = DynMatrix::eye(n).sub_unchecked(&k.mul_unchecked(&self.h));
        let mut p = match self.form {
            CovarianceUpdate::Simple => i_kh.mul_unchecked(&self.p),
            CovarianceUpdate::Joseph => i_kh
                .mul_unchecked(&self.p)
                .mul_unchecked(&i_kh.transpose())
                .add_unchecked(&k.mul_unchecked(&self.r).mul_unchecked(&k.transpose())),
        };
        if self.symmetrize {
            let half = T::one() / (T::one() + T::one());
            p = p.add_unchecked(&p.transpose()).scale(half);
        }

        self.x = self.x.add_unchecked(&k.mul_unchecked(&y));
        self.p = p;

        #[cfg(feature = "tracing")]
        tracing::trace!(residual = ?y.as_slice(), state = ?self.x.as_slice(), "kalman update");

        Ok(self.last.insert(DynInnovation {
            residual: y,
            covariance: s,
            s_inv,
        }))
    }

    /// One full cycle: [`predict`](Self::predict) then [`update`](Self::update).
    ///
    /// A wrongly sized `z` is rejected before the prediction is applied.
    pub fn step(&mut self, z: &[T]) -> Result<&DynInnovation<T>, EstimateError> {
        self.check_measurement(z)?;
        self.predict();
        self.update(z)
    }
}
