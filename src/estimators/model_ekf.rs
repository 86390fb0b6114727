#![allow(non_snake_case)]

//! Extended Kalman filter with an explicit model.
//!
//! Transition Fx, process noise Q, observation matrix Hx and the diagonal observation noise R are fixed when the filter is built.
//!
//! Prediction transforms only the covariance, X = Fx.X.Fx' + Q. The state vector is corrected by observations alone, which is
//! exact for the usual identity transition.

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use crate::matrix::{MatrixView, Structured};
use crate::models::{Dimensioned, Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearPredictModel, Predictor};
use crate::noise::{CorrelatedNoise, UncorrelatedNoise};

/// Extended Kalman filter of n states observed by m observations with a fixed model.
///
/// Built with `ModelEkf::new(m, n, r)` and refined with the `with_` setters. Defaults: Fx = I, Q = 0,
/// Hx the m by n rectangular identity, X = I.
#[derive(Clone, Debug)]
pub struct ModelEkf<N: RealField> {
    m: usize,
    n: usize,
    state: KalmanState<N>,
    pred: LinearPredictModel<N>,
    pred_noise: CorrelatedNoise<N>,
    obs: LinearObserveModel<N>,
    obs_noise: CorrelatedNoise<N>,
}

impl<N: RealField> ModelEkf<N> {
    /// A filter with observation noise variances `r`, one per observation.
    pub fn new(m: usize, n: usize, r: DVector<N>) -> ModelEkf<N> {
        assert_eq!(r.len(), m, "Observation noise must have one variance per observation.");

        ModelEkf {
            m,
            n,
            state: KalmanState::new_structured(&Structured::identity(n)),
            pred: LinearPredictModel {
                Fx: Structured::identity(n),
            },
            pred_noise: CorrelatedNoise::zero(n),
            obs: LinearObserveModel {
                Hx: Structured::rectangular_identity(m, n),
            },
            obs_noise: CorrelatedNoise::from_uncorrelated(&UncorrelatedNoise { q: r }),
        }
    }

    /// State transition Fx, n by n.
    pub fn with_transition<F: Into<Structured<N>>>(mut self, Fx: F) -> Self {
        let Fx = Fx.into();
        assert!(Fx.nrows() == self.n && Fx.ncols() == self.n, "Transition must be n by n.");
        self.pred = LinearPredictModel { Fx };
        self
    }

    /// Process noise covariance Q, n by n.
    pub fn with_process_noise(mut self, noise: CorrelatedNoise<N>) -> Self {
        assert!(
            noise.Q.nrows() == self.n && noise.Q.ncols() == self.n,
            "Process noise must be n by n."
        );
        self.pred_noise = noise;
        self
    }

    /// Observation matrix Hx, m by n.
    pub fn with_observation<H: Into<Structured<N>>>(mut self, Hx: H) -> Self {
        let Hx = Hx.into();
        assert!(Hx.nrows() == self.m && Hx.ncols() == self.n, "Observation must be m by n.");
        self.obs = LinearObserveModel { Hx };
        self
    }

    /// Initial covariance as a diagonal of variances, one per state.
    pub fn with_covariance_diagonal(mut self, variances: DVector<N>) -> Self {
        assert_eq!(variances.len(), self.n, "Covariance must have one variance per state.");
        self.state.X = Structured::diagonal(variances).to_dense();
        self
    }

    pub fn transition(&self) -> &LinearPredictModel<N> {
        &self.pred
    }

    pub fn process_noise(&self) -> &CorrelatedNoise<N> {
        &self.pred_noise
    }

    pub fn observation(&self) -> &LinearObserveModel<N> {
        &self.obs
    }

    pub fn observation_noise(&self) -> &CorrelatedNoise<N> {
        &self.obs_noise
    }

    /// Observe z where hx is the observation function evaluated at the current x.
    ///
    /// The state is only modified on success.
    ///
    /// Return: reciprocal condition number of the innovation covariance
    pub fn observe(&mut self, z: &DVector<N>, hx: &DVector<N>) -> Result<N, &'static str> {
        if z.len() != self.m {
            return Err("z dimension mismatch in observe");
        }
        let (rcond, observed) = self.state.observed(z, &self.obs.Hx, hx, &self.obs_noise.Q)?;
        self.state = observed;

        Ok(rcond)
    }

    /// Observe z, see [`observe`](ModelEkf::observe).
    ///
    /// Return: true if the observation was accepted, false if the innovation covariance could not be inverted
    pub fn update(&mut self, z: &DVector<N>, hx: &DVector<N>) -> bool {
        match self.observe(z, hx) {
            Ok(rcond) => {
                log::trace!("update accepted, S rcond {:?}", rcond);
                true
            }
            Err(err) => {
                log::debug!("update rejected: {}", err);
                false
            }
        }
    }
}

impl<N: RealField> Predictor for ModelEkf<N> {
    fn predict(&mut self) {
        log::trace!("predict {} states", self.n);
        self.state.X = self.state.predicted_covariance(&self.pred.Fx, &self.pred_noise.Q);
    }
}

impl<N: RealField> Dimensioned<N> for ModelEkf<N> {
    fn n(&self) -> usize {
        self.n
    }

    fn m(&self) -> usize {
        self.m
    }

    fn x(&self) -> &DVector<N> {
        &self.state.x
    }

    fn covariance(&self) -> &DMatrix<N> {
        &self.state.X
    }
}

impl<N: RealField> Estimator<N> for ModelEkf<N> {
    fn state(&self) -> Result<DVector<N>, &'static str> {
        Ok(self.state.x.clone())
    }
}

impl<N: RealField> KalmanEstimator<N> for ModelEkf<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N, &'static str> {
        let rcond = state.check(self.n)?;
        self.state = state.clone();

        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N>), &'static str> {
        Ok((N::one(), self.state.clone()))
    }
}
