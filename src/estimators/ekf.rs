#![allow(non_snake_case)]

//! Extended Kalman filter with an identity transition.
//!
//! The state is constant apart from observation corrections. Prediction adds a tiny fixed noise floor [`EPS`] to the covariance
//! diagonal, observation noise is the same floor. The linearised observation matrix is supplied with every observation.
//!
//! [`EPS`]: ../../matrix/constant.EPS.html

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use crate::matrix::{MatrixView, Structured};
use crate::models::{Dimensioned, Estimator, KalmanEstimator, KalmanState, Predictor};

/// Extended Kalman filter of n states observed by m observations.
///
/// Starts with x zero and X identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Ekf<N: RealField> {
    m: usize,
    n: usize,
    state: KalmanState<N>,
}

impl<N: RealField> Ekf<N> {
    pub fn new(m: usize, n: usize) -> Ekf<N> {
        Ekf {
            m,
            n,
            state: KalmanState::new_structured(&Structured::identity(n)),
        }
    }

    /// Observe z where hx is the observation function evaluated at the current x and Hx its linearisation.
    ///
    /// The state is only modified on success.
    ///
    /// Return: reciprocal condition number of the innovation covariance
    pub fn observe<HM: MatrixView<N> + ?Sized>(
        &mut self,
        z: &DVector<N>,
        Hx: &HM,
        hx: &DVector<N>,
    ) -> Result<N, &'static str> {
        if z.len() != self.m {
            return Err("z dimension mismatch in observe");
        }
        let (rcond, observed) = self.state.observed(z, Hx, hx, &Structured::epsilon(self.m))?;
        self.state = observed;

        Ok(rcond)
    }

    /// Observe z, see [`observe`](Ekf::observe).
    ///
    /// Return: true if the observation was accepted, false if the innovation covariance could not be inverted
    pub fn update<HM: MatrixView<N> + ?Sized>(&mut self, z: &DVector<N>, Hx: &HM, hx: &DVector<N>) -> bool {
        match self.observe(z, Hx, hx) {
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

impl<N: RealField> Predictor for Ekf<N> {
    /// X = X + EPS.I
    fn predict(&mut self) {
        log::trace!("predict {} states", self.n);
        let Fx = Structured::identity(self.n);
        self.state.X = self.state.predicted_covariance(&Fx, &Structured::epsilon(self.n));
    }
}

impl<N: RealField> Dimensioned<N> for Ekf<N> {
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

impl<N: RealField> Estimator<N> for Ekf<N> {
    fn state(&self) -> Result<DVector<N>, &'static str> {
        Ok(self.state.x.clone())
    }
}

impl<N: RealField> KalmanEstimator<N> for Ekf<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N, &'static str> {
        let rcond = state.check(self.n)?;
        self.state = state.clone();

        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N>), &'static str> {
        Ok((N::one(), self.state.clone()))
    }
}
