#![allow(non_snake_case)]

//! Extended Kalman filter models.
//!
//! The state representation is modeled as a struct.
//! Common estimation operations are defined as traits.

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use crate::matrix::Structured;

/// Kalman State.
///
/// Linear representation as a state vector and the state covariance (symmetric positive semi-definite) matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct KalmanState<N: RealField> {
    /// State vector
    pub x: DVector<N>,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: DMatrix<N>,
}

/// A state estimator.
///
pub trait Estimator<N: RealField> {
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<DVector<N>, &'static str>;
}

/// A Kalman filter (estimator).
///
/// The linear Kalman state representation x,X is used to represent the system.
pub trait KalmanEstimator<N: RealField>: Estimator<N> {
    /// Initialise the estimator with a KalmanState.
    fn init(&mut self, state: &KalmanState<N>) -> Result<N, &'static str>;

    /// The estimator's estimate of the system's KalmanState.
    fn kalman_state(&self) -> Result<(N, KalmanState<N>), &'static str>;
}

/// An estimator with fixed state and observation dimensions.
pub trait Dimensioned<N: RealField> {
    /// State dimension.
    fn n(&self) -> usize;
    /// Observation dimension.
    fn m(&self) -> usize;
    /// State vector.
    fn x(&self) -> &DVector<N>;
    /// A single state element.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    fn x_at(&self, i: usize) -> &N {
        &self.x()[i]
    }
    /// State covariance.
    fn covariance(&self) -> &DMatrix<N>;
}

/// A predictor.
///
/// Prediction grows the covariance and cannot fail.
pub trait Predictor {
    fn predict(&mut self);
}

/// Linear prediction model.
///
/// Prediction is represented by a state transition matrix.
#[derive(Clone, Debug)]
pub struct LinearPredictModel<N: RealField> {
    /// State tramsition matrix
    pub Fx: Structured<N>,
}

/// Linear observation model.
///
/// Observation is represented by an observation matrix, the linearisation of the observation function.
#[derive(Clone, Debug)]
pub struct LinearObserveModel<N: RealField> {
    /// Observation matrix
    pub Hx: Structured<N>,
}
