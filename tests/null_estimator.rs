#![allow(non_snake_case)]

//! A 'null' implementation of an estimator with a Kalman state representation [`KalmanState`].
//!
//! No numerical computations are performed, the traits have implementations which keep the state as it was.
//! Generic code written against the traits is exercised with the null estimator and with the real filters.
//!
//! [`KalmanState`]: ../models/struct.KalmanState.html

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use ekf_estimate::estimators::ekf::Ekf;
use ekf_estimate::estimators::model_ekf::ModelEkf;
use ekf_estimate::models::{Dimensioned, Estimator, KalmanEstimator, KalmanState, Predictor};

pub struct NullState<N: RealField> {
    m: usize,
    state: KalmanState<N>,
}

impl<N: RealField> NullState<N> {
    pub fn new(m: usize, state: KalmanState<N>) -> NullState<N> {
        NullState { m, state }
    }
}

impl<N: RealField> Predictor for NullState<N> {
    fn predict(&mut self) {}
}

impl<N: RealField> Dimensioned<N> for NullState<N> {
    fn n(&self) -> usize {
        self.state.dim()
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

impl<N: RealField> Estimator<N> for NullState<N> {
    fn state(&self) -> Result<DVector<N>, &'static str> {
        Ok(self.state.x.clone())
    }
}

impl<N: RealField> KalmanEstimator<N> for NullState<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N, &'static str> {
        self.state = state.clone();
        Ok(N::one())
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N>), &'static str> {
        Ok((N::one(), self.state.clone()))
    }
}

/// Predict a few times and check the estimator's view of itself is consistent.
fn exercise<E: Predictor + Dimensioned<f64> + KalmanEstimator<f64>>(est: &mut E) {
    let init = KalmanState {
        x: DVector::from_element(est.n(), 1.5),
        X: DMatrix::identity(est.n(), est.n()) * 2.,
    };
    est.init(&init).unwrap();

    for _ in 0..3 {
        let trace = est.covariance().trace();
        est.predict();
        assert!(est.covariance().trace() >= trace);
        assert_eq!(est.state().unwrap(), init.x);
    }

    let (_, kalman) = est.kalman_state().unwrap();
    assert_eq!(&kalman.x, est.x());
    assert_eq!(&kalman.X, est.covariance());
    for i in 0..est.n() {
        assert_eq!(*est.x_at(i), 1.5);
    }
}

#[test]
fn test_null() {
    exercise(&mut NullState::new(1, KalmanState::new_zero(2)));
}

#[test]
fn test_filters() {
    exercise(&mut Ekf::new(3, 2));
    exercise(&mut ModelEkf::new(2, 3, DVector::from_vec(vec![0.1, 0.1])));
}
