//! Test the extended Kalman filter with identity transition.
//!
//! A humidity and temperature sensor pair: humidity is observed once, temperature is observed by two sensors.

use na::{DMatrix, DVector};
use nalgebra as na;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use ekf_estimate::estimators::ekf::Ekf;
use ekf_estimate::matrix::{self, EPS};
use ekf_estimate::models::{Dimensioned, Estimator, KalmanEstimator, KalmanState, Predictor};

const N: usize = 2;
const M: usize = 3;

fn observation_matrix() -> DMatrix<f64> {
    DMatrix::from_row_slice(M, N, &[
        1., 0.,
        0., 1.,
        0., 1.,
    ])
}

/// Observation function, the second state is seen twice.
fn hx(ekf: &Ekf<f64>) -> DVector<f64> {
    DVector::from_vec(vec![*ekf.x_at(0), *ekf.x_at(1), *ekf.x_at(1)])
}

fn predict_update(ekf: &mut Ekf<f64>, z: &[f64]) -> bool {
    ekf.predict();
    let hx = hx(ekf);
    ekf.update(&DVector::from_vec(z.to_vec()), &observation_matrix(), &hx)
}

#[test]
fn test_construct() {
    let ekf = Ekf::<f64>::new(M, N);
    assert_eq!(ekf.n(), N);
    assert_eq!(ekf.m(), M);
    assert_eq!(ekf.x(), &DVector::zeros(N));
    assert_eq!(ekf.covariance(), &DMatrix::identity(N, N));
    assert_eq!(ekf.state().unwrap(), DVector::zeros(N));
}

#[test]
fn test_two_cycles() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut ekf = Ekf::new(M, N);

    assert!(predict_update(&mut ekf, &[49.49, 22., 23.]));
    // Second state is pulled toward the mean of its two observations
    approx::assert_abs_diff_eq!(*ekf.x_at(0), 49.485052, epsilon = 1e-5);
    approx::assert_abs_diff_eq!(*ekf.x_at(1), 22.498875, epsilon = 1e-5);
    let first = ekf.covariance().clone();
    approx::assert_abs_diff_eq!(first[(0, 0)], 1e-4, epsilon = 1e-7);
    approx::assert_abs_diff_eq!(first[(1, 1)], 5e-5, epsilon = 1e-7);
    approx::assert_abs_diff_eq!(first[(0, 1)], 0., epsilon = 1e-12);

    assert!(predict_update(&mut ekf, &[49.59, 21., 24.]));
    approx::assert_abs_diff_eq!(*ekf.x_at(0), 49.555016, epsilon = 1e-4);
    approx::assert_abs_diff_eq!(*ekf.x_at(1), 22.4997, epsilon = 1e-3);
    let second = ekf.covariance();
    assert!(second[(0, 0)] < first[(0, 0)]);
    assert!(second[(1, 1)] < first[(1, 1)]);
    assert!(second.trace() < first.trace());
}

#[test]
fn test_predict_grows_covariance() {
    let mut ekf = Ekf::<f64>::new(M, N);
    let mut trace = ekf.covariance().trace();
    for _ in 0..10 {
        let before = ekf.covariance().clone();
        ekf.predict();
        let after = ekf.covariance();
        for i in 0..N {
            approx::assert_relative_eq!(after[(i, i)], before[(i, i)] + EPS, epsilon = 1e-12);
        }
        assert!(after.trace() >= trace);
        trace = after.trace();
    }
    // The state is not changed by prediction
    assert_eq!(ekf.x(), &DVector::zeros(N));
}

#[test]
fn test_covariance_stays_symmetric() {
    let mut rng: rand::rngs::StdRng = SeedableRng::seed_from_u64(3u64);
    let normal = Normal::new(0., 1.).unwrap();

    let n = 4;
    let m = 3;
    let mut ekf = Ekf::new(m, n);
    for _ in 0..50 {
        ekf.predict();
        assert!(matrix::is_symmetric(ekf.covariance(), 1e-9));

        let h = DMatrix::from_fn(m, n, |_, _| normal.sample(&mut rng));
        let z = DVector::from_fn(m, |_, _| 10. * normal.sample(&mut rng));
        let hx = &h * ekf.x();
        assert!(ekf.update(&z, &h, &hx));
        assert!(matrix::is_symmetric(ekf.covariance(), 1e-9));
    }
}

#[test]
fn test_failed_update_leaves_state() {
    let mut ekf = Ekf::new(M, N);
    assert!(predict_update(&mut ekf, &[49.49, 22., 23.]));
    ekf.predict();
    let before = ekf.clone();

    // A NaN in the linearisation makes the innovation covariance fail factorisation
    let mut h = observation_matrix();
    h[(1, 1)] = f64::NAN;
    let z = DVector::from_vec(vec![49.59, 21., 24.]);
    assert!(!ekf.update(&z, &h, &hx(&ekf)));
    assert_eq!(ekf.observe(&z, &h, &hx(&ekf)), Err("S not PD in observe"));
    assert_eq!(ekf, before);

    // Mismatched dimensions are rejected the same way
    assert!(!ekf.update(&DVector::zeros(2), &observation_matrix(), &hx(&ekf)));
    assert!(!ekf.update(&z, &DMatrix::zeros(M, 3), &hx(&ekf)));
    assert!(!ekf.update(&z, &observation_matrix(), &DVector::zeros(1)));
    assert_eq!(ekf, before);

    // And the filter carries on
    assert!(ekf.update(&z, &observation_matrix(), &hx(&ekf)));
}

#[test]
fn test_init_and_kalman_state() {
    let mut ekf = Ekf::<f64>::new(M, N);
    let state = KalmanState {
        x: DVector::from_vec(vec![50., 20.]),
        X: DMatrix::from_row_slice(2, 2, &[4., 1., 1., 2.]),
    };
    approx::assert_relative_eq!(ekf.init(&state).unwrap(), 0.5);

    let (_, snapshot) = ekf.kalman_state().unwrap();
    assert_eq!(snapshot, state);

    let not_symmetric = KalmanState {
        x: DVector::from_vec(vec![50., 20.]),
        X: DMatrix::from_row_slice(2, 2, &[4., 1., 0., 2.]),
    };
    assert_eq!(ekf.init(&not_symmetric), Err("X not symmetric"));
    assert_eq!(ekf.init(&KalmanState::new_zero(3)), Err("x,X dimension mismatch"));
    let negative = KalmanState {
        x: DVector::zeros(2),
        X: DMatrix::from_row_slice(2, 2, &[-1., 0., 0., 2.]),
    };
    assert_eq!(ekf.init(&negative), Err("X not PSD"));
    // Positive diagonal but indefinite
    let indefinite = KalmanState {
        x: DVector::zeros(2),
        X: DMatrix::from_row_slice(2, 2, &[1., 2., 2., 1.]),
    };
    assert_eq!(ekf.init(&indefinite), Err("X not PSD"));
    assert_eq!(ekf.kalman_state().unwrap().1, state);

    // Singular but PSD is accepted
    let singular = KalmanState {
        x: DVector::zeros(2),
        X: DMatrix::from_row_slice(2, 2, &[1., 1., 1., 1.]),
    };
    assert!(ekf.init(&singular).is_ok());
    assert_eq!(ekf.init(&KalmanState::new_zero(2)), Ok(0.));
}

#[test]
fn test_init_symmetry_relative_to_scale() {
    let mut ekf = Ekf::<f64>::new(M, N);
    // Asymmetry far above 1e-9 but small against the variances
    let large = KalmanState {
        x: DVector::zeros(2),
        X: DMatrix::from_row_slice(2, 2, &[1e8, 5., 5. + 1e-4, 1e8]),
    };
    assert!(ekf.init(&large).is_ok());
}

#[test]
#[should_panic]
fn test_x_at_out_of_range() {
    let ekf = Ekf::<f64>::new(M, N);
    ekf.x_at(N);
}
