//! Extended Kalman filter estimators.

pub mod covariance;
pub mod ekf;
pub mod model_ekf;
