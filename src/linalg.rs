//! Linear algebra for the estimators.
//!
//! The Cholesky based inversion of symmetric positive definite matrices and reciprocal condition number estimates.

pub mod cholesky;
pub mod rcond;
