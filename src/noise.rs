#![allow(non_snake_case)]

//! Noise models.
//!
//! Additive noise models are represented as structs.

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use crate::matrix::Structured;

/// Additive noise.
///
/// Noise represented as a the noise variance vector.
#[derive(Clone, Debug, PartialEq)]
pub struct UncorrelatedNoise<N: RealField> {
    /// Noise variance
    pub q: DVector<N>,
}

/// Additive noise.
///
/// Noise represented as a the noise covariance matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelatedNoise<N: RealField> {
    /// Noise covariance
    pub Q: Structured<N>,
}

impl<N: RealField> UncorrelatedNoise<N> {
    /// The variances as a diagonal covariance, nothing is copied into a dense matrix.
    pub fn as_diagonal(&self) -> Structured<N> {
        Structured::diagonal(self.q.clone())
    }
}

impl<N: RealField> CorrelatedNoise<N> {
    /// No noise.
    pub fn zero(d: usize) -> Self {
        CorrelatedNoise { Q: Structured::zero(d, d) }
    }

    /// A covariance from a dense matrix.
    pub fn from_dense(Q: DMatrix<N>) -> Self {
        CorrelatedNoise { Q: Structured::dense(Q) }
    }

    /// Creates a CorrelatedNoise from an UncorrelatedNoise.
    pub fn from_uncorrelated(uncorrelated: &UncorrelatedNoise<N>) -> Self {
        CorrelatedNoise { Q: uncorrelated.as_diagonal() }
    }
}
