//! Matrix views and the algebra used by the estimators.
//!
//! [`MatrixView`] is the uniform (rows, columns, element-at) contract. Dense nalgebra matrices implement it directly,
//! [`Structured`] matrices compute their elements by rule.
//! The algebra in [`ops`] is written once against the view and always produces dense results.

use nalgebra::RealField;

pub mod ops;
mod structured;

pub use ops::{add, is_symmetric, mul_vec, multiply, quadform_tr, scaled_accumulate, sub, to_dense};
pub use structured::{MatrixView, Structured, Transpose, EPS};

/// Checks a the reciprocal condition number is >= 0 .
///
/// IEC 559 NaN values are never true
pub fn check_non_negativ<'a, N: RealField>(rcond: N, message: &'a str) -> Result<N, &'a str> {
    if rcond >= N::zero() {
        Ok(rcond)
    } else {
        Err(message)
    }
}
