#![allow(non_snake_case)]

//! Covariance state estimation.
//!
//! The predict and observe kernels shared by the extended Kalman filters.
//! They operate on a Kalman state representation [`KalmanState`], the x,X pair the dimensions of both are the dimensions of the system.
//!
//! Kernels never modify the state they are given. They compute the candidate state into fresh values which an estimator
//! commits with a single assignment, so a failed observation leaves the estimator exactly as it was.
//!
//! [`KalmanState`]: ../../models/struct.KalmanState.html

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use crate::linalg::{cholesky, rcond};
use crate::matrix::{self, check_non_negativ, MatrixView, Structured, Transpose};
use crate::models::KalmanState;

impl<N: RealField> KalmanState<N> {
    /// A zero state with zero covariance.
    pub fn new_zero(n: usize) -> KalmanState<N> {
        KalmanState {
            x: DVector::zeros(n),
            X: DMatrix::zeros(n, n),
        }
    }

    /// A zero state with the covariance materialised from a structured view.
    pub fn new_structured(X: &Structured<N>) -> KalmanState<N> {
        KalmanState {
            x: DVector::zeros(X.nrows()),
            X: X.to_dense(),
        }
    }

    pub fn dim(&self) -> usize {
        self.x.len()
    }

    /// Check the state is acceptable to an estimator of dimension `n`.
    ///
    /// Return: reciprocal condition number of X
    pub fn check(&self, n: usize) -> Result<N, &'static str> {
        if self.x.len() != n || self.X.nrows() != n || self.X.ncols() != n {
            return Err("x,X dimension mismatch");
        }
        // Tolerances relative to the largest variance
        let scale = (0..n).fold(N::zero(), |s, i| s.max(self.X[(i, i)].abs()));
        let tol = scale * na::convert::<f64, N>(1e-9);
        if !matrix::is_symmetric(&self.X, tol) {
            return Err("X not symmetric");
        }
        let rcond = check_non_negativ(rcond::rcond_symetric(&self.X), "X not PSD")?;
        if scale > N::zero() {
            // Factorise with a small diagonal floor so singular PSD matrices pass
            let mut floored = self.X.clone();
            for i in 0..n {
                floored[(i, i)] += tol;
            }
            cholesky::LLt::new().inverse_PD(&mut floored).map_err(|_| "X not PSD")?;
        }
        Ok(rcond)
    }

    /// Predicted covariance.
    ///
    /// X = Fx.X.Fx' + Q, the state itself is not transformed.
    pub fn predicted_covariance<FM, QM>(&self, Fx: &FM, Q: &QM) -> DMatrix<N>
    where
        FM: MatrixView<N> + ?Sized,
        QM: MatrixView<N> + ?Sized,
    {
        let FXFt = matrix::quadform_tr(Fx, &self.X);
        matrix::add(&FXFt, Q)
    }

    /// The state after an observation.
    ///
    /// z is the observation, hx the observation function evaluated at x by the caller, Hx its linearisation and R the
    /// observation noise. Self is not modified.
    ///
    /// Return: reciprocal condition number of the innovation covariance and the observed state,
    ///  Err if dimensions mismatch or the innovation covariance is not PD
    pub fn observed<HM, RM>(
        &self,
        z: &DVector<N>,
        Hx: &HM,
        hx: &DVector<N>,
        R: &RM,
    ) -> Result<(N, KalmanState<N>), &'static str>
    where
        HM: MatrixView<N> + ?Sized,
        RM: MatrixView<N> + ?Sized,
    {
        let n = self.dim();
        let m = z.len();
        if Hx.nrows() != m || Hx.ncols() != n {
            return Err("Hx dimension mismatch in observe");
        }
        if hx.len() != m {
            return Err("hx dimension mismatch in observe");
        }
        if R.nrows() != m || R.ncols() != m {
            return Err("R dimension mismatch in observe");
        }

        let XHt = matrix::multiply(&self.X, &Transpose(Hx));
        // S = Hx.X.Hx' + R
        let mut S = matrix::multiply(Hx, &XHt);
        S = matrix::add(&S, R);

        // Inverse innovation covariance
        let mut SI = DMatrix::zeros(m, m);
        let rcond = cholesky::LLt::new()
            .invert(&S, &mut SI)
            .map_err(|_| "S not PD in observe")?;

        // Kalman gain, X*Hx'*SI
        let W = matrix::multiply(&XHt, &SI);

        // State update, x + W.(z - hx)
        let s = z - hx;
        let x = &self.x + matrix::mul_vec(&W, &s);

        // X = (I - W.Hx).X, I - W.Hx formed from -I without a dense identity
        let mut IWH = Structured::negative_identity(n).to_dense();
        matrix::scaled_accumulate(&mut IWH, N::one(), &W, Hx);
        IWH *= -N::one();
        let X = matrix::multiply(&IWH, &self.X);

        Ok((rcond, KalmanState { x, X }))
    }
}
