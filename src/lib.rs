//! EKF+Estimate the extended Kalman filter library.
//! Copyright (c) 2020 Michael Stevens
//!
//! An Extended Kalman Filter fuses noisy, periodic observations of a system into a smoothed estimate of a small hidden state vector.
//! The estimate is the x,X pair: the state vector and its covariance. Each cycle the covariance is predicted forward and then
//! corrected by an observation. The observation function and its linearisation are supplied by the caller each cycle.
//!
//! The innovation covariance is inverted with a Cholesky factorisation. This is the single point at which an estimator can fail,
//! a failed observation leaves the estimate unchanged.
//!
//! Matrices fully determined by a rule (zero, identity, constant diagonal and diagonal) are represented by [`matrix::Structured`] views
//! so the recursion never materialises them as dense matrices. Dense algebra is provided by nalgebra.
//!
//! Two estimators are provided:
//! [`estimators::ekf::Ekf`] with an identity transition, a tiny fixed process noise floor and an observation matrix supplied each cycle;
//! [`estimators::model_ekf::ModelEkf`] with transition, process noise, observation matrix and diagonal observation noise fixed at construction.
//!
//! # Licensing
//!
//! All Bayes++ source code files are copyright with the license conditions as given here. The copyright notice is that of the MIT license.
//!  This in no way restricts any commercial use you may wish to make using our source code.
//!  As long as you respect the copyright and license conditions, Michael Stevens is happy to for you to use it in any way you wish.
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
//! including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
//! and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
//! WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub mod models;
pub mod noise;
pub mod matrix;
pub mod linalg;
pub mod estimators;
