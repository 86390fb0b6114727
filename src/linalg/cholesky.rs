#![allow(non_snake_case)]

//! Cholesky factorisation and inversion of symmetric positive definite matrices.
//!
//! LL' factorisation of a positive definite matrix. Where:
//! L is lower triangular
//!
//! Storage:
//! LP format of the LL' factor
//! strict_lower_triangle(LP) = strict_lower_triangle(L), diagonal(L) = p held in a separate pivot vector,
//! upper_triangle(LP) is the unmodified upper triangle of the original matrix.
//!
//! The inverse is reconstructed as inv(A) = inv(L)' inv(L). Only its upper triangle is computed, the lower triangle is
//! mirrored from it.
//!
//! Reference: TinyEKF choldc1, choldcsl and cholsl.

use na::storage::Storage;
use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, RealField, VectorN, U1};
use nalgebra as na;

use super::rcond;

pub struct LLt<N: RealField> {
    pub zero: N,
    pub one: N,
}

impl<N: RealField> LLt<N> {
    pub fn new() -> LLt<N> {
        LLt {
            zero: N::zero(),
            one: N::one(),
        }
    }

    /// In place lower triangular Cholesky factor of a Positive definite matrix M.
    ///
    /// Column by column: sum = M(i,j) - sum_k<i L(i,k) L(j,k) for each row j >= i.
    /// The diagonal sum must be strictly positive, its square root is the pivot p(i).
    ///
    /// Input: M, Strict lower triangle of M is ignored in computation
    ///
    /// Output: M, p as LP format
    ///
    /// Return: Err if a pivot is not positive (including NaN), M and p are then only partially factorised
    pub fn LLtfactor<R: Dim, C: Dim>(&self, M: &mut MatrixMN<N, R, C>, p: &mut VectorN<N, R>) -> Result<(), &'static str>
    where
        DefaultAllocator: Allocator<N, R, C> + Allocator<N, R>,
    {
        let n = M.nrows();
        assert_eq!(n, M.ncols());
        assert_eq!(n, p.nrows());

        for i in 0..n {
            for j in i..n {
                let mut sum = M[(i, j)];
                for k in (0..i).rev() {
                    sum -= M[(i, k)] * M[(j, k)];
                }

                if i == j {
                    // IEC 559 NaN values are never positive
                    if !(sum > self.zero) {
                        return Err("not PD in LLtfactor");
                    }
                    p[i] = sum.sqrt();
                } else {
                    M[(j, i)] = sum / p[i];
                }
            }
        }

        Ok(())
    }

    /// In-place (destructive) inversion of the lower triangular factor in LP format.
    ///
    /// Forward substitution: inv(L)(i,i) = 1/p(i), inv(L)(j,i) = -sum_i<=k<j L(j,k) inv(L)(k,i) / p(j)
    ///
    /// Output: lower_triangle(M) = inv(L), upper triangle is unmodified
    pub fn LTinverse<R: Dim, C: Dim>(&self, M: &mut MatrixMN<N, R, C>, p: &VectorN<N, R>)
    where
        DefaultAllocator: Allocator<N, R, C> + Allocator<N, R>,
    {
        let n = M.nrows();
        assert_eq!(n, M.ncols());

        for i in 0..n {
            M[(i, i)] = self.one / p[i];
            for j in i + 1..n {
                let mut sum = self.zero;
                for k in i..j {
                    sum -= M[(j, k)] * M[(k, i)];
                }
                M[(j, i)] = sum / p[j];
            }
        }
    }

    /// In-place recomposition of the symmetric inverse from inv(L) stored in the lower triangle.
    ///
    /// M(i,j) = sum_k>=max(i,j) inv(L)(k,i) inv(L)(k,j), computed for the upper triangle only.
    /// M(i,j) for i<=j only depends on lower triangle elements with k >= j, which are not yet overwritten.
    ///
    /// Output: M - inv(L)' inv(L) (symmetric)
    pub fn LTLrecompose<R: Dim, C: Dim>(&self, M: &mut MatrixMN<N, R, C>)
    where
        DefaultAllocator: Allocator<N, R, C>,
    {
        let n = M.nrows();
        assert_eq!(n, M.ncols());

        self.Uzero(M);

        for i in 0..n {
            let mut mii = M[(i, i)] * M[(i, i)];
            for k in i + 1..n {
                let mki = M[(k, i)];
                mii += mki * mki;
            }
            M[(i, i)] = mii;

            for j in i + 1..n {
                let mut mij = M[(i, j)];
                for k in j..n {
                    mij += M[(k, i)] * M[(k, j)];
                }
                M[(i, j)] = mij;
            }
        }

        // Mirror the upper triangle
        for i in 0..n {
            for j in 0..i {
                M[(i, j)] = M[(j, i)];
            }
        }
    }

    /// Zero strict upper triangle of Matrix.
    pub fn Uzero<R: Dim, C: Dim>(&self, M: &mut MatrixMN<N, R, C>)
    where
        DefaultAllocator: Allocator<N, R, C>,
    {
        let n = M.nrows();
        assert_eq!(n, M.ncols());
        for i in 0..n {
            for j in i + 1..n {
                M[(i, j)] = self.zero;
            }
        }
    }

    /// Inverse of Positive Definite matrix.
    ///
    /// Input: M is a symmetric matrix
    ///
    /// Output: M inverse of M, only valid if Ok is returned. Otherwise M is partially factorised
    ///
    /// Return: reciprocal condition number of M
    pub fn inverse_PD<R: Dim, C: Dim>(&self, M: &mut MatrixMN<N, R, C>) -> Result<N, &'static str>
    where
        DefaultAllocator: Allocator<N, R, C> + Allocator<N, R>,
    {
        if M.nrows() != M.ncols() {
            return Err("not square in inverse_PD");
        }

        let mut p = VectorN::zeros_generic(M.data.shape().0, U1);
        self.LLtfactor(M, &mut p)?;

        let rcond = rcond::rcond_vec(&p);
        self.LTinverse(M, &p);
        self.LTLrecompose(M);

        // Square to get rcond of original matrix
        Ok(rcond * rcond)
    }

    /// Inverse of Positive Definite matrix A into a.
    ///
    /// A is unmodified. The content of a is unspecified if Err is returned.
    ///
    /// Return: reciprocal condition number of A, Err if shapes mismatch or A is not PD
    pub fn invert<R: Dim, C: Dim>(&self, A: &MatrixMN<N, R, C>, a: &mut MatrixMN<N, R, C>) -> Result<N, &'static str>
    where
        DefaultAllocator: Allocator<N, R, C> + Allocator<N, R>,
    {
        if A.nrows() != A.ncols() || a.nrows() != a.ncols() || A.nrows() != a.nrows() {
            return Err("shape mismatch in invert");
        }

        a.copy_from(A);
        self.inverse_PD(a)
    }
}

impl<N: RealField> Default for LLt<N> {
    fn default() -> Self {
        LLt::new()
    }
}
