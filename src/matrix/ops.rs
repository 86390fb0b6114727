//! Algebra over [`MatrixView`]s.
//!
//! Each routine is written once against the view contract and produces a dense nalgebra result.
//! Zero elements of the left operand are skipped in products, so products with structured views cost
//! little more than copying the other operand.
//!
//! Operand shapes must agree, a mismatch is a programming error and panics.

use na::{DMatrix, DVector, RealField};
use nalgebra as na;

use super::structured::{MatrixView, Transpose};

/// Materialise any view as a dense matrix.
pub fn to_dense<N: RealField, A: MatrixView<N> + ?Sized>(a: &A) -> DMatrix<N> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a.at(i, j))
}

/// Computes `c += alpha * a * b`.
pub fn scaled_accumulate<N, A, B>(c: &mut DMatrix<N>, alpha: N, a: &A, b: &B)
where
    N: RealField,
    A: MatrixView<N> + ?Sized,
    B: MatrixView<N> + ?Sized,
{
    assert_eq!(a.ncols(), b.nrows(), "Matrix product with mismatched inner dimensions.");
    assert!(
        c.nrows() == a.nrows() && c.ncols() == b.ncols(),
        "Matrix product accumulated into a matrix of the wrong shape."
    );

    for i in 0..a.nrows() {
        for k in 0..a.ncols() {
            let aik = a.at(i, k);
            if aik == N::zero() {
                continue;
            }
            let t = alpha * aik;
            for j in 0..b.ncols() {
                c[(i, j)] += t * b.at(k, j);
            }
        }
    }
}

/// Computes the product `a * b`.
pub fn multiply<N, A, B>(a: &A, b: &B) -> DMatrix<N>
where
    N: RealField,
    A: MatrixView<N> + ?Sized,
    B: MatrixView<N> + ?Sized,
{
    let mut c = DMatrix::zeros(a.nrows(), b.ncols());
    scaled_accumulate(&mut c, N::one(), a, b);
    c
}

/// Computes the sum `a + b`.
pub fn add<N, A, B>(a: &A, b: &B) -> DMatrix<N>
where
    N: RealField,
    A: MatrixView<N> + ?Sized,
    B: MatrixView<N> + ?Sized,
{
    assert!(
        a.nrows() == b.nrows() && a.ncols() == b.ncols(),
        "Matrix sum with mismatched shapes."
    );
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a.at(i, j) + b.at(i, j))
}

/// Computes the difference `a - b`.
pub fn sub<N, A, B>(a: &A, b: &B) -> DMatrix<N>
where
    N: RealField,
    A: MatrixView<N> + ?Sized,
    B: MatrixView<N> + ?Sized,
{
    assert!(
        a.nrows() == b.nrows() && a.ncols() == b.ncols(),
        "Matrix difference with mismatched shapes."
    );
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a.at(i, j) - b.at(i, j))
}

/// Computes the matrix vector product `a * v`.
pub fn mul_vec<N, A>(a: &A, v: &DVector<N>) -> DVector<N>
where
    N: RealField,
    A: MatrixView<N> + ?Sized,
{
    assert_eq!(a.ncols(), v.len(), "Matrix vector product with mismatched dimensions.");

    DVector::from_fn(a.nrows(), |i, _| {
        let mut sum = N::zero();
        for k in 0..a.ncols() {
            sum += a.at(i, k) * v[k];
        }
        sum
    })
}

/// Computes the quadratic form `lhs * mid * lhs.transpose()`.
pub fn quadform_tr<N, L, M>(lhs: &L, mid: &M) -> DMatrix<N>
where
    N: RealField,
    L: MatrixView<N> + ?Sized,
    M: MatrixView<N> + ?Sized,
{
    let lm = multiply(lhs, mid);
    multiply(&lm, &Transpose(lhs))
}

/// True if `a` is square and symmetric within the absolute tolerance `tol`.
pub fn is_symmetric<N: RealField, A: MatrixView<N> + ?Sized>(a: &A, tol: N) -> bool {
    if a.nrows() != a.ncols() {
        return false;
    }
    for i in 0..a.nrows() {
        for j in i + 1..a.ncols() {
            if (a.at(i, j) - a.at(j, i)).abs() > tol {
                return false;
            }
        }
    }
    true
}
