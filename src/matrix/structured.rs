//! Structured matrices.
//!
//! Zero, identity, constant diagonal and diagonal matrices are fully determined by a rule.
//! Their storage is independent of their logical size and resizing them never touches element storage.

use na::storage::Storage;
use na::{DMatrix, DVector, Dim, Matrix, RealField, Scalar};
use nalgebra as na;

/// The epsilon added to the diagonal of covariances to keep them away from exact singularity.
pub const EPS: f64 = 1e-4;

/// Uniform read access to a matrix: logical size and element at (i,j).
pub trait MatrixView<N> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    /// Element at row i column j.
    fn at(&self, i: usize, j: usize) -> N;
}

impl<N: RealField, R: Dim, C: Dim, S: Storage<N, R, C>> MatrixView<N> for Matrix<N, R, C, S> {
    fn nrows(&self) -> usize {
        self.data.shape().0.value()
    }

    fn ncols(&self) -> usize {
        self.data.shape().1.value()
    }

    fn at(&self, i: usize, j: usize) -> N {
        self[(i, j)]
    }
}

/// A matrix represented by its structure.
///
/// Only `Dense` holds per element storage. `Diagonal` holds one value per diagonal element, the other variants hold none.
/// Rectangular shapes are allowed, the diagonal is where i == j.
#[derive(Clone, Debug, PartialEq)]
pub enum Structured<N: Scalar> {
    Dense(DMatrix<N>),
    Zero { rows: usize, cols: usize },
    Identity { rows: usize, cols: usize },
    /// The same value on every diagonal element.
    FixedDiagonal { value: N, rows: usize, cols: usize },
    /// Per index values on the diagonal.
    ///
    /// The logical size is independent of the number of values, diagonal elements without a value are zero.
    Diagonal { values: DVector<N>, rows: usize, cols: usize },
}

impl<N: RealField> Structured<N> {
    pub fn dense(m: DMatrix<N>) -> Self {
        Structured::Dense(m)
    }

    pub fn zero(rows: usize, cols: usize) -> Self {
        Structured::Zero { rows, cols }
    }

    pub fn identity(n: usize) -> Self {
        Structured::Identity { rows: n, cols: n }
    }

    pub fn rectangular_identity(rows: usize, cols: usize) -> Self {
        Structured::Identity { rows, cols }
    }

    pub fn fixed_diagonal(value: N, n: usize) -> Self {
        Structured::FixedDiagonal { value, rows: n, cols: n }
    }

    /// Diagonal of [`EPS`].
    pub fn epsilon(n: usize) -> Self {
        Structured::fixed_diagonal(na::convert(EPS), n)
    }

    /// Diagonal of -1, the negated identity.
    pub fn negative_identity(n: usize) -> Self {
        Structured::fixed_diagonal(-N::one(), n)
    }

    pub fn diagonal(values: DVector<N>) -> Self {
        let n = values.len();
        Structured::Diagonal { values, rows: n, cols: n }
    }

    /// Change the logical size.
    ///
    /// Structured variants only change their size, `Diagonal` keeps its values as they are.
    /// A `Dense` matrix is reallocated with new elements set to zero.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) {
        match self {
            Structured::Dense(m) => {
                let old = std::mem::replace(m, DMatrix::zeros(0, 0));
                *m = old.resize(new_rows, new_cols, N::zero());
            }
            Structured::Zero { rows, cols }
            | Structured::Identity { rows, cols }
            | Structured::FixedDiagonal { rows, cols, .. }
            | Structured::Diagonal { rows, cols, .. } => {
                *rows = new_rows;
                *cols = new_cols;
            }
        }
    }

    /// Materialise as a dense matrix.
    pub fn to_dense(&self) -> DMatrix<N> {
        match self {
            Structured::Dense(m) => m.clone(),
            _ => DMatrix::from_fn(self.nrows(), self.ncols(), |i, j| self.at(i, j)),
        }
    }

    /// Lazy transpose.
    pub fn transpose(&self) -> Transpose<'_, Self> {
        Transpose(self)
    }
}

impl<N: RealField> MatrixView<N> for Structured<N> {
    fn nrows(&self) -> usize {
        match self {
            Structured::Dense(m) => m.nrows(),
            Structured::Zero { rows, .. }
            | Structured::Identity { rows, .. }
            | Structured::FixedDiagonal { rows, .. }
            | Structured::Diagonal { rows, .. } => *rows,
        }
    }

    fn ncols(&self) -> usize {
        match self {
            Structured::Dense(m) => m.ncols(),
            Structured::Zero { cols, .. }
            | Structured::Identity { cols, .. }
            | Structured::FixedDiagonal { cols, .. }
            | Structured::Diagonal { cols, .. } => *cols,
        }
    }

    fn at(&self, i: usize, j: usize) -> N {
        match self {
            Structured::Dense(m) => m[(i, j)],
            Structured::Zero { .. } => N::zero(),
            Structured::Identity { .. } => {
                if i == j {
                    N::one()
                } else {
                    N::zero()
                }
            }
            Structured::FixedDiagonal { value, .. } => {
                if i == j {
                    *value
                } else {
                    N::zero()
                }
            }
            Structured::Diagonal { values, .. } => {
                if i == j && i < values.len() {
                    values[i]
                } else {
                    N::zero()
                }
            }
        }
    }
}

impl<N: RealField> From<DMatrix<N>> for Structured<N> {
    fn from(m: DMatrix<N>) -> Self {
        Structured::Dense(m)
    }
}

/// Transposed view of another view. Nothing is copied.
pub struct Transpose<'a, V: ?Sized>(pub &'a V);

impl<'a, N, V: MatrixView<N> + ?Sized> MatrixView<N> for Transpose<'a, V> {
    fn nrows(&self) -> usize {
        self.0.ncols()
    }

    fn ncols(&self) -> usize {
        self.0.nrows()
    }

    fn at(&self, i: usize, j: usize) -> N {
        self.0.at(j, i)
    }
}
