use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, RealField, VectorN};

/**
 * Numerical comparison of reciprocal condition numbers
 *  Required for all linear algebra in models and filters
 */

/* Estimate the reciprocal condition number of a Diagonal Matrix for inversion.
 * D represents a diagonal matrix, the parameter is actually passed as a vector
 *
 * The Condition Number is defined from a matrix norm.
 *  Choose max element of D as the norm of the original matrix.
 *  Assume this norm for inverse matrix is min element D.
 *  Therefore rcond = min/max
 *
 * Note:
 *  Defined to be 0 for semi-definite and 0 for an empty matrix
 *  Defined to be 0 for max and min infinite
 *  Defined to be <0 for negative matrix (D element a value  < 0)
 *  Defined to be <0 with any NaN element
 *
 *  By definition rcond <= 1 as min<=max
 */
pub fn rcond_vec<N: RealField, R: Dim>(dv: &VectorN<N, R>) -> N
where
    DefaultAllocator: Allocator<N, R>,
{
    rcond_elements((0..dv.nrows()).map(|i| dv[i]))
}

/* Estimate the reciprocal condition number of a symmetric matrix from its diagonal.
 * Used as a cheap check of a covariance before it is accepted by an estimator.
 */
pub fn rcond_symetric<N: RealField, R: Dim, C: Dim>(sm: &MatrixMN<N, R, C>) -> N
where
    DefaultAllocator: Allocator<N, R, C>,
{
    let n = sm.nrows().min(sm.ncols());
    rcond_elements((0..n).map(|i| sm[(i, i)]))
}

fn rcond_elements<N: RealField, I: Iterator<Item = N>>(mut elements: I) -> N {
    // Special case an empty matrix
    let first = match elements.next() {
        Some(d) => d,
        None => return N::zero(),
    };
    if first != first {
        // NaN
        return -N::one();
    }

    let mut mind = first;
    let mut maxd = first;
    for d in elements {
        if d != d {
            // NaN
            mind = -N::one();
            break;
        }
        if d < mind {
            mind = d;
        }
        if d > maxd {
            maxd = d;
        }
    }

    rcond_min_max(mind, maxd)
}

fn rcond_min_max<N: RealField>(mind: N, maxd: N) -> N {
    if mind < N::zero() {
        // matrix is negative
        mind // mind < 0 but does not represent a rcond
    } else {
        // ISSUE mind may still be -0, this is progated into rcond
        let rcond = mind / maxd; // rcond from min/max norm
        if rcond != rcond {
            // NaN, singular due to (mind == maxd) == (zero or infinity)
            N::zero()
        } else {
            rcond
        }
    }
}
