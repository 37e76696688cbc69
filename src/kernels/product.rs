//! Row-parallel `C(i,j) *= beta + sum_k alpha * A(i,k) * B(k,j)`.

use log::debug;
use rayon::prelude::*;

use crate::error::{MatprodError, Result};
use crate::matrix::{DenseMatrix, Layout};

/// Verify `A.rows == C.rows`, `B.cols == C.cols` and `A.cols == B.rows`.
///
/// The returned error names the first mismatched pair.
pub fn check_shapes<LA: Layout, LB: Layout, LC: Layout>(
    a: &DenseMatrix<LA>,
    b: &DenseMatrix<LB>,
    c: &DenseMatrix<LC>,
) -> Result<()> {
    let pairs = [
        ("A.rows", a.rows(), "C.rows", c.rows()),
        ("B.cols", b.cols(), "C.cols", c.cols()),
        ("A.cols", a.cols(), "B.rows", b.rows()),
    ];

    for (lhs, lhs_extent, rhs, rhs_extent) in pairs {
        if lhs_extent != rhs_extent {
            return Err(MatprodError::ShapeMismatch {
                lhs,
                lhs_extent,
                rhs,
                rhs_extent,
            });
        }
    }
    Ok(())
}

/// Multiply-accumulate into `c`, returning shape errors instead of panicking.
///
/// For every row `i` (one rayon task each) and column `j`:
///
/// ```text
/// acc    = sum over k of alpha * A(i,k) * B(k,j)
/// C(i,j) = C(i,j) * (beta + acc)
/// ```
///
/// Note the update multiplies the existing `C(i,j)` by `beta + acc`; it is
/// not the textbook `alpha*A*B + beta*C`. Nothing is dispatched if the
/// shapes don't match.
///
/// Runs on the current rayon pool; wrap in [`ExecutionSpace::install`] to
/// pick the pool.
///
/// [`ExecutionSpace::install`]: crate::threaded::ExecutionSpace::install
pub fn try_matrix_product<LA: Layout, LB: Layout, LC: Layout>(
    alpha: f64,
    a: &DenseMatrix<LA>,
    b: &DenseMatrix<LB>,
    beta: f64,
    c: &mut DenseMatrix<LC>,
) -> Result<()> {
    check_shapes(a, b, c)?;

    debug!(
        "dgemm_kernel: A {}x{} ({}), B {}x{} ({}), C ({})",
        a.rows(),
        a.cols(),
        a.layout(),
        b.rows(),
        b.cols(),
        b.layout(),
        c.layout()
    );

    let inner = a.cols();
    c.par_rows_mut().for_each(|mut row| {
        let i = row.index();
        for j in 0..row.len() {
            let mut acc = 0.0;
            for k in 0..inner {
                acc += alpha * a.get(i, k) * b.get(k, j);
            }
            *row.get_mut(j) *= beta + acc;
        }
    });

    Ok(())
}

/// Same as [`try_matrix_product`], but a shape mismatch is fatal.
///
/// # Panics
///
/// Panics before any work is dispatched if `A.rows != C.rows`,
/// `B.cols != C.cols` or `A.cols != B.rows`.
pub fn matrix_product<LA: Layout, LB: Layout, LC: Layout>(
    alpha: f64,
    a: &DenseMatrix<LA>,
    b: &DenseMatrix<LB>,
    beta: f64,
    c: &mut DenseMatrix<LC>,
) {
    if let Err(err) = try_matrix_product(alpha, a, b, beta, c) {
        panic!("matrix_product: {err}");
    }
}
