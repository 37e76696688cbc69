//! Matrix initialisation from a seeded random stream.
//!
//! Fills run one rayon task per row. Each task builds its own generator
//! from `(seed, operation, row)`, so the result is the same for any
//! thread count and any schedule.

pub mod stream;

use log::debug;
use rand::Rng;
use rand::distributions::Standard;
use rayon::prelude::*;

use crate::matrix::{DenseMatrix, Layout};
use stream::sub_stream;
pub use stream::{DEFAULT_SEED, RandomStream};

/// Fill every element of `matrix` with an independent draw from `[0, 1)`.
///
/// Consumes one operation slot of `stream` even when the matrix is empty,
/// so later draws don't shift with matrix shape. Values are a function of
/// the logical `(i, j)` pair only; the layout of `matrix` doesn't change
/// what ends up at each position.
pub fn fill<L: Layout>(stream: &mut RandomStream, matrix: &mut DenseMatrix<L>) {
    let op = stream.advance();
    let seed = stream.seed();
    let cols = matrix.cols();

    debug!(
        "fill {} ({}x{}, {}) from stream {}",
        matrix.name(),
        matrix.rows(),
        cols,
        matrix.layout(),
        op
    );

    matrix.par_rows_mut().for_each(|mut row| {
        let mut rng = sub_stream(seed, op, row.index() * cols);
        for j in 0..row.len() {
            *row.get_mut(j) = rng.sample(Standard);
        }
    });
}
