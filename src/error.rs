//! Error types for matrix product runs.

use thiserror::Error;

/// Result type for matprod operations
pub type Result<T> = std::result::Result<T, MatprodError>;

/// Errors that can occur while setting up or running a benchmark
#[derive(Debug, Error)]
pub enum MatprodError {
    /// Operand extents don't line up for C = A * B
    #[error("shape mismatch: {lhs} = {lhs_extent} but {rhs} = {rhs_extent}")]
    ShapeMismatch {
        lhs: &'static str,
        lhs_extent: usize,
        rhs: &'static str,
        rhs_extent: usize,
    },

    /// Checked access outside [0, rows) x [0, cols)
    #[error("{name}: index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        name: String,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Matrix buffer could not be obtained
    #[error("{name}: cannot allocate {rows}x{cols} matrix")]
    Allocation {
        name: String,
        rows: usize,
        cols: usize,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{op}: {msg}")]
    InvalidArgument { op: &'static str, msg: String },
}
