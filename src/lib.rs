//! Dense matrix product throughput probe.
//!
//! One kernel, timed: `C(i,j) *= beta + sum_k alpha * A(i,k) * B(k,j)`,
//! run row-parallel on a rayon pool. What varies is the memory layout of
//! `A` and `B` (row-major "Right" or column-major "Left"), which is a type
//! parameter of the matrix, so the same kernel source walks every layout
//! combination.
//!
//! ## Usage
//!
//! ```
//! use matprod::{DenseMatrix, ColMajor, RowMajor, matrix_product};
//!
//! let a = DenseMatrix::<RowMajor>::from_fn("A", 2, 2, |i, j| (2 * i + j + 1) as f64).unwrap();
//! let b = DenseMatrix::<ColMajor>::from_fn("B", 2, 2, |i, j| (2 * i + j + 5) as f64).unwrap();
//! let mut c = DenseMatrix::<RowMajor>::from_fn("C", 2, 2, |_, _| 1.0).unwrap();
//!
//! matrix_product(1.0, &a, &b, 0.0, &mut c);
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! The full benchmark (seeded init, fences, timing) lives in [`harness`]:
//!
//! ```
//! use matprod::{BenchConfig, ExecutionConfig, run};
//!
//! let m = run(&BenchConfig::new(64, 64, 64), &ExecutionConfig::default()).unwrap();
//! println!("{m}");
//! ```
//!
//! ## What's inside
//!
//! - `DenseMatrix<L>` with `RowMajor` / `ColMajor` layouts
//! - Counter-based random init, reproducible for any thread count
//! - Row-parallel kernel
//! - Fenced timing, thread sweeps, CSV output

pub mod error;
pub mod harness;
pub mod init;
pub mod kernels;
pub mod matrix;
pub mod threaded;

pub use error::{MatprodError, Result};
pub use harness::{BenchConfig, Measurement, Problem, run, run_once};
pub use init::{RandomStream, fill};
pub use kernels::{matrix_product, try_matrix_product};
pub use matrix::{ColMajor, DenseMatrix, Layout, LayoutKind, RowMajor};
pub use threaded::{ExecutionConfig, ExecutionSpace};
