//! Parallel runtime for the benchmark.
//!
//! All concurrency goes through one `ExecutionSpace`: a rayon pool built
//! at startup, used for the row-parallel fills and the kernel, and torn
//! down at the end of the run. Thread count comes from `ExecutionConfig`,
//! so the sweep can rebuild the space at each size.

pub mod space;

pub use space::{ExecutionConfig, ExecutionSpace};
