//! Benchmark pipeline: allocate, seed, fill, time the kernel.
//!
//! The draw order is fixed: `alpha`, fill `A`, fill `B`, `beta`, fill `C`.
//! With a fixed seed that order makes `C` reproducible bit for bit.

pub mod sweep;
pub mod timing;

use std::time::Duration;

use log::info;

use crate::error::{MatprodError, Result};
use crate::init::{DEFAULT_SEED, RandomStream, fill};
use crate::matrix::{DenseMatrix, Layout, LayoutKind, LayoutLeft, LayoutRight, RowMajor};
use crate::threaded::{ExecutionConfig, ExecutionSpace};
pub use sweep::{SweepConfig, append_csv, sweep};
pub use timing::{Measurement, run_once};

/// Problem size, operand layouts and seed for one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Rows of A and C
    pub m: usize,
    /// Columns of B and C
    pub n: usize,
    /// Columns of A, rows of B
    pub k: usize,
    pub layout_a: LayoutKind,
    pub layout_b: LayoutKind,
    pub seed: u64,
}

impl BenchConfig {
    /// A row-major, B column-major, seed 42.
    pub fn new(m: usize, n: usize, k: usize) -> Self {
        Self {
            m,
            n,
            k,
            layout_a: LayoutKind::Right,
            layout_b: LayoutKind::Left,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_layouts(mut self, layout_a: LayoutKind, layout_b: LayoutKind) -> Self {
        self.layout_a = layout_a;
        self.layout_b = layout_b;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, extent) in [("M", self.m), ("N", self.n), ("K", self.k)] {
            if extent == 0 {
                return Err(MatprodError::InvalidArgument {
                    op: "bench_config",
                    msg: format!("{name} must be a positive integer"),
                });
            }
        }
        Ok(())
    }
}

/// Operands of one run. `C` is always row-major.
#[derive(Debug)]
pub struct Problem<LA: Layout, LB: Layout> {
    pub alpha: f64,
    pub beta: f64,
    pub a: DenseMatrix<LA>,
    pub b: DenseMatrix<LB>,
    pub c: DenseMatrix<RowMajor>,
}

impl<LA: Layout, LB: Layout> Problem<LA, LB> {
    /// Allocate A (m×k), B (k×n), C (m×n) and initialise them from `stream`.
    pub fn new(space: &ExecutionSpace, config: &BenchConfig, stream: &mut RandomStream) -> Result<Self> {
        let mut a = DenseMatrix::<LA>::new("A", config.m, config.k)?;
        let mut b = DenseMatrix::<LB>::new("B", config.k, config.n)?;
        let mut c = DenseMatrix::<RowMajor>::new("C", config.m, config.n)?;

        let alpha = stream.next_scalar();
        space.install(|| {
            fill(stream, &mut a);
            fill(stream, &mut b);
        });
        let beta = stream.next_scalar();
        space.install(|| fill(stream, &mut c));

        Ok(Self { alpha, beta, a, b, c })
    }

    /// Fenced, timed kernel call on this problem's operands.
    pub fn run_once(&mut self, space: &ExecutionSpace) -> Duration {
        run_once(space, self.alpha, &self.a, &self.b, self.beta, &mut self.c)
    }
}

/// Run the full pipeline once, with the operand layouts named in `config`.
///
/// The random stream is seeded before the execution space exists, and the
/// matrices are dropped before the space is torn down.
pub fn run(config: &BenchConfig, exec: &ExecutionConfig) -> Result<Measurement> {
    config.validate()?;
    match (config.layout_a, config.layout_b) {
        (LayoutKind::Right, LayoutKind::Right) => run_with::<LayoutRight, LayoutRight>(config, exec),
        (LayoutKind::Right, LayoutKind::Left) => run_with::<LayoutRight, LayoutLeft>(config, exec),
        (LayoutKind::Left, LayoutKind::Right) => run_with::<LayoutLeft, LayoutRight>(config, exec),
        (LayoutKind::Left, LayoutKind::Left) => run_with::<LayoutLeft, LayoutLeft>(config, exec),
    }
}

fn run_with<LA: Layout, LB: Layout>(config: &BenchConfig, exec: &ExecutionConfig) -> Result<Measurement> {
    let mut stream = RandomStream::new(config.seed);
    let space = ExecutionSpace::new(exec)?;

    let measurement = {
        let mut problem = Problem::<LA, LB>::new(&space, config, &mut stream)?;
        let elapsed = problem.run_once(&space);
        Measurement {
            m: config.m,
            n: config.n,
            k: config.k,
            threads: space.concurrency(),
            elapsed,
        }
    };

    info!(
        "M={} N={} K={} A={} B={} threads={}: {:.6}s, {:.3} GFLOP/s",
        config.m,
        config.n,
        config.k,
        config.layout_a,
        config.layout_b,
        measurement.threads,
        measurement.seconds(),
        measurement.gflops()
    );

    drop(space);
    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ColMajor;

    fn solve<LA: Layout, LB: Layout>(config: &BenchConfig, threads: usize) -> Problem<LA, LB> {
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(threads)).unwrap();
        let mut stream = RandomStream::new(config.seed);
        let mut p = Problem::<LA, LB>::new(&space, config, &mut stream).unwrap();
        p.run_once(&space);
        p
    }

    #[test]
    fn test_draw_order() {
        let config = BenchConfig::new(3, 4, 5);
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(2)).unwrap();
        let mut stream = RandomStream::new(42);
        let p = Problem::<RowMajor, ColMajor>::new(&space, &config, &mut stream).unwrap();
        assert_eq!(stream.position(), 5);

        let mut replay = RandomStream::new(42);
        let alpha = replay.next_scalar();
        let mut a = DenseMatrix::<RowMajor>::new("A", 3, 5).unwrap();
        fill(&mut replay, &mut a);
        let mut b = DenseMatrix::<ColMajor>::new("B", 5, 4).unwrap();
        fill(&mut replay, &mut b);
        let beta = replay.next_scalar();

        assert_eq!(p.alpha.to_bits(), alpha.to_bits());
        assert_eq!(p.beta.to_bits(), beta.to_bits());
        assert_eq!(p.a, a);
        assert_eq!(p.b, b);
    }

    #[test]
    fn test_pipeline_is_reproducible_across_thread_counts() {
        let config = BenchConfig::new(17, 9, 23);
        let one = solve::<RowMajor, ColMajor>(&config, 1);
        let three = solve::<RowMajor, ColMajor>(&config, 3);
        let again = solve::<RowMajor, ColMajor>(&config, 3);

        assert_eq!(one.c.as_slice(), three.c.as_slice());
        assert_eq!(three.c.as_slice(), again.c.as_slice());
    }

    #[test]
    fn test_layouts_give_identical_results() {
        let config = BenchConfig::new(8, 6, 5);
        let rl = solve::<RowMajor, ColMajor>(&config, 2);
        let rr = solve::<RowMajor, RowMajor>(&config, 2);
        let lr = solve::<ColMajor, RowMajor>(&config, 2);
        let ll = solve::<ColMajor, ColMajor>(&config, 2);

        for other in [rr.c.as_slice(), lr.c.as_slice(), ll.c.as_slice()] {
            assert_eq!(rl.c.as_slice(), other);
        }
    }

    #[test]
    fn test_validate_rejects_zero_extent() {
        let err = BenchConfig::new(4, 0, 4).validate().unwrap_err();
        assert_eq!(err.to_string(), "bench_config: N must be a positive integer");
    }

    #[test]
    fn test_run_reports_shape_and_threads() {
        let config = BenchConfig::new(16, 8, 4).with_layouts(LayoutKind::Left, LayoutKind::Right);
        let m = run(&config, &ExecutionConfig::with_threads(2)).unwrap();
        assert_eq!((m.m, m.n, m.k, m.threads), (16, 8, 4, 2));
        assert!(m.to_string().starts_with("Time: "));
    }
}
