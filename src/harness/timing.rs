//! Fenced timing of a single kernel invocation.

use std::fmt;
use std::time::{Duration, Instant};

use crate::kernels::matrix_product;
use crate::matrix::{DenseMatrix, Layout};
use crate::threaded::ExecutionSpace;

/// Time one `matrix_product` call.
///
/// Fences before taking the start timestamp, so pending fills are not
/// counted, and fences again before the end timestamp, so the kernel is
/// complete when the interval closes.
pub fn run_once<LA: Layout, LB: Layout, LC: Layout>(
    space: &ExecutionSpace,
    alpha: f64,
    a: &DenseMatrix<LA>,
    b: &DenseMatrix<LB>,
    beta: f64,
    c: &mut DenseMatrix<LC>,
) -> Duration {
    space.fence();
    let start = Instant::now();
    space.install(|| matrix_product(alpha, a, b, beta, c));
    space.fence();
    start.elapsed()
}

/// Result of one timed kernel run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub threads: usize,
    pub elapsed: Duration,
}

impl Measurement {
    /// One multiply and one add per inner-loop step.
    pub fn flops(&self) -> f64 {
        2.0 * self.m as f64 * self.n as f64 * self.k as f64
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Throughput, or 0.0 if the interval was too short to measure.
    pub fn gflops(&self) -> f64 {
        let secs = self.seconds();
        if secs > 0.0 {
            self.flops() / secs / 1e9
        } else {
            0.0
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time: {} ns", self.elapsed.as_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RowMajor;
    use crate::threaded::ExecutionConfig;

    #[test]
    fn test_run_once_completes_kernel() {
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(2)).unwrap();
        let a = DenseMatrix::<RowMajor>::from_fn("A", 4, 4, |i, j| (i == j) as u8 as f64).unwrap();
        let b = DenseMatrix::<RowMajor>::from_fn("B", 4, 4, |i, j| (i * 4 + j) as f64).unwrap();
        let mut c = DenseMatrix::<RowMajor>::from_fn("C", 4, 4, |_, _| 1.0).unwrap();

        run_once(&space, 1.0, &a, &b, 0.0, &mut c);

        assert_eq!(c.as_slice(), b.as_slice());
    }

    #[test]
    fn test_measurement_reporting() {
        let m = Measurement {
            m: 100,
            n: 200,
            k: 50,
            threads: 4,
            elapsed: Duration::from_millis(2),
        };
        assert_eq!(m.flops(), 2_000_000.0);
        assert!((m.gflops() - 1.0).abs() < 1e-12);
        assert_eq!(m.to_string(), "Time: 2000000 ns");
    }

    #[test]
    fn test_zero_duration_gflops() {
        let m = Measurement {
            m: 1,
            n: 1,
            k: 1,
            threads: 1,
            elapsed: Duration::ZERO,
        };
        assert_eq!(m.gflops(), 0.0);
    }
}
