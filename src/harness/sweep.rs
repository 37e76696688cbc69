//! Thread-count sweep with optional CSV logging.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use super::timing::Measurement;
use super::{BenchConfig, run};
use crate::error::{MatprodError, Result};
use crate::threaded::ExecutionConfig;

pub const CSV_HEADER: &str = "date,M,N,K,threads,time_s,gflops";

#[derive(Debug, Clone, Default)]
pub struct SweepConfig {
    pub min_threads: usize,
    /// Defaults to the available parallelism of the machine
    pub max_threads: Option<usize>,
    /// Append one row per thread count to this file
    pub csv: Option<PathBuf>,
}

pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Run the pipeline once per thread count in `[min_threads, max_threads]`.
///
/// Each step builds a fresh execution space of that size. Progress goes to
/// `out` as `threads, time[s], GFLOP/s` rows.
pub fn sweep(
    config: &BenchConfig,
    sweep_config: &SweepConfig,
    out: &mut impl Write,
) -> Result<Vec<Measurement>> {
    let min = sweep_config.min_threads.max(1);
    let max = sweep_config.max_threads.unwrap_or_else(available_threads);
    if max < min {
        return Err(MatprodError::InvalidArgument {
            op: "sweep",
            msg: format!("max threads {max} is below min threads {min}"),
        });
    }

    writeln!(
        out,
        "Benchmarking M={}, N={}, K={} (A={}, B={})",
        config.m, config.n, config.k, config.layout_a, config.layout_b
    )?;
    writeln!(out, "threads, time[s], GFLOP/s")?;

    let mut results = Vec::with_capacity(max - min + 1);
    for threads in min..=max {
        info!("sweep step: {} threads", threads);
        let measurement = run(config, &ExecutionConfig::with_threads(threads))?;
        writeln!(
            out,
            "{}, {:.6}, {:.3}",
            threads,
            measurement.seconds(),
            measurement.gflops()
        )?;
        results.push(measurement);
    }

    if let Some(path) = &sweep_config.csv {
        append_csv(path, &results)?;
    }
    Ok(results)
}

/// Append measurements to `path`, writing the header only for a new file.
pub fn append_csv(path: &Path, results: &[Measurement]) -> Result<()> {
    let first_write = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    if first_write {
        writeln!(writer, "{}", CSV_HEADER)?;
    }
    let date = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    for m in results {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            date,
            m.m,
            m.n,
            m.k,
            m.threads,
            m.seconds(),
            m.gflops()
        )?;
    }
    writer.flush()?;

    info!("appended {} rows to {}", results.len(), path.display());
    Ok(())
}
