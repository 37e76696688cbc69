//! Benchmark runner: `matprod <M> <N> <K>`.
//!
//! Prints `Time: <ns> ns` for one fenced kernel invocation. With `--sweep`
//! it repeats the run for each thread count and prints GFLOP/s per step.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use log::debug;
use matprod::harness::{SweepConfig, append_csv, sweep};
use matprod::{BenchConfig, ExecutionConfig, LayoutKind, run};

/// Exit status for usage errors (-1 on the platform's 8-bit status)
const USAGE_EXIT_CODE: i32 = 255;

/// Time one dense matrix product with configurable operand layouts
///
/// Computes C(i,j) *= beta + sum_k alpha * A(i,k) * B(k,j) with
/// A (M×K), B (K×N), C (M×N, row-major).
#[derive(Parser, Debug)]
#[command(name = "matprod")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rows of A and C
    #[arg(value_name = "M")]
    m: NonZeroUsize,

    /// Columns of B and C
    #[arg(value_name = "N")]
    n: NonZeroUsize,

    /// Columns of A, rows of B
    #[arg(value_name = "K")]
    k: NonZeroUsize,

    /// Layout of A: right (row-major) or left (column-major)
    #[arg(long, default_value = "right")]
    layout_a: LayoutKind,

    /// Layout of B: right (row-major) or left (column-major)
    #[arg(long, default_value = "left")]
    layout_b: LayoutKind,

    /// Worker threads (default: one per core, or RAYON_NUM_THREADS)
    #[arg(short, long)]
    threads: Option<NonZeroUsize>,

    /// Seed for alpha, beta and the matrix contents
    #[arg(long, default_value_t = matprod::init::DEFAULT_SEED)]
    seed: u64,

    /// Run once per thread count and report GFLOP/s
    #[arg(long)]
    sweep: bool,

    /// First thread count of a sweep
    #[arg(long, default_value_t = 1)]
    min_threads: usize,

    /// Last thread count of a sweep (default: available parallelism)
    #[arg(long)]
    max_threads: Option<usize>,

    /// Append results to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Extra positional arguments after K; accepted and ignored
    #[arg(value_name = "ARGS", hide = true)]
    ignored: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                println!("{}", usage());
                eprintln!("{err}");
                std::process::exit(USAGE_EXIT_CODE);
            }
        },
    };

    if let Err(err) = execute(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    let program = std::env::args().next().unwrap_or_else(|| "matprod".to_string());
    format!("Usage: {} <M> <N> <K> [OPTIONS]", program)
}

fn execute(cli: Cli) -> Result<()> {
    if !cli.ignored.is_empty() {
        debug!("ignoring extra arguments: {:?}", cli.ignored);
    }

    let config = BenchConfig::new(cli.m.get(), cli.n.get(), cli.k.get())
        .with_layouts(cli.layout_a, cli.layout_b)
        .with_seed(cli.seed);

    if cli.sweep {
        let sweep_config = SweepConfig {
            min_threads: cli.min_threads,
            max_threads: cli.max_threads.or(cli.threads.map(NonZeroUsize::get)),
            csv: cli.csv,
        };
        let mut out = std::io::stdout().lock();
        sweep(&config, &sweep_config, &mut out).context("thread sweep failed")?;
        return Ok(());
    }

    let exec = ExecutionConfig {
        num_threads: cli.threads.map(NonZeroUsize::get),
        ..ExecutionConfig::default()
    };
    let measurement = run(&config, &exec)
        .with_context(|| format!("benchmark M={} N={} K={} failed", config.m, config.n, config.k))?;
    println!("{measurement}");

    if let Some(path) = &cli.csv {
        append_csv(path, &[measurement])
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
