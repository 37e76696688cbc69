//! Scoped parallel execution context.

use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// How to build an [`ExecutionSpace`].
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Worker count; `None` lets rayon decide (honours `RAYON_NUM_THREADS`).
    pub num_threads: Option<usize>,
    pub thread_name_prefix: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "matprod-worker".to_string(),
        }
    }
}

impl ExecutionConfig {
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
            ..Self::default()
        }
    }
}

/// Owns the worker pool that every parallel-for of a run executes on.
///
/// Build one before allocating matrices and drop it after they are gone;
/// [`crate::harness::run`] nests the lifetimes that way.
pub struct ExecutionSpace {
    pool: ThreadPool,
}

impl ExecutionSpace {
    pub fn new(config: &ExecutionConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let mut builder = ThreadPoolBuilder::new().thread_name(move |i| format!("{}-{}", prefix, i));
        if let Some(n) = config.num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;

        info!(
            "execution space initialized with {} threads",
            pool.current_num_threads()
        );
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn concurrency(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `f` with this space's pool as the current rayon pool.
    ///
    /// Parallel iterators started inside `f` are joined before `install`
    /// returns.
    pub fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.pool.install(f)
    }

    /// Full barrier: returns once every worker has drained the work it was
    /// given before the call.
    pub fn fence(&self) {
        self.pool.broadcast(|_| ());
    }
}

impl Drop for ExecutionSpace {
    fn drop(&mut self) {
        info!("execution space finalized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_requested_thread_count() {
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(3)).unwrap();
        assert_eq!(space.concurrency(), 3);
    }

    #[test]
    fn test_install_runs_on_own_pool() {
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(2)).unwrap();
        let name = space.install(|| std::thread::current().name().map(str::to_string));
        assert!(name.unwrap().starts_with("matprod-worker-"));
        assert_eq!(space.install(rayon::current_num_threads), 2);
    }

    #[test]
    fn test_fence_after_parallel_for() {
        let space = ExecutionSpace::new(&ExecutionConfig::with_threads(4)).unwrap();
        let counter = AtomicUsize::new(0);
        space.install(|| {
            (0..1000).into_par_iter().for_each(|_| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
        });
        space.fence();
        assert_eq!(counter.load(Ordering::Relaxed), 1000);
    }
}
