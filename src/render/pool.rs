use std::sync::OnceLock;

use rayon::prelude::*;

use crate::foundation::error::{PetpetError, PetpetResult};

/// Fixed-size worker pool for per-frame scatter/join work.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

static SHARED: OnceLock<Result<WorkerPool, String>> = OnceLock::new();

impl WorkerPool {
    /// Build a pool with `threads` workers, or available parallelism when `None`.
    pub fn new(threads: Option<usize>) -> PetpetResult<Self> {
        if let Some(n) = threads
            && n == 0
        {
            return Err(PetpetError::configuration(
                "worker pool 'threads' must be >= 1 when set",
            ));
        }

        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("petpet-{i}"));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}"))?;
        Ok(Self { pool })
    }

    /// Process-wide pool, built on first use with default sizing.
    pub fn shared() -> PetpetResult<&'static WorkerPool> {
        SHARED
            .get_or_init(|| Self::new(None).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| PetpetError::Other(anyhow::anyhow!("shared worker pool unavailable: {e}")))
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `f` once per item inside the pool and wait for every task.
    ///
    /// Results keep input order. The first error (by input order) is returned after all tasks
    /// have finished.
    pub fn scatter_join<T, U, F>(&self, items: &[T], f: F) -> PetpetResult<Vec<U>>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> PetpetResult<U> + Sync,
    {
        let results = self
            .pool
            .install(|| items.par_iter().map(&f).collect::<Vec<_>>());
        results.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
