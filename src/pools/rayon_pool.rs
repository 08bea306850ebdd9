use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::{error, trace};

use crate::core::ports::worker_pool::{Job, WorkerPool};

#[derive(Debug, Error)]
pub enum WorkerPoolError {
    #[error("worker pool needs at least one thread")]
    ZeroThreads,
    #[error("failed to build worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
}

/// Worker pool backed by a dedicated rayon thread pool.
///
/// rayon cannot remove spawned jobs from its queues, so [`WorkerPool::clear`]
/// advances a purge epoch instead. Every job records the epoch it was queued
/// under and returns without running if the epoch moved on before a worker
/// picked it up.
pub struct RayonWorkerPool {
    pool: rayon::ThreadPool,
    epoch: Arc<AtomicU64>,
}

impl RayonWorkerPool {
    /// `threads = None` sizes the pool to the host's available parallelism.
    pub fn new(threads: Option<usize>) -> Result<Self, WorkerPoolError> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(|index| format!("row-worker-{index}"))
            .panic_handler(log_job_panic);

        if let Some(threads) = threads {
            if threads == 0 {
                return Err(WorkerPoolError::ZeroThreads);
            }
            builder = builder.num_threads(threads);
        }

        Ok(Self {
            pool: builder.build()?,
            epoch: Arc::new(AtomicU64::new(0)),
        })
    }

    #[must_use]
    pub fn current_num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

// Without a handler rayon aborts the process when a spawned job panics.
fn log_job_panic(payload: Box<dyn Any + Send>) {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    error!(panic = message, "worker job panicked");
}

impl WorkerPool for RayonWorkerPool {
    fn execute(&self, job: Job) {
        let queued_at = self.epoch.load(Ordering::Acquire);
        let epoch = Arc::clone(&self.epoch);

        self.pool.spawn(move || {
            if epoch.load(Ordering::Acquire) != queued_at {
                trace!("skipping purged job");
                return;
            }
            job();
        });
    }

    fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}
