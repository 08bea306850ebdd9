use crate::core::ports::worker_pool::{Job, WorkerPool};

/// Runs every job synchronously on the submitting thread.
///
/// Nothing is ever queued, so [`WorkerPool::clear`] has nothing to drop. Useful
/// for deterministic runs and single-threaded hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineWorkerPool;

impl WorkerPool for InlineWorkerPool {
    fn execute(&self, job: Job) {
        job();
    }

    fn clear(&self) {}
}
