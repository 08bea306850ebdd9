use std::sync::Arc;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Bounded-concurrency executor the dispatcher fans work units out to.
pub trait WorkerPool: Send + Sync {
    /// Queues `job` for execution. May run it inline.
    fn execute(&self, job: Job);

    /// Drops every queued job that has not started yet. Jobs already running
    /// are unaffected.
    fn clear(&self);
}

impl<P: WorkerPool + ?Sized> WorkerPool for Arc<P> {
    fn execute(&self, job: Job) {
        (**self).execute(job);
    }

    fn clear(&self) {
        (**self).clear();
    }
}
