use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::core::data::row_result::RowResult;

/// A group of accepted rows delivered together.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub generation: u64,
    /// Rows in arrival order, not row order.
    pub rows: Vec<RowResult>,
    /// Rows accepted for the generation so far, including these.
    pub received_count: u32,
    /// Time since submission. Set only on the batch that completes the generation.
    pub elapsed: Option<Duration>,
}

impl Batch {
    #[must_use]
    pub fn completes_generation(&self) -> bool {
        self.elapsed.is_some()
    }
}

/// Receives batches from the dispatcher.
///
/// Called while the dispatcher's state is locked so batches never interleave
/// with a supersession. Implementations may read
/// `Dispatcher::last_completed_generation` but must not submit, cancel or
/// query the current generation.
pub trait BatchSink: Send + Sync {
    fn on_batch_ready(&self, batch: Batch);
}

impl<F> BatchSink for F
where
    F: Fn(Batch) + Send + Sync,
{
    fn on_batch_ready(&self, batch: Batch) {
        self(batch);
    }
}

impl BatchSink for Sender<Batch> {
    fn on_batch_ready(&self, batch: Batch) {
        // A dropped receiver means nobody is rendering anymore.
        let _ = self.send(batch);
    }
}
