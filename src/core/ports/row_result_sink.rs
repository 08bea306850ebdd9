use crate::core::data::row_result::RowResult;

/// Delivery capability handed to each work unit. Called from worker threads.
pub trait RowResultSink: Send + Sync {
    fn accept(&self, result: RowResult);
}
