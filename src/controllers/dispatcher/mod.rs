//! Generation dispatch: fan-out, fencing and batched delivery of row results.

pub mod batch;
pub mod batcher;
pub mod config;
mod dispatcher;
pub mod generation;

pub use batch::{Batch, BatchSink};
pub use config::{DispatcherConfig, DispatcherConfigError};
pub use dispatcher::Dispatcher;
