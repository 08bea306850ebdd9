//! Parallel escape-time row engine.
//!
//! A [`Dispatcher`] turns each [`GenerationRequest`] into one work unit per
//! output row, runs them on a [`WorkerPool`], fences off results of superseded
//! requests and delivers accepted rows to a [`BatchSink`] in batches.

mod controllers;
mod core;
mod pools;
mod storage;

pub use controllers::dispatcher::generation::Rejection;
pub use controllers::dispatcher::{
    Batch, BatchSink, Dispatcher, DispatcherConfig, DispatcherConfigError,
};
pub use crate::core::actions::cancellation::{AbortFlag, CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::compute_row::{WorkUnit, compute_row};
pub use crate::core::actions::escape_time::{escape_time, evaluate_pixel, pixel_to_plane};
pub use crate::core::data::area_size::AreaSize;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::generation_request::{
    FingerprintPolicy, GenerationFingerprint, GenerationRequest,
};
pub use crate::core::data::move_offset::MoveOffset;
pub use crate::core::data::row_result::RowResult;
pub use crate::core::ports::row_result_sink::RowResultSink;
pub use crate::core::ports::worker_pool::{Job, WorkerPool};
pub use pools::{InlineWorkerPool, RayonWorkerPool, WorkerPoolError};
pub use storage::write_pgm::write_pgm;
