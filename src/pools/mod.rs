//! Worker pool adapters.

pub mod inline_pool;
pub mod rayon_pool;

pub use inline_pool::InlineWorkerPool;
pub use rayon_pool::{RayonWorkerPool, WorkerPoolError};
