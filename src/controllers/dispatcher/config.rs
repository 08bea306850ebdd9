use thiserror::Error;

use crate::core::actions::cancellation::DEFAULT_ABORT_POLL_INTERVAL_PIXELS;
use crate::core::data::generation_request::FingerprintPolicy;

pub const DEFAULT_BATCH_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatcherConfigError {
    #[error("batch threshold must be greater than zero")]
    ZeroBatchThreshold,
    #[error("abort poll interval must be greater than zero")]
    ZeroAbortPollInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Rows collected before a batch is delivered mid-generation.
    pub batch_threshold: usize,
    /// Pixels a work unit computes between two abort checks.
    pub abort_poll_interval: usize,
    pub fingerprint_policy: FingerprintPolicy,
}

impl DispatcherConfig {
    pub fn validate(&self) -> Result<(), DispatcherConfigError> {
        if self.batch_threshold == 0 {
            return Err(DispatcherConfigError::ZeroBatchThreshold);
        }
        if self.abort_poll_interval == 0 {
            return Err(DispatcherConfigError::ZeroAbortPollInterval);
        }

        Ok(())
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            batch_threshold: DEFAULT_BATCH_THRESHOLD,
            abort_poll_interval: DEFAULT_ABORT_POLL_INTERVAL_PIXELS,
            fingerprint_policy: FingerprintPolicy::View,
        }
    }
}
