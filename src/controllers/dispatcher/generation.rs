use std::time::{Duration, Instant};

use crate::core::actions::cancellation::AbortFlag;
use crate::core::data::generation_request::{
    FingerprintPolicy, GenerationFingerprint, GenerationRequest,
};
use crate::core::data::row_result::RowResult;

/// Why a row result was not accepted by the fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Stale,
    Duplicate,
    OutOfRange,
}

/// The current generation: its request, fence fingerprint, abort flag and
/// progress.
#[derive(Debug)]
pub struct Generation {
    id: u64,
    request: GenerationRequest,
    fingerprint: GenerationFingerprint,
    abort: AbortFlag,
    received: Vec<bool>,
    received_count: u32,
    started: Instant,
}

impl Generation {
    #[must_use]
    pub fn start(id: u64, request: GenerationRequest, policy: FingerprintPolicy) -> Self {
        Self {
            id,
            request,
            fingerprint: request.fingerprint(policy),
            abort: AbortFlag::new(),
            received: vec![false; request.area_size.height as usize],
            received_count: 0,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    #[must_use]
    pub fn fingerprint(&self) -> GenerationFingerprint {
        self.fingerprint
    }

    #[must_use]
    pub fn abort_flag(&self) -> &AbortFlag {
        &self.abort
    }

    #[must_use]
    pub fn received_count(&self) -> u32 {
        self.received_count
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.request.area_size.height
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.received_count == self.height()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Raises the abort flag. Idempotent.
    pub fn supersede(&self) {
        self.abort.raise();
    }

    /// Accepts `result` if it carries this generation's fingerprint and a row
    /// not yet received.
    pub fn admit(&mut self, result: &RowResult) -> Result<(), Rejection> {
        if result.fingerprint != self.fingerprint {
            return Err(Rejection::Stale);
        }

        let Some(seen) = self.received.get_mut(result.row_index as usize) else {
            return Err(Rejection::OutOfRange);
        };
        if *seen {
            return Err(Rejection::Duplicate);
        }

        *seen = true;
        self.received_count += 1;

        Ok(())
    }
}
