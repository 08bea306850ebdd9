use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, trace};

use crate::controllers::dispatcher::batch::{Batch, BatchSink};
use crate::controllers::dispatcher::batcher::Batcher;
use crate::controllers::dispatcher::config::{DispatcherConfig, DispatcherConfigError};
use crate::controllers::dispatcher::generation::Generation;
use crate::core::actions::compute_row::WorkUnit;
use crate::core::data::generation_request::GenerationRequest;
use crate::core::data::row_result::RowResult;
use crate::core::ports::row_result_sink::RowResultSink;
use crate::core::ports::worker_pool::WorkerPool;

struct DispatchState {
    next_id: u64,
    current: Option<Generation>,
    batcher: Batcher,
}

/// Everything work units reach through their result capability. One mutex
/// serializes result handling against supersession.
struct DispatchShared {
    state: Mutex<DispatchState>,
    last_completed_generation: AtomicU64,
    sink: Box<dyn BatchSink>,
}

impl DispatchShared {
    fn lock_state(&self) -> MutexGuard<'_, DispatchState> {
        // Every critical section leaves the state consistent, so a batch sink
        // that panicked does not invalidate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RowResultSink for DispatchShared {
    fn accept(&self, result: RowResult) {
        let mut guard = self.lock_state();
        let DispatchState {
            current, batcher, ..
        } = &mut *guard;

        let Some(generation) = current.as_mut() else {
            trace!(row = result.row_index, "no current generation, dropping row");
            return;
        };

        if let Err(rejection) = generation.admit(&result) {
            trace!(row = result.row_index, ?rejection, "dropping row result");
            return;
        }

        let complete = generation.is_complete();

        // Published before delivery so a sink observing the completion batch
        // also observes the completed generation.
        if complete {
            info!(
                generation = generation.id(),
                rows = generation.height(),
                elapsed = ?generation.elapsed(),
                "generation complete"
            );
            self.last_completed_generation
                .store(generation.id(), Ordering::Release);
        }

        if let Some(rows) = batcher.push(result, complete) {
            self.sink.on_batch_ready(Batch {
                generation: generation.id(),
                rows,
                received_count: generation.received_count(),
                elapsed: complete.then(|| generation.elapsed()),
            });
        }
    }
}

/// Fans each generation out as one work unit per row and hands accepted rows
/// to a [`BatchSink`] in batches.
///
/// Submission is last-write-wins: a new generation supersedes the current one
/// immediately. Rows of a superseded generation are never delivered after the
/// submission that superseded it returns.
pub struct Dispatcher<P: WorkerPool> {
    pool: P,
    /// Held across a whole submission, enqueueing included, so a purge can never
    /// run between two units of the same generation being queued.
    submit: Mutex<()>,
    config: DispatcherConfig,
    shared: Arc<DispatchShared>,
}

impl<P: WorkerPool> Dispatcher<P> {
    pub fn new(
        pool: P,
        sink: impl BatchSink + 'static,
        config: DispatcherConfig,
    ) -> Result<Self, DispatcherConfigError> {
        config.validate()?;

        let shared = Arc::new(DispatchShared {
            state: Mutex::new(DispatchState {
                next_id: 0,
                current: None,
                batcher: Batcher::new(config.batch_threshold),
            }),
            last_completed_generation: AtomicU64::new(0),
            sink: Box::new(sink),
        });

        Ok(Self {
            pool,
            submit: Mutex::new(()),
            config,
            shared,
        })
    }

    /// Starts a new generation, superseding the current one.
    ///
    /// Returns the new generation id, or `None` if `request` covers no pixels,
    /// in which case nothing changes.
    pub fn submit_generation(&self, request: GenerationRequest) -> Option<u64> {
        if request.area_size.is_empty() {
            trace!(area_size = ?request.area_size, "ignoring empty area");
            return None;
        }

        let _submitting = self.lock_submit();
        let (id, units) = {
            let mut state = self.shared.lock_state();
            self.abandon_current(&mut state);

            state.next_id += 1;
            let generation =
                Generation::start(state.next_id, request, self.config.fingerprint_policy);
            let units = self.build_units(&generation);
            let id = generation.id();
            state.current = Some(generation);

            (id, units)
        };

        debug!(
            generation = id,
            width = request.area_size.width,
            height = request.area_size.height,
            "dispatching generation"
        );

        // Outside the state lock: an inline pool delivers results straight back.
        for unit in units {
            self.pool.execute(Box::new(move || unit.run()));
        }

        Some(id)
    }

    /// Abandons the current generation without starting another.
    pub fn cancel(&self) {
        let _submitting = self.lock_submit();
        let mut state = self.shared.lock_state();
        self.abandon_current(&mut state);
    }

    /// Id of the generation results are currently accepted for.
    #[must_use]
    pub fn current_generation(&self) -> Option<u64> {
        self.shared.lock_state().current.as_ref().map(Generation::id)
    }

    /// Id of the newest generation that delivered all its rows, or 0.
    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    #[must_use]
    pub fn pool(&self) -> &P {
        &self.pool
    }

    fn lock_submit(&self) -> MutexGuard<'_, ()> {
        self.submit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abandon_current(&self, state: &mut DispatchState) {
        if let Some(previous) = state.current.take() {
            previous.supersede();
            self.pool.clear();
            debug!(
                generation = previous.id(),
                received = previous.received_count(),
                pending = state.batcher.pending_len(),
                "superseded generation"
            );
        }
        state.batcher.clear();
    }

    fn build_units(&self, generation: &Generation) -> Vec<WorkUnit> {
        let sink: Arc<dyn RowResultSink> = self.shared.clone();

        (0..generation.height())
            .map(|row_index| {
                WorkUnit::new(
                    row_index,
                    *generation.request(),
                    generation.fingerprint(),
                    generation.abort_flag().clone(),
                    self.config.abort_poll_interval,
                    Arc::clone(&sink),
                )
            })
            .collect()
    }
}

impl<P: WorkerPool> Drop for Dispatcher<P> {
    fn drop(&mut self) {
        self.cancel();
    }
}
