use std::sync::Arc;

use tracing::trace;

use crate::core::actions::cancellation::{AbortFlag, CancelToken, Cancelled};
use crate::core::actions::escape_time::evaluate_pixel;
use crate::core::data::generation_request::{GenerationFingerprint, GenerationRequest};
use crate::core::data::row_result::RowResult;
use crate::core::ports::row_result_sink::RowResultSink;

/// Computes the iteration counts of row `row_index`.
///
/// Polls `cancel` before the first pixel, every `poll_interval` pixels after
/// that, and once more after the last pixel. A cancelled row yields no partial
/// output.
pub fn compute_row<C: CancelToken + ?Sized>(
    row_index: u32,
    request: &GenerationRequest,
    cancel: &C,
    poll_interval: usize,
) -> Result<Vec<u32>, Cancelled> {
    let width = request.area_size.width;
    let poll_interval = poll_interval.max(1);
    let mut counts = Vec::with_capacity(width as usize);

    for (i, col) in (0..width).enumerate() {
        if i % poll_interval == 0 && cancel.is_cancelled() {
            return Err(Cancelled);
        }

        counts.push(evaluate_pixel(col, row_index, request));
    }

    if cancel.is_cancelled() {
        return Err(Cancelled);
    }

    Ok(counts)
}

/// One row of one generation, ready to be handed to a worker pool.
///
/// Holds a snapshot of the request and fingerprint taken at creation, the
/// generation's abort flag, and the sink to deliver into. Nothing points back
/// from the dispatcher into a live unit.
pub struct WorkUnit {
    row_index: u32,
    request: GenerationRequest,
    fingerprint: GenerationFingerprint,
    abort: AbortFlag,
    poll_interval: usize,
    sink: Arc<dyn RowResultSink>,
}

impl WorkUnit {
    #[must_use]
    pub fn new(
        row_index: u32,
        request: GenerationRequest,
        fingerprint: GenerationFingerprint,
        abort: AbortFlag,
        poll_interval: usize,
        sink: Arc<dyn RowResultSink>,
    ) -> Self {
        Self {
            row_index,
            request,
            fingerprint,
            abort,
            poll_interval,
            sink,
        }
    }

    /// Computes the row and emits exactly one result, or nothing if aborted.
    pub fn run(self) {
        match compute_row(self.row_index, &self.request, &self.abort, self.poll_interval) {
            Ok(iteration_counts) => self.sink.accept(RowResult {
                fingerprint: self.fingerprint,
                row_index: self.row_index,
                iteration_counts,
            }),
            Err(Cancelled) => trace!(row = self.row_index, "work unit aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::area_size::AreaSize;
    use crate::core::data::generation_request::FingerprintPolicy;
    use crate::core::data::move_offset::MoveOffset;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CollectingSink {
        results: Mutex<Vec<RowResult>>,
    }

    impl RowResultSink for CollectingSink {
        fn accept(&self, result: RowResult) {
            self.results.lock().unwrap().push(result);
        }
    }

    fn request(width: u32) -> GenerationRequest {
        GenerationRequest::new(AreaSize::new(width, 8), MoveOffset::default(), 0.05, 50)
    }

    #[test]
    fn test_row_has_one_count_per_column() {
        let counts = compute_row(3, &request(17), &NeverCancel, 1).unwrap();

        assert_eq!(counts.len(), 17);
    }

    #[test]
    fn test_row_matches_per_pixel_evaluation() {
        let req = request(12);

        let counts = compute_row(5, &req, &NeverCancel, 4).unwrap();
        let expected: Vec<u32> = (0..12).map(|col| evaluate_pixel(col, 5, &req)).collect();

        assert_eq!(counts, expected);
    }

    #[test]
    fn test_cancelled_before_start_yields_nothing() {
        let flag = AbortFlag::new();
        flag.raise();

        assert_eq!(compute_row(0, &request(10), &flag, 1), Err(Cancelled));
    }

    #[test]
    fn test_cancellation_observed_mid_row() {
        let polls = AtomicUsize::new(0);
        let cancel_after = 3;
        let token = || polls.fetch_add(1, Ordering::Relaxed) >= cancel_after;

        let result = compute_row(0, &request(100), &token, 1);

        assert_eq!(result, Err(Cancelled));
        assert_eq!(polls.load(Ordering::Relaxed), cancel_after + 1);
    }

    #[test]
    fn test_polls_every_pixel_plus_final_check_by_default() {
        let polls = AtomicUsize::new(0);
        let token = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };

        compute_row(0, &request(10), &token, 1).unwrap();

        assert_eq!(polls.load(Ordering::Relaxed), 11);
    }

    #[test]
    fn test_coarser_poll_interval_polls_less_often() {
        let polls = AtomicUsize::new(0);
        let token = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };

        // pixels 0, 4, 8 plus the final check
        compute_row(0, &request(10), &token, 4).unwrap();

        assert_eq!(polls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_work_unit_emits_snapshot_fingerprint() {
        let req = request(6);
        let fingerprint = req.fingerprint(FingerprintPolicy::View);
        let sink = Arc::new(CollectingSink::default());
        let unit = WorkUnit::new(2, req, fingerprint, AbortFlag::new(), 1, sink.clone());

        unit.run();

        let results = sink.results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].row_index, 2);
        assert_eq!(results[0].fingerprint, fingerprint);
        assert_eq!(results[0].iteration_counts.len(), 6);
    }

    #[test]
    fn test_aborted_work_unit_emits_nothing() {
        let req = request(6);
        let abort = AbortFlag::new();
        let sink = Arc::new(CollectingSink::default());
        let unit = WorkUnit::new(
            0,
            req,
            req.fingerprint(FingerprintPolicy::View),
            abort.clone(),
            1,
            sink.clone(),
        );

        abort.raise();
        unit.run();

        assert!(sink.results.lock().unwrap().is_empty());
    }
}
