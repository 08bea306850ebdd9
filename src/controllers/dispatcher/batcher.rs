use crate::core::data::row_result::RowResult;

/// Accumulates accepted rows and decides when they are flushed.
///
/// Flushes once `threshold` rows are pending, or when the row completing the
/// generation arrives. No timer: a partial batch of a superseded generation is
/// simply cleared.
#[derive(Debug)]
pub struct Batcher {
    threshold: usize,
    pending: Vec<RowResult>,
}

impl Batcher {
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            pending: Vec::with_capacity(threshold),
        }
    }

    /// Appends `row`, returning the rows to deliver if a flush is due.
    pub fn push(&mut self, row: RowResult, completes_generation: bool) -> Option<Vec<RowResult>> {
        self.pending.push(row);

        if self.pending.len() >= self.threshold || completes_generation {
            Some(std::mem::replace(
                &mut self.pending,
                Vec::with_capacity(self.threshold),
            ))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
