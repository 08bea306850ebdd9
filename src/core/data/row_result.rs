use crate::core::data::generation_request::GenerationFingerprint;

/// Iteration counts of one completed output row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub fingerprint: GenerationFingerprint,
    pub row_index: u32,
    pub iteration_counts: Vec<u32>,
}
