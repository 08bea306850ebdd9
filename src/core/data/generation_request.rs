use crate::core::data::area_size::AreaSize;
use crate::core::data::move_offset::MoveOffset;

/// Which request parameters take part in the staleness check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FingerprintPolicy {
    /// Area size, offset and scale only. A change of `iteration_max` alone keeps
    /// in-flight rows from the previous depth acceptable.
    #[default]
    View,
    /// View parameters plus `iteration_max`, so a depth-only change also fences
    /// off earlier rows.
    ViewAndDepth,
}

/// Immutable snapshot of one render request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GenerationRequest {
    pub area_size: AreaSize,
    pub move_offset: MoveOffset,
    pub scale_factor: f64,
    pub iteration_max: u32,
}

impl GenerationRequest {
    #[must_use]
    pub const fn new(
        area_size: AreaSize,
        move_offset: MoveOffset,
        scale_factor: f64,
        iteration_max: u32,
    ) -> Self {
        Self {
            area_size,
            move_offset,
            scale_factor,
            iteration_max,
        }
    }

    #[must_use]
    pub fn fingerprint(&self, policy: FingerprintPolicy) -> GenerationFingerprint {
        GenerationFingerprint {
            area_size: self.area_size,
            move_offset_bits: self.move_offset.to_bits(),
            scale_factor_bits: self.scale_factor.to_bits(),
            iteration_max: match policy {
                FingerprintPolicy::View => None,
                FingerprintPolicy::ViewAndDepth => Some(self.iteration_max),
            },
        }
    }
}

/// Equality key deciding whether a row result belongs to the current generation.
///
/// Floats are compared bit-for-bit: a fingerprint is always a copy of the exact
/// values submitted, never a recomputation, so there is no rounding to tolerate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GenerationFingerprint {
    area_size: AreaSize,
    move_offset_bits: (u64, u64),
    scale_factor_bits: u64,
    iteration_max: Option<u32>,
}

impl GenerationFingerprint {
    #[must_use]
    pub fn area_size(&self) -> AreaSize {
        self.area_size
    }

    #[must_use]
    pub fn move_offset(&self) -> MoveOffset {
        MoveOffset::new(
            f64::from_bits(self.move_offset_bits.0),
            f64::from_bits(self.move_offset_bits.1),
        )
    }

    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        f64::from_bits(self.scale_factor_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(offset_x: f64, iteration_max: u32) -> GenerationRequest {
        GenerationRequest::new(
            AreaSize::new(40, 30),
            MoveOffset::new(offset_x, 0.25),
            0.005,
            iteration_max,
        )
    }

    #[test]
    fn test_view_fingerprint_ignores_iteration_max() {
        let a = request(0.0, 10).fingerprint(FingerprintPolicy::View);
        let b = request(0.0, 500).fingerprint(FingerprintPolicy::View);

        assert_eq!(a, b);
    }

    #[test]
    fn test_view_and_depth_fingerprint_includes_iteration_max() {
        let a = request(0.0, 10).fingerprint(FingerprintPolicy::ViewAndDepth);
        let b = request(0.0, 500).fingerprint(FingerprintPolicy::ViewAndDepth);

        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_when_offset_moves() {
        let a = request(0.0, 10).fingerprint(FingerprintPolicy::View);
        let b = request(0.001, 10).fingerprint(FingerprintPolicy::View);

        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_exposes_view_parameters() {
        let fingerprint = request(-1.5, 10).fingerprint(FingerprintPolicy::View);

        assert_eq!(fingerprint.area_size(), AreaSize::new(40, 30));
        assert_eq!(fingerprint.move_offset(), MoveOffset::new(-1.5, 0.25));
        assert_eq!(fingerprint.scale_factor(), 0.005);
    }

    #[test]
    fn test_nan_fingerprint_matches_itself() {
        let mut nan_request = request(0.0, 10);
        nan_request.scale_factor = f64::NAN;

        let fingerprint = nan_request.fingerprint(FingerprintPolicy::View);

        assert_eq!(fingerprint, fingerprint);
    }
}
