/// Pan offset of the view in parameter-plane units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct MoveOffset {
    pub x: f64,
    pub y: f64,
}

impl MoveOffset {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn to_bits(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}
