/// Linear level curve: `base + per_level × (level − 1)`.
///
/// Level 1 yields `base`; levels below 1 are treated as 1.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelCurve {
    pub base: f32,
    pub per_level: f32,
}

impl LevelCurve {
    pub const fn new(base: f32, per_level: f32) -> Self {
        Self { base, per_level }
    }

    /// A curve that ignores level.
    pub const fn flat(value: f32) -> Self {
        Self::new(value, 0.0)
    }

    /// Evaluates the curve at `level`.
    pub fn at(&self, level: u32) -> f32 {
        let steps = level.max(1) - 1;
        (self.base + self.per_level * steps as f32).max(0.0)
    }

    /// Finite and non-negative coefficients.
    pub fn is_valid(&self) -> bool {
        self.base.is_finite()
            && self.per_level.is_finite()
            && self.base >= 0.0
            && self.per_level >= 0.0
    }
}
