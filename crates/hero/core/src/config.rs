use crate::class::CharacterClass;

/// Character system configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroConfig {
    /// Revive countdown (seconds) used when the catalog has no revive curve
    /// for the dead character's class.
    pub base_revive_time: f32,
    /// Class selected before the player picks one.
    pub starting_class: CharacterClass,
    /// Level the manager starts at; clamped to at least 1.
    pub starting_level: u32,
    /// Base seed for every character's deterministic rolls.
    pub rng_seed: u64,
}

impl HeroConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of timed effects a single character can carry at once.
    pub const MAX_TIMED_EFFECTS: usize = 8;
    /// Maximum number of abilities the idle behavior may request per tick.
    pub const MAX_IDLE_REQUESTS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_REVIVE_TIME: f32 = 30.0;
    pub const DEFAULT_STARTING_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            base_revive_time: Self::DEFAULT_BASE_REVIVE_TIME,
            starting_class: CharacterClass::Warrior,
            starting_level: Self::DEFAULT_STARTING_LEVEL,
            rng_seed: 0,
        }
    }

    pub fn with_base_revive_time(mut self, seconds: f32) -> Self {
        self.base_revive_time = seconds;
        self
    }

    pub fn with_starting_class(mut self, class: CharacterClass) -> Self {
        self.starting_class = class;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self::new()
    }
}
