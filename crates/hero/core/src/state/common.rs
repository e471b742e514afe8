use std::fmt;

/// Unique identifier for a spawned character.
///
/// The lifecycle manager hands out a fresh id for every spawn so that
/// notifications about a replaced character can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous field position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns true if `other` lies within `radius` (inclusive).
    pub fn is_within(self, other: Self, radius: f32) -> bool {
        self.distance(other) <= radius
    }

    /// Offsets the position by `distance` along `direction` (a unit vector).
    pub fn offset(self, direction: (f32, f32), distance: f32) -> Self {
        Self::new(
            self.x + direction.0 * distance,
            self.y + direction.1 * distance,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Bounded resource pool (health, mana).
///
/// `current` always stays within `[0, maximum]`; every mutator clamps.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: f32,
    pub maximum: f32,
}

impl ResourceMeter {
    pub fn new(current: f32, maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: current.clamp(0.0, maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Current value as a fraction of the maximum (0 when the maximum is 0).
    pub fn ratio(&self) -> f32 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            self.current / self.maximum
        }
    }

    /// Adds up to `amount`, returning how much was actually gained.
    pub fn restore(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount`, returning how much was actually lost.
    pub fn deplete(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }

    /// Removes exactly `amount` if available; otherwise leaves the meter untouched.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount.max(0.0);
        true
    }

    /// Changes the maximum and re-clamps the current value.
    pub fn set_maximum(&mut self, maximum: f32) {
        self.maximum = maximum.max(0.0);
        self.current = self.current.min(self.maximum);
    }

    pub fn fill(&mut self) {
        self.current = self.maximum;
    }
}
