//! Level-scaled class statistics.
//!
//! Base statistics are a pure function of `(class, level)`:
//! - Catalog: [`ClassBaseStats`] stores one [`LevelCurve`] per stat
//! - Derived: [`CharacterStats`] is evaluated at a level and never stored
//!
//! Current resource values live on the character, not here.
mod curve;

pub use curve::LevelCurve;

/// Per-class stat formulas, one curve per stat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBaseStats {
    pub health: LevelCurve,
    pub mana: LevelCurve,
    pub attack_power: LevelCurve,
    /// Revive countdown in seconds. `None` makes the manager fall back to its
    /// configured base revive time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revive_time: Option<LevelCurve>,
}

impl ClassBaseStats {
    /// Evaluates every stat curve at `level`.
    pub fn at_level(&self, level: u32) -> CharacterStats {
        CharacterStats {
            max_health: self.health.at(level),
            max_mana: self.mana.at(level),
            attack_power: self.attack_power.at(level),
        }
    }

    /// Revive countdown at `level`, if the class defines one.
    pub fn revive_time(&self, level: u32) -> Option<f32> {
        self.revive_time.map(|curve| curve.at(level))
    }

    /// Returns the name of the first curve that is not usable.
    pub(crate) fn first_invalid_curve(&self) -> Option<&'static str> {
        if !self.health.is_valid() || self.health.base <= 0.0 {
            return Some("health");
        }
        if !self.mana.is_valid() {
            return Some("mana");
        }
        if !self.attack_power.is_valid() {
            return Some("attack_power");
        }
        match self.revive_time {
            Some(curve) if !curve.is_valid() => Some("revive_time"),
            _ => None,
        }
    }
}

/// Stats derived from [`ClassBaseStats`] at a specific level.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub max_health: f32,
    pub max_mana: f32,
    pub attack_power: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> ClassBaseStats {
        ClassBaseStats {
            health: LevelCurve::new(100.0, 10.0),
            mana: LevelCurve::new(50.0, 5.0),
            attack_power: LevelCurve::new(20.0, 2.5),
            revive_time: Some(LevelCurve::new(20.0, 2.0)),
        }
    }

    #[test]
    fn evaluates_all_curves_at_level() {
        let at_ten = stats().at_level(10);
        assert_eq!(at_ten.max_health, 190.0);
        assert_eq!(at_ten.max_mana, 95.0);
        assert_eq!(at_ten.attack_power, 42.5);
        assert_eq!(stats().revive_time(10), Some(38.0));
    }

    #[test]
    fn missing_revive_curve_yields_none() {
        let mut base = stats();
        base.revive_time = None;
        assert_eq!(base.revive_time(3), None);
        assert_eq!(base.first_invalid_curve(), None);
    }

    #[test]
    fn rejects_zero_health_curve() {
        let mut base = stats();
        base.health = LevelCurve::new(0.0, 5.0);
        assert_eq!(base.first_invalid_curve(), Some("health"));
    }
}
