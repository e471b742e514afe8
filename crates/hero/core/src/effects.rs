//! Timed effects carried by a character.
//!
//! Every effect has a remaining duration in seconds that the owning
//! character advances once per tick. An effect is removed as soon as its
//! timer reaches zero; barriers are also removed when their absorption pool
//! is spent. A kind can be active at most once: activating it again while it
//! runs is rejected and leaves the running timer untouched.

use arrayvec::ArrayVec;

use crate::config::HeroConfig;
use crate::state::Position;

/// Identity of a timed effect, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Party-wide blessing cast by a cleric.
    Blessing,
    /// Stationary healing zone.
    Sanctuary,
    /// Damage absorption shield.
    Barrier,
    /// Chance to avoid incoming hits.
    Stealth,
    /// One-shot backstab opportunity after a quick step.
    BackstabWindow,
}

/// Effect payload.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Incoming damage is multiplied by `1 − reduction` while active.
    Blessing { reduction: f32 },
    /// Heals allies inside `radius` of `center` by `attack × heal_rate × dt`.
    Sanctuary {
        center: Position,
        radius: f32,
        heal_rate: f32,
    },
    /// Absorbs incoming damage until `absorption` is spent.
    Barrier { absorption: f32 },
    /// Probability of negating a hit outright.
    Stealth { dodge_chance: f32 },
    BackstabWindow,
}

impl Effect {
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Blessing { .. } => EffectKind::Blessing,
            Self::Sanctuary { .. } => EffectKind::Sanctuary,
            Self::Barrier { .. } => EffectKind::Barrier,
            Self::Stealth { .. } => EffectKind::Stealth,
            Self::BackstabWindow => EffectKind::BackstabWindow,
        }
    }
}

/// A running effect and its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub effect: Effect,
    /// Seconds until the effect expires.
    pub remaining: f32,
}

impl TimedEffect {
    pub fn kind(&self) -> EffectKind {
        self.effect.kind()
    }
}

/// Fixed-capacity set of running effects, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffects {
    effects: ArrayVec<TimedEffect, { HeroConfig::MAX_TIMED_EFFECTS }>,
}

/// Effects removed in a single operation.
pub type RemovedEffects = ArrayVec<TimedEffect, { HeroConfig::MAX_TIMED_EFFECTS }>;

impl TimedEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn get(&self, kind: EffectKind) -> Option<&TimedEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub(crate) fn get_mut(&mut self, kind: EffectKind) -> Option<&mut TimedEffect> {
        self.effects.iter_mut().find(|e| e.kind() == kind)
    }

    /// Seconds left on `kind`, or 0 when inactive.
    pub fn remaining(&self, kind: EffectKind) -> f32 {
        self.get(kind).map_or(0.0, |e| e.remaining)
    }

    /// Starts `effect` for `duration` seconds.
    ///
    /// Returns `false` without touching anything if the kind is already
    /// running, the duration is not positive, or the set is full.
    pub fn activate(&mut self, effect: Effect, duration: f32) -> bool {
        if duration <= 0.0 || self.is_active(effect.kind()) || self.effects.is_full() {
            return false;
        }
        self.effects.push(TimedEffect {
            effect,
            remaining: duration,
        });
        true
    }

    /// Removes `kind` immediately.
    pub fn remove(&mut self, kind: EffectKind) -> Option<TimedEffect> {
        let index = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(index))
    }

    /// Advances every timer by `dt` and returns the effects that expired.
    pub fn advance(&mut self, dt: f32) -> RemovedEffects {
        let mut expired = RemovedEffects::new();
        for effect in self.effects.iter_mut() {
            effect.remaining -= dt;
        }
        self.effects.retain(|e| {
            if e.remaining <= 0.0 {
                expired.push(*e);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Removes every effect, returning what was running.
    pub fn clear(&mut self) -> RemovedEffects {
        self.effects.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
