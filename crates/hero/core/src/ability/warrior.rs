use crate::class::CharacterClass;

use super::{
    AbilityContext, AbilityEffect, AbilityKind, AbilityOutcome, AbilityRejection, AbilityRequest,
    ClassBehavior,
};

/// Melee bruiser kit: a single mana-gated power strike.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WarriorKit {
    pub power_strike_cost: f32,
    pub power_strike_multiplier: f32,
    pub cooldown: f32,
}

impl Default for WarriorKit {
    fn default() -> Self {
        Self {
            power_strike_cost: 20.0,
            power_strike_multiplier: 2.0,
            cooldown: 8.0,
        }
    }
}

impl ClassBehavior for WarriorKit {
    fn class(&self) -> CharacterClass {
        CharacterClass::Warrior
    }

    fn primary(&self) -> AbilityKind {
        AbilityKind::PowerStrike
    }

    fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn abilities(&self) -> &'static [AbilityKind] {
        &[AbilityKind::PowerStrike]
    }

    fn cost(&self, kind: AbilityKind) -> Option<f32> {
        match kind {
            AbilityKind::PowerStrike => Some(self.power_strike_cost),
            _ => None,
        }
    }

    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        match request.kind {
            AbilityKind::PowerStrike => ctx.spend(request.kind, self.power_strike_cost, |ctx| {
                AbilityEffect::Strike {
                    damage: ctx.attack_power * self.power_strike_multiplier,
                }
            }),
            other => AbilityOutcome::rejected(other, AbilityRejection::Unavailable),
        }
    }
}
