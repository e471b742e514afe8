use crate::class::CharacterClass;
use crate::effects::{Effect, EffectKind};
use crate::env::Dice;

use super::{
    AbilityContext, AbilityEffect, AbilityKind, AbilityOutcome, AbilityRejection, AbilityRequest,
    ClassBehavior, IdleRequests,
};

/// Rogue kit: quick step, stealth, poison strike and backstab.
///
/// A quick step opens a short backstab window; the window closes when it
/// times out or when the backstab is used, whichever comes first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RogueKit {
    pub quick_step_cost: f32,
    pub quick_step_distance: f32,
    pub backstab_window: f32,
    pub backstab_multiplier: f32,
    pub cooldown: f32,
    pub stealth_cost: f32,
    pub stealth_duration: f32,
    pub stealth_dodge_chance: f32,
    pub poison_cost: f32,
    pub poison_multiplier: f32,
    /// Half of this is the chance to halve any hit that gets past stealth.
    pub critical_chance: f32,
    /// Health fraction below which an idle rogue slips into stealth.
    pub emergency_threshold: f32,
}

impl Default for RogueKit {
    fn default() -> Self {
        Self {
            quick_step_cost: 20.0,
            quick_step_distance: 3.0,
            backstab_window: 3.0,
            backstab_multiplier: 3.0,
            cooldown: 5.0,
            stealth_cost: 35.0,
            stealth_duration: 8.0,
            stealth_dodge_chance: 0.5,
            poison_cost: 25.0,
            poison_multiplier: 1.5,
            critical_chance: 0.25,
            emergency_threshold: 0.5,
        }
    }
}

impl RogueKit {
    /// Chance to halve a hit that was not dodged.
    pub fn evasion_chance(&self) -> f32 {
        self.critical_chance * 0.5
    }

    fn vanish(&self, ctx: &mut AbilityContext<'_>, cost: f32) -> AbilityOutcome {
        let stealth = Effect::Stealth {
            dodge_chance: self.stealth_dodge_chance,
        };
        ctx.start_effect(AbilityKind::Stealth, cost, stealth, self.stealth_duration)
    }
}

impl ClassBehavior for RogueKit {
    fn class(&self) -> CharacterClass {
        CharacterClass::Rogue
    }

    fn primary(&self) -> AbilityKind {
        AbilityKind::QuickStep
    }

    fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn abilities(&self) -> &'static [AbilityKind] {
        &[
            AbilityKind::QuickStep,
            AbilityKind::Stealth,
            AbilityKind::PoisonStrike,
            AbilityKind::Backstab,
        ]
    }

    fn cost(&self, kind: AbilityKind) -> Option<f32> {
        match kind {
            AbilityKind::QuickStep => Some(self.quick_step_cost),
            AbilityKind::Stealth => Some(self.stealth_cost),
            AbilityKind::PoisonStrike => Some(self.poison_cost),
            AbilityKind::Backstab => Some(0.0),
            _ => None,
        }
    }

    fn idle_requests(&self, ctx: &AbilityContext<'_>) -> IdleRequests {
        let mut requests = IdleRequests::new();
        if ctx.health_below(self.emergency_threshold) && !ctx.effects.is_active(EffectKind::Stealth)
        {
            requests.push(AbilityKind::Stealth.into());
        }
        requests
    }

    fn idle_cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        match request.kind {
            AbilityKind::Stealth => self.vanish(ctx, 0.0),
            _ => self.cast(request, ctx),
        }
    }

    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        let kind = request.kind;
        match kind {
            AbilityKind::QuickStep => ctx.spend(kind, self.quick_step_cost, |ctx| {
                let from = *ctx.position;
                let direction = ctx.dice.direction();
                let to = from.offset(direction, self.quick_step_distance);
                *ctx.position = to;
                // An open window is left as is rather than extended.
                ctx.effects
                    .activate(Effect::BackstabWindow, self.backstab_window);
                AbilityEffect::Relocated { from, to }
            }),
            AbilityKind::Stealth => self.vanish(ctx, self.stealth_cost),
            AbilityKind::PoisonStrike => ctx.spend(kind, self.poison_cost, |ctx| {
                AbilityEffect::PoisonStrike {
                    damage: ctx.attack_power * self.poison_multiplier,
                }
            }),
            AbilityKind::Backstab => {
                if !ctx.effects.is_active(EffectKind::BackstabWindow) {
                    return AbilityOutcome::rejected(kind, AbilityRejection::NotReady);
                }
                ctx.spend(kind, 0.0, |ctx| {
                    ctx.effects.remove(EffectKind::BackstabWindow);
                    AbilityEffect::Backstab {
                        damage: ctx.attack_power * self.backstab_multiplier,
                    }
                })
            }
            other => AbilityOutcome::rejected(other, AbilityRejection::Unavailable),
        }
    }

    fn on_incoming_damage(&self, amount: f32, dice: &mut Dice<'_>) -> f32 {
        if dice.chance(self.evasion_chance()) {
            amount * 0.5
        } else {
            amount
        }
    }
}
