use crate::class::CharacterClass;
use crate::effects::{Effect, EffectKind};

use super::{
    AbilityContext, AbilityEffect, AbilityKind, AbilityOutcome, AbilityRejection, AbilityRequest,
    ClassBehavior, IdleRequests,
};

/// Caster kit: magic missiles, an absorption barrier and an area heal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MageKit {
    pub missile_cost: f32,
    pub missile_count: u32,
    pub missile_multiplier: f32,
    pub missile_range: f32,
    pub cooldown: f32,
    pub barrier_cost: f32,
    pub barrier_absorption: f32,
    pub barrier_duration: f32,
    pub area_heal_cost: f32,
    pub area_heal_multiplier: f32,
    pub area_heal_range: f32,
    /// Health fraction below which an idle mage raises its barrier.
    pub emergency_threshold: f32,
}

impl Default for MageKit {
    fn default() -> Self {
        Self {
            missile_cost: 25.0,
            missile_count: 3,
            missile_multiplier: 1.2,
            missile_range: 6.0,
            cooldown: 6.0,
            barrier_cost: 30.0,
            barrier_absorption: 50.0,
            barrier_duration: 10.0,
            area_heal_cost: 40.0,
            area_heal_multiplier: 0.8,
            area_heal_range: 4.0,
            emergency_threshold: 0.4,
        }
    }
}

impl MageKit {
    fn raise_barrier(&self, ctx: &mut AbilityContext<'_>, cost: f32) -> AbilityOutcome {
        let barrier = Effect::Barrier {
            absorption: self.barrier_absorption,
        };
        ctx.start_effect(AbilityKind::Barrier, cost, barrier, self.barrier_duration)
    }
}

impl ClassBehavior for MageKit {
    fn class(&self) -> CharacterClass {
        CharacterClass::Mage
    }

    fn primary(&self) -> AbilityKind {
        AbilityKind::MagicMissile
    }

    fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn abilities(&self) -> &'static [AbilityKind] {
        &[
            AbilityKind::MagicMissile,
            AbilityKind::Barrier,
            AbilityKind::AreaHeal,
        ]
    }

    fn cost(&self, kind: AbilityKind) -> Option<f32> {
        match kind {
            AbilityKind::MagicMissile => Some(self.missile_cost),
            AbilityKind::Barrier => Some(self.barrier_cost),
            AbilityKind::AreaHeal => Some(self.area_heal_cost),
            _ => None,
        }
    }

    fn idle_requests(&self, ctx: &AbilityContext<'_>) -> IdleRequests {
        let mut requests = IdleRequests::new();
        if ctx.health_below(self.emergency_threshold) && !ctx.effects.is_active(EffectKind::Barrier)
        {
            requests.push(AbilityKind::Barrier.into());
        }
        requests
    }

    fn idle_cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        match request.kind {
            AbilityKind::Barrier => self.raise_barrier(ctx, 0.0),
            _ => self.cast(request, ctx),
        }
    }

    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        let kind = request.kind;
        match kind {
            AbilityKind::MagicMissile => ctx.spend(kind, self.missile_cost, |ctx| {
                AbilityEffect::Projectiles {
                    count: self.missile_count,
                    damage_each: ctx.attack_power * self.missile_multiplier,
                    range: self.missile_range,
                }
            }),
            AbilityKind::Barrier => self.raise_barrier(ctx, self.barrier_cost),
            AbilityKind::AreaHeal => ctx.spend(kind, self.area_heal_cost, |ctx| {
                let amount = ctx.attack_power * self.area_heal_multiplier;
                let mut targets = 0;
                for index in ctx.party.indices_within(*ctx.position, self.area_heal_range) {
                    if let Some(member) = ctx.party.member_mut(index)
                        && member.is_alive()
                    {
                        member.heal(amount);
                        targets += 1;
                    }
                }
                AbilityEffect::Healed { targets, amount }
            }),
            other => AbilityOutcome::rejected(other, AbilityRejection::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::test_support::Caster;
    use crate::party::{Ally, NoParty, Party, PartyMember};
    use crate::state::Position;

    #[test]
    fn barrier_costs_thirty_and_rejects_recast() {
        let kit = MageKit::default();
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        assert!(kit.cast(AbilityKind::Barrier.into(), &mut ctx).is_fired());
        assert_eq!(ctx.mana.current, 30.0);

        let again = kit.cast(AbilityKind::Barrier.into(), &mut ctx);
        assert_eq!(
            again.rejection(),
            Some(AbilityRejection::AlreadyActive(EffectKind::Barrier))
        );
        assert_eq!(ctx.mana.current, 30.0);
    }

    #[test]
    fn missile_without_mana_is_silent_no_op() {
        let kit = MageKit::default();
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        caster.mana.current = 24.0;
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::MagicMissile.into(), &mut ctx);
        assert!(matches!(
            outcome.rejection(),
            Some(AbilityRejection::InsufficientMana { .. })
        ));
        assert_eq!(ctx.mana.current, 24.0);
    }

    #[test]
    fn area_heal_reaches_allies_in_range_only() {
        let kit = MageKit::default();
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        let mut party = Party::new(vec![
            Ally::new("near", Position::new(2.0, 0.0), 100.0).with_health(50.0),
            Ally::new("far", Position::new(9.0, 0.0), 100.0).with_health(50.0),
        ]);
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::AreaHeal.into(), &mut ctx);
        assert_eq!(
            outcome.effect(),
            Some(&AbilityEffect::Healed {
                targets: 1,
                amount: 20.0
            })
        );
        assert_eq!(party.get(0).unwrap().health(), 70.0);
        assert_eq!(party.get(1).unwrap().health(), 50.0);
    }

    #[test]
    fn idle_barrier_ignores_mana_cost() {
        let kit = MageKit::default();
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        caster.health.current = 20.0;
        caster.mana.current = 15.0;
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        let outcome = kit.idle_cast(AbilityKind::Barrier.into(), &mut ctx);
        assert!(matches!(outcome, AbilityOutcome::Fired { cost, .. } if cost == 0.0));
        assert!(ctx.effects.is_active(EffectKind::Barrier));
        assert_eq!(ctx.mana.current, 15.0);

        let again = kit.idle_cast(AbilityKind::Barrier.into(), &mut ctx);
        assert_eq!(
            again.rejection(),
            Some(AbilityRejection::AlreadyActive(EffectKind::Barrier))
        );
    }

    #[test]
    fn zero_duration_barrier_keeps_mana() {
        let kit = MageKit {
            barrier_duration: 0.0,
            ..MageKit::default()
        };
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Barrier.into(), &mut ctx);
        assert_eq!(outcome.rejection(), Some(AbilityRejection::NotReady));
        assert!(!ctx.effects.is_active(EffectKind::Barrier));
        assert_eq!(ctx.mana.current, 60.0);
    }

    #[test]
    fn idle_requests_barrier_when_wounded() {
        let kit = MageKit::default();
        let mut caster = Caster::new(80.0, 60.0, 25.0);
        caster.health.current = 31.0;
        let mut party = NoParty;
        let ctx = caster.context(&mut party);

        let requests = kit.idle_requests(&ctx);
        assert_eq!(requests.as_slice(), &[AbilityRequest::new(AbilityKind::Barrier)]);
    }
}
