use crate::class::CharacterClass;
use crate::effects::{Effect, EffectKind};
use crate::party::PartyView;
use crate::state::Position;

use super::{
    AbilityContext, AbilityEffect, AbilityKind, AbilityOutcome, AbilityRejection, AbilityRequest,
    ClassBehavior, IdleRequests,
};

/// Support kit: party blessing, sanctuary, single-target heal and
/// resurrection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClericKit {
    pub blessing_cost: f32,
    pub blessing_duration: f32,
    /// Blessing strength; incoming damage is reduced by half of it.
    pub blessing_bonus: f32,
    pub cooldown: f32,
    pub sanctuary_cost: f32,
    pub sanctuary_radius: f32,
    pub sanctuary_duration: f32,
    /// Healing per second, as a fraction of attack power.
    pub sanctuary_heal_rate: f32,
    pub heal_cost: f32,
    pub heal_power: f32,
    pub heal_range: f32,
    /// Allies below this health fraction are healed when the cleric is idle.
    pub heal_threshold: f32,
    pub resurrect_cost: f32,
    /// Fraction of the target's maximum health restored on resurrection.
    pub resurrect_fraction: f32,
    /// Own health fraction below which an idle cleric opens a sanctuary.
    pub emergency_threshold: f32,
}

impl Default for ClericKit {
    fn default() -> Self {
        Self {
            blessing_cost: 30.0,
            blessing_duration: 15.0,
            blessing_bonus: 0.3,
            cooldown: 10.0,
            sanctuary_cost: 50.0,
            sanctuary_radius: 5.0,
            sanctuary_duration: 12.0,
            sanctuary_heal_rate: 0.3,
            heal_cost: 15.0,
            heal_power: 1.5,
            heal_range: 4.0,
            heal_threshold: 0.6,
            resurrect_cost: 60.0,
            resurrect_fraction: 0.3,
            emergency_threshold: 0.4,
        }
    }
}

impl ClericKit {
    /// Multiplier-free damage reduction granted by the blessing.
    pub fn blessing_reduction(&self) -> f32 {
        self.blessing_bonus * 0.5
    }

    /// First living ally within heal range whose health is below the
    /// threshold.
    fn wounded_ally(&self, party: &dyn PartyView, origin: Position) -> Option<usize> {
        party
            .indices_within(origin, self.heal_range)
            .into_iter()
            .find(|&index| {
                party.member(index).is_some_and(|member| {
                    member.is_alive() && member.health_ratio() < self.heal_threshold
                })
            })
    }

    fn heal_target(&self, request: AbilityRequest, ctx: &AbilityContext<'_>) -> Option<usize> {
        match request.target {
            Some(index) => {
                let member = ctx.party.member(index)?;
                (member.is_alive() && member.position().is_within(*ctx.position, self.heal_range))
                    .then_some(index)
            }
            None => self.wounded_ally(&*ctx.party, *ctx.position),
        }
    }

    fn consecrate(&self, ctx: &mut AbilityContext<'_>, cost: f32) -> AbilityOutcome {
        let sanctuary = Effect::Sanctuary {
            center: *ctx.position,
            radius: self.sanctuary_radius,
            heal_rate: self.sanctuary_heal_rate,
        };
        ctx.start_effect(AbilityKind::Sanctuary, cost, sanctuary, self.sanctuary_duration)
    }

    fn resurrect_target(&self, request: AbilityRequest, ctx: &AbilityContext<'_>) -> Option<usize> {
        match request.target {
            Some(index) => ctx
                .party
                .member(index)
                .is_some_and(|member| member.can_be_resurrected())
                .then_some(index),
            None => (0..ctx.party.len()).find(|&index| {
                ctx.party
                    .member(index)
                    .is_some_and(|member| member.can_be_resurrected())
            }),
        }
    }
}

impl ClassBehavior for ClericKit {
    fn class(&self) -> CharacterClass {
        CharacterClass::Cleric
    }

    fn primary(&self) -> AbilityKind {
        AbilityKind::Blessing
    }

    fn cooldown(&self) -> f32 {
        self.cooldown
    }

    fn abilities(&self) -> &'static [AbilityKind] {
        &[
            AbilityKind::Blessing,
            AbilityKind::Sanctuary,
            AbilityKind::Heal,
            AbilityKind::Resurrect,
        ]
    }

    fn cost(&self, kind: AbilityKind) -> Option<f32> {
        match kind {
            AbilityKind::Blessing => Some(self.blessing_cost),
            AbilityKind::Sanctuary => Some(self.sanctuary_cost),
            AbilityKind::Heal => Some(self.heal_cost),
            AbilityKind::Resurrect => Some(self.resurrect_cost),
            _ => None,
        }
    }

    fn idle_requests(&self, ctx: &AbilityContext<'_>) -> IdleRequests {
        let mut requests = IdleRequests::new();
        if let Some(index) = self.wounded_ally(&*ctx.party, *ctx.position) {
            requests.push(AbilityRequest::new(AbilityKind::Heal).at(index));
        }
        if ctx.health_below(self.emergency_threshold)
            && !ctx.effects.is_active(EffectKind::Sanctuary)
        {
            requests.push(AbilityKind::Sanctuary.into());
        }
        requests
    }

    fn idle_cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        match request.kind {
            AbilityKind::Sanctuary => self.consecrate(ctx, 0.0),
            _ => self.cast(request, ctx),
        }
    }

    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        let kind = request.kind;
        match kind {
            AbilityKind::Blessing => {
                if let Err(reason) = ctx.ensure_inactive(EffectKind::Blessing) {
                    return AbilityOutcome::rejected(kind, reason);
                }
                if self.blessing_duration.is_nan() || self.blessing_duration <= 0.0 {
                    return AbilityOutcome::rejected(kind, AbilityRejection::NotReady);
                }
                ctx.spend(kind, self.blessing_cost, |ctx| {
                    ctx.effects.activate(
                        Effect::Blessing {
                            reduction: self.blessing_reduction(),
                        },
                        self.blessing_duration,
                    );
                    let members = ctx.party.len();
                    for index in 0..members {
                        if let Some(member) = ctx.party.member_mut(index) {
                            member.set_blessed(true);
                        }
                    }
                    AbilityEffect::Blessed { members }
                })
            }
            AbilityKind::Sanctuary => self.consecrate(ctx, self.sanctuary_cost),
            AbilityKind::Heal => {
                let Some(target) = self.heal_target(request, ctx) else {
                    return AbilityOutcome::rejected(kind, AbilityRejection::NoTarget);
                };
                ctx.spend(kind, self.heal_cost, |ctx| {
                    let amount = ctx.attack_power * self.heal_power;
                    if let Some(member) = ctx.party.member_mut(target) {
                        member.heal(amount);
                    }
                    AbilityEffect::Healed { targets: 1, amount }
                })
            }
            AbilityKind::Resurrect => {
                let Some(target) = self.resurrect_target(request, ctx) else {
                    return AbilityOutcome::rejected(kind, AbilityRejection::NoTarget);
                };
                ctx.spend(kind, self.resurrect_cost, |ctx| {
                    let mut health = 0.0;
                    if let Some(member) = ctx.party.member_mut(target) {
                        health = member.max_health() * self.resurrect_fraction;
                        member.resurrect(health);
                    }
                    AbilityEffect::Resurrected { target, health }
                })
            }
            other => AbilityOutcome::rejected(other, AbilityRejection::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::test_support::Caster;
    use crate::party::{Ally, NoParty, Party, PartyMember};

    fn party() -> Party<Ally> {
        Party::new(vec![
            Ally::new("healthy", Position::new(1.0, 0.0), 100.0),
            Ally::new("wounded-far", Position::new(8.0, 0.0), 100.0).with_health(10.0),
            Ally::new("wounded-near", Position::new(0.0, 3.0), 100.0).with_health(50.0),
            Ally::new("fallen", Position::new(20.0, 0.0), 200.0).with_health(0.0),
        ])
    }

    #[test]
    fn blessing_marks_every_member() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        let mut party = party();
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Blessing.into(), &mut ctx);
        assert_eq!(outcome.effect(), Some(&AbilityEffect::Blessed { members: 4 }));
        assert_eq!(ctx.mana.current, 50.0);
        assert!(party.members().iter().all(|ally| ally.blessed));
    }

    #[test]
    fn heal_picks_first_wounded_ally_in_range() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        let mut party = party();
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Heal.into(), &mut ctx);
        assert_eq!(
            outcome.effect(),
            Some(&AbilityEffect::Healed {
                targets: 1,
                amount: 22.5
            })
        );
        assert_eq!(party.get(2).unwrap().health(), 72.5);
        assert_eq!(party.get(1).unwrap().health(), 10.0);
    }

    #[test]
    fn heal_without_target_keeps_mana() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Heal.into(), &mut ctx);
        assert_eq!(outcome.rejection(), Some(AbilityRejection::NoTarget));
        assert_eq!(ctx.mana.current, 80.0);
    }

    #[test]
    fn resurrect_restores_fraction_of_max_health() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        let mut party = party();
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Resurrect.into(), &mut ctx);
        let Some(&AbilityEffect::Resurrected { target, health }) = outcome.effect() else {
            panic!("expected resurrection, got {outcome:?}");
        };
        assert_eq!(target, 3);
        assert!((health - 60.0).abs() < 1e-4);
        assert_eq!(ctx.mana.current, 20.0);
        let fallen = party.get(3).unwrap();
        assert!(fallen.is_alive());
        assert!((fallen.health() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn idle_heals_before_sanctuary() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        caster.health.current = 20.0;
        let mut party = party();
        let ctx = caster.context(&mut party);

        let requests = kit.idle_requests(&ctx);
        assert_eq!(
            requests.as_slice(),
            &[
                AbilityRequest::new(AbilityKind::Heal).at(2),
                AbilityRequest::new(AbilityKind::Sanctuary),
            ]
        );
    }

    #[test]
    fn idle_sanctuary_is_free_but_idle_heal_is_not() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        caster.health.current = 20.0;
        caster.mana.current = 10.0;
        let mut party = party();
        let mut ctx = caster.context(&mut party);

        let heal = kit.idle_cast(AbilityRequest::new(AbilityKind::Heal).at(2), &mut ctx);
        assert!(matches!(
            heal.rejection(),
            Some(AbilityRejection::InsufficientMana { .. })
        ));

        let sanctuary = kit.idle_cast(AbilityKind::Sanctuary.into(), &mut ctx);
        assert!(sanctuary.is_fired());
        assert!(ctx.effects.is_active(EffectKind::Sanctuary));
        assert_eq!(ctx.mana.current, 10.0);
    }

    #[test]
    fn zero_duration_blessing_keeps_mana() {
        let kit = ClericKit {
            blessing_duration: 0.0,
            ..ClericKit::default()
        };
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        let mut party = party();
        let mut ctx = caster.context(&mut party);

        let outcome = kit.cast(AbilityKind::Blessing.into(), &mut ctx);
        assert_eq!(outcome.rejection(), Some(AbilityRejection::NotReady));
        assert_eq!(ctx.mana.current, 80.0);
        assert!(party.members().iter().all(|ally| !ally.blessed));
    }

    #[test]
    fn sanctuary_is_centered_on_caster() {
        let kit = ClericKit::default();
        let mut caster = Caster::new(90.0, 80.0, 15.0);
        caster.position = Position::new(4.0, 4.0);
        let mut party = NoParty;
        let mut ctx = caster.context(&mut party);

        assert!(kit.cast(AbilityKind::Sanctuary.into(), &mut ctx).is_fired());
        assert!(matches!(
            ctx.effects.get(EffectKind::Sanctuary).map(|e| e.effect),
            Some(Effect::Sanctuary { center, .. }) if center == Position::new(4.0, 4.0)
        ));
    }
}
