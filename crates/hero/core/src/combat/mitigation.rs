use crate::ability::{ClassBehavior, ClassKit};
use crate::effects::{Effect, EffectKind, TimedEffects};
use crate::env::Dice;

use super::DamageReport;

/// Runs a positive hit through stealth, the class passive, barrier and
/// blessing. `dealt` is left at the post-mitigation amount; the caller clamps
/// it against current health.
pub(crate) fn mitigate(
    incoming: f32,
    kit: &ClassKit,
    effects: &mut TimedEffects,
    dice: &mut Dice<'_>,
) -> DamageReport {
    let mut report = DamageReport {
        incoming,
        ..DamageReport::default()
    };

    if let Some(Effect::Stealth { dodge_chance }) = effects.get(EffectKind::Stealth).map(|e| e.effect)
    {
        if dice.chance(dodge_chance) {
            report.dodged = true;
            return report;
        }
        effects.remove(EffectKind::Stealth);
        report.stealth_broken = true;
    }

    let mut remaining = kit.on_incoming_damage(incoming, dice);
    report.evaded = remaining < incoming;

    if let Some(barrier) = effects.get_mut(EffectKind::Barrier)
        && let Effect::Barrier { absorption } = &mut barrier.effect
    {
        let absorbed = remaining.min(*absorption);
        *absorption -= absorbed;
        remaining -= absorbed;
        report.absorbed = absorbed;
        report.barrier_broken = *absorption <= 0.0;
    }
    if report.barrier_broken {
        effects.remove(EffectKind::Barrier);
    }

    if let Some(Effect::Blessing { reduction }) = effects.get(EffectKind::Blessing).map(|e| e.effect)
    {
        let reduced = remaining * reduction.clamp(0.0, 1.0);
        remaining -= reduced;
        report.reduced = reduced;
    }

    report.dealt = remaining.max(0.0);
    report
}
