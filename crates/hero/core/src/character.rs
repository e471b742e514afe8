//! Live player character.
//!
//! [`CharacterInstance`] owns the resource core (health and mana pools scaled
//! by level), the ability state machine of its class kit, and the timed
//! effects those abilities create.
//!
//! # Invariants
//!
//! - `0 ≤ health ≤ max_health` and `0 ≤ mana ≤ max_mana` after every call
//! - The transition to [`LifecycleState::Dead`] happens exactly once per life
//! - No timed effect survives death
//! - A rejected ability never changes mana

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::ability::{
    AbilityContext, AbilityKind, AbilityOutcome, AbilityRejection, AbilityRequest, ClassBehavior,
    ClassKit,
};
use crate::class::CharacterClass;
use crate::combat::{DamageReport, mitigate};
use crate::config::HeroConfig;
use crate::effects::{Effect, EffectKind, RemovedEffects, TimedEffects};
use crate::env::{ClassData, Dice, RngOracle};
use crate::party::{PartyMember, PartyView};
use crate::state::{CharacterId, LifecycleState, Position, ResourceMeter};
use crate::stats::{CharacterStats, ClassBaseStats};

/// Whether the character is free to run its idle behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionState {
    #[default]
    Idle,
    /// Driven by the external combat layer; idle behavior is suspended.
    Engaged,
}

/// Outcomes of abilities fired by idle behavior in one tick.
pub type IdleOutcomes = ArrayVec<AbilityOutcome, { HeroConfig::MAX_IDLE_REQUESTS }>;

/// What happened during one [`CharacterInstance::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub idle: IdleOutcomes,
    /// Effects whose timers ran out this tick.
    pub expired: RemovedEffects,
    /// Health restored by an active sanctuary, summed over every target.
    pub sanctuary_healing: f32,
    /// The party's blessing flags were cleared this tick.
    pub blessing_released: bool,
}

/// Read-only summary for status displays and notifications.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStatus {
    pub id: CharacterId,
    pub class: CharacterClass,
    pub level: u32,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub attack_power: f32,
    pub position: Position,
    pub lifecycle: LifecycleState,
}

/// A spawned player character bound to one class.
#[derive(Clone)]
pub struct CharacterInstance {
    id: CharacterId,
    class: CharacterClass,
    level: u32,
    base_stats: ClassBaseStats,
    kit: ClassKit,

    // === Derived from base_stats at level ===
    stats: CharacterStats,

    // === Resource core ===
    health: ResourceMeter,
    mana: ResourceMeter,

    lifecycle: LifecycleState,
    action: ActionState,
    position: Position,

    // === Ability state ===
    effects: TimedEffects,
    /// Set by an allied cleric's blessing; read by the combat layer.
    blessed: bool,
    /// The party still carries this character's blessing flags.
    blessing_release_pending: bool,

    // === Deterministic rolls ===
    seed: u64,
    rolls: u64,
    rng: Arc<dyn RngOracle>,
}

impl fmt::Debug for CharacterInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterInstance")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("level", &self.level)
            .field("health", &self.health)
            .field("mana", &self.mana)
            .field("lifecycle", &self.lifecycle)
            .field("position", &self.position)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

impl CharacterInstance {
    /// Creates a live character at `level` with full pools.
    pub fn new(
        id: CharacterId,
        data: &ClassData,
        level: u32,
        position: Position,
        rng: Arc<dyn RngOracle>,
        seed: u64,
    ) -> Self {
        let level = level.max(1);
        let stats = data.stats_at(level);
        Self {
            id,
            class: data.class,
            level,
            base_stats: data.stats.clone(),
            kit: data.kit.clone(),
            stats,
            health: ResourceMeter::full(stats.max_health),
            mana: ResourceMeter::full(stats.max_mana),
            lifecycle: LifecycleState::Active,
            action: ActionState::Idle,
            position,
            effects: TimedEffects::new(),
            blessed: false,
            blessing_release_pending: false,
            seed,
            rolls: 0,
            rng,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stats(&self) -> CharacterStats {
        self.stats
    }

    pub fn kit(&self) -> &ClassKit {
        &self.kit
    }

    pub fn health(&self) -> ResourceMeter {
        self.health
    }

    pub fn mana(&self) -> ResourceMeter {
        self.mana
    }

    pub fn attack_power(&self) -> f32 {
        self.stats.attack_power
    }

    pub fn health_ratio(&self) -> f32 {
        self.health.ratio()
    }

    pub fn mana_ratio(&self) -> f32 {
        self.mana.ratio()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn action_state(&self) -> ActionState {
        self.action
    }

    /// Marks the character as driven by the combat layer (or releases it).
    pub fn set_engaged(&mut self, engaged: bool) {
        self.action = if engaged {
            ActionState::Engaged
        } else {
            ActionState::Idle
        };
    }

    pub fn effects(&self) -> &TimedEffects {
        &self.effects
    }

    /// Number of rolls consumed so far.
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn status(&self) -> CharacterStatus {
        CharacterStatus {
            id: self.id,
            class: self.class,
            level: self.level,
            health: self.health,
            mana: self.mana,
            attack_power: self.stats.attack_power,
            position: self.position,
            lifecycle: self.lifecycle,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifecycle != LifecycleState::Dead
    }

    #[inline]
    pub fn is_in_shelter(&self) -> bool {
        self.lifecycle == LifecycleState::InShelter
    }

    // ========================================================================
    // Class and Level
    // ========================================================================

    /// Rebinds the character to new class content. Current pools are kept
    /// and clamped to the new maxima.
    pub fn set_class_data(&mut self, data: &ClassData) {
        self.class = data.class;
        self.base_stats = data.stats.clone();
        self.kit = data.kit.clone();
        self.recompute_stats();
    }

    /// Sets the level (at least 1) and rescales maxima. Current pools are
    /// kept and clamped.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.recompute_stats();
    }

    fn recompute_stats(&mut self) {
        self.stats = self.base_stats.at_level(self.level);
        self.health.set_maximum(self.stats.max_health);
        self.mana.set_maximum(self.stats.max_mana);
    }

    /// Revive countdown for the current class and level, if the class
    /// defines one.
    pub fn revive_time(&self) -> Option<f32> {
        self.base_stats.revive_time(self.level)
    }

    // ========================================================================
    // Resource Core
    // ========================================================================

    /// Applies an incoming hit through every mitigation layer.
    ///
    /// Negative amounts count as zero. Hits on a dead character are ignored.
    pub fn take_damage(&mut self, amount: f32) -> DamageReport {
        if !self.is_alive() || amount <= 0.0 || amount.is_nan() {
            return DamageReport::ignored(amount);
        }

        let mut dice = Dice::new(&*self.rng, self.seed, &mut self.rolls);
        let mut report = mitigate(amount, &self.kit, &mut self.effects, &mut dice);
        if report.dealt > 0.0 {
            report.dealt = self.health.deplete(report.dealt);
            report.killed = self.check_death();
        }
        report
    }

    /// Removes health with no mitigation and no rolls. Used to replay saved
    /// state.
    pub fn apply_unmitigated_damage(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let lost = self.health.deplete(amount);
        self.check_death();
        lost
    }

    /// Restores health up to the maximum. No-op when dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        self.health.restore(amount)
    }

    /// Restores mana up to the maximum. No-op when dead.
    pub fn restore_mana(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        self.mana.restore(amount)
    }

    /// Removes mana down to zero. No-op when dead.
    pub fn drain_mana(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        self.mana.deplete(amount)
    }

    /// Flips to dead once health is empty. Returns true on the transition.
    fn check_death(&mut self) -> bool {
        if !self.is_alive() || !self.health.is_empty() {
            return false;
        }
        self.lifecycle = LifecycleState::Dead;
        self.action = ActionState::Idle;
        let removed = self.effects.clear();
        if removed.iter().any(|e| e.kind() == EffectKind::Blessing) {
            self.blessing_release_pending = true;
        }
        true
    }

    // ========================================================================
    // Lifecycle Transitions
    // ========================================================================

    /// Brings a dead character back with full health and mana.
    ///
    /// Returns false if the character is alive.
    pub fn revive(&mut self) -> bool {
        if self.is_alive() {
            return false;
        }
        self.health.fill();
        self.mana.fill();
        self.lifecycle = LifecycleState::Active;
        self.action = ActionState::Idle;
        true
    }

    /// Moves a living character into the shelter.
    pub fn enter_shelter(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.lifecycle = LifecycleState::InShelter;
        self.action = ActionState::Idle;
        true
    }

    /// Places a sheltered character back on the field at `position`.
    pub fn deploy(&mut self, position: Position) -> bool {
        if !self.is_in_shelter() {
            return false;
        }
        self.position = position;
        self.lifecycle = LifecycleState::Active;
        true
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    fn with_context<R>(
        &mut self,
        party: &mut dyn PartyView,
        f: impl FnOnce(&ClassKit, &mut AbilityContext<'_>) -> R,
    ) -> R {
        let mut ctx = AbilityContext {
            position: &mut self.position,
            health: self.health,
            mana: &mut self.mana,
            attack_power: self.stats.attack_power,
            effects: &mut self.effects,
            party,
            dice: Dice::new(&*self.rng, self.seed, &mut self.rolls),
        };
        f(&self.kit, &mut ctx)
    }

    /// Fires the class primary ability.
    pub fn execute_ability(&mut self, party: &mut dyn PartyView) -> AbilityOutcome {
        let primary = self.kit.primary();
        self.use_ability(primary.into(), party)
    }

    /// Fires any ability of the class kit.
    pub fn use_ability(
        &mut self,
        request: AbilityRequest,
        party: &mut dyn PartyView,
    ) -> AbilityOutcome {
        if !self.is_alive() {
            return AbilityOutcome::rejected(request.kind, AbilityRejection::Dead);
        }
        self.with_context(party, |kit, ctx| kit.cast(request, ctx))
    }

    /// Alive and holding enough mana for the primary ability.
    pub fn can_use_ability(&self) -> bool {
        self.can_use(self.kit.primary())
    }

    /// Alive and holding enough mana for `kind`.
    pub fn can_use(&self, kind: AbilityKind) -> bool {
        self.is_alive() && self.kit.cost(kind).is_some_and(|cost| self.mana.current >= cost)
    }

    /// Advisory cooldown of the primary ability, in seconds.
    pub fn ability_cooldown(&self) -> f32 {
        self.kit.cooldown()
    }

    // ========================================================================
    // Effect Queries
    // ========================================================================

    pub fn has_barrier(&self) -> bool {
        self.effects.is_active(EffectKind::Barrier)
    }

    /// Remaining absorption pool, or 0 without a barrier.
    pub fn barrier_absorption(&self) -> f32 {
        match self.effects.get(EffectKind::Barrier).map(|e| e.effect) {
            Some(Effect::Barrier { absorption }) => absorption,
            _ => 0.0,
        }
    }

    pub fn has_blessing_active(&self) -> bool {
        self.effects.is_active(EffectKind::Blessing)
    }

    pub fn is_stealthed(&self) -> bool {
        self.effects.is_active(EffectKind::Stealth)
    }

    pub fn can_backstab(&self) -> bool {
        self.is_alive() && self.effects.is_active(EffectKind::BackstabWindow)
    }

    pub fn has_sanctuary_active(&self) -> bool {
        self.effects.is_active(EffectKind::Sanctuary)
    }

    pub fn sanctuary_center(&self) -> Option<Position> {
        match self.effects.get(EffectKind::Sanctuary).map(|e| e.effect) {
            Some(Effect::Sanctuary { center, .. }) => Some(center),
            _ => None,
        }
    }

    pub fn effect_remaining(&self, kind: EffectKind) -> f32 {
        self.effects.remaining(kind)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the character by `dt` seconds.
    ///
    /// Order: pending party cleanup, idle behavior (alive, on the field and
    /// not engaged), sanctuary healing, then effect timers. Effects that
    /// expire run their cleanup before returning.
    pub fn tick(&mut self, dt: f32, party: &mut dyn PartyView) -> TickReport {
        let mut report = TickReport::default();
        let dt = dt.max(0.0);

        if self.blessing_release_pending {
            report.blessing_released = self.release_party_effects(&mut *party);
        }

        if self.lifecycle == LifecycleState::Active && self.action == ActionState::Idle {
            report.idle = self.with_context(&mut *party, |kit, ctx| {
                kit.idle_requests(ctx)
                    .into_iter()
                    .map(|request| kit.idle_cast(request, ctx))
                    .collect()
            });
        }

        report.sanctuary_healing = self.pulse_sanctuary(dt, &mut *party);

        report.expired = self.effects.advance(dt);
        if report.expired.iter().any(|e| e.kind() == EffectKind::Blessing) {
            clear_blessings(party);
            report.blessing_released = true;
        }
        report
    }

    fn pulse_sanctuary(&mut self, dt: f32, party: &mut dyn PartyView) -> f32 {
        let Some(Effect::Sanctuary {
            center,
            radius,
            heal_rate,
        }) = self.effects.get(EffectKind::Sanctuary).map(|e| e.effect)
        else {
            return 0.0;
        };
        if !self.is_alive() || dt <= 0.0 {
            return 0.0;
        }

        let amount = self.stats.attack_power * heal_rate * dt;
        let mut healed = 0.0;
        for index in party.indices_within(center, radius) {
            if let Some(member) = party.member_mut(index)
                && member.is_alive()
            {
                let before = member.health();
                member.heal(amount);
                healed += member.health() - before;
            }
        }
        if self.position.is_within(center, radius) {
            healed += self.heal(amount);
        }
        healed
    }

    /// Clears blessing flags this character left on the party after dying.
    ///
    /// Returns true if a release was pending.
    pub fn release_party_effects(&mut self, party: &mut dyn PartyView) -> bool {
        if !self.blessing_release_pending {
            return false;
        }
        clear_blessings(party);
        self.blessing_release_pending = false;
        true
    }
}

fn clear_blessings(party: &mut dyn PartyView) {
    for index in 0..party.len() {
        if let Some(member) = party.member_mut(index) {
            member.set_blessed(false);
        }
    }
}

/// Managed characters appear in other units' party views; they come back
/// through the revive countdown only.
impl PartyMember for CharacterInstance {
    fn position(&self) -> Position {
        self.position
    }

    fn health(&self) -> f32 {
        self.health.current
    }

    fn max_health(&self) -> f32 {
        self.health.maximum
    }

    fn is_alive(&self) -> bool {
        CharacterInstance::is_alive(self)
    }

    fn heal(&mut self, amount: f32) {
        CharacterInstance::heal(self, amount);
    }

    fn resurrect(&mut self, _health: f32) -> bool {
        false
    }

    fn can_be_resurrected(&self) -> bool {
        false
    }

    fn set_blessed(&mut self, blessed: bool) {
        self.blessed = blessed;
    }

    fn is_blessed(&self) -> bool {
        self.blessed
    }
}
