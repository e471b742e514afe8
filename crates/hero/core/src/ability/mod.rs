//! Class ability kits.
//!
//! Each class owns a kit: a small, immutable set of tuning values plus the
//! behavior that turns an [`AbilityRequest`] into an [`AbilityOutcome`].
//! Kits never hold mutable state; everything a cast changes (mana, position,
//! timed effects, party members) is reached through [`AbilityContext`].
//!
//! # Gating
//!
//! A cast is rejected without side effects when the caster is dead, the kit
//! does not know the ability, a timed effect of the same kind is already
//! running, a required target or window is missing, or mana is short. Only
//! after every check passes is the full cost deducted and the ability fired.
//! Rejections are values, not errors.
//!
//! Idle emergency casts (mage barrier, rogue stealth, cleric sanctuary) keep
//! every check except the mana cost. The idle cleric heal pays in full.
//!
//! Cooldowns are advisory: [`ClassBehavior::cooldown`] reports the class
//! cooldown, but callers decide how often to invoke abilities.

mod cleric;
mod mage;
mod rogue;
mod warrior;

pub use cleric::ClericKit;
pub use mage::MageKit;
pub use rogue::RogueKit;
pub use warrior::WarriorKit;

use arrayvec::ArrayVec;

use crate::class::CharacterClass;
use crate::config::HeroConfig;
use crate::effects::{Effect, EffectKind, TimedEffects};
use crate::env::Dice;
use crate::party::PartyView;
use crate::state::{Position, ResourceMeter};

/// Every ability a kit may expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AbilityKind {
    PowerStrike,
    MagicMissile,
    Barrier,
    AreaHeal,
    QuickStep,
    Stealth,
    PoisonStrike,
    Backstab,
    Blessing,
    Sanctuary,
    Heal,
    Resurrect,
}

/// An ability invocation, optionally aimed at a party member by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityRequest {
    pub kind: AbilityKind,
    pub target: Option<usize>,
}

impl AbilityRequest {
    pub const fn new(kind: AbilityKind) -> Self {
        Self { kind, target: None }
    }

    /// Aims the request at the party member at `index`.
    pub const fn at(mut self, index: usize) -> Self {
        self.target = Some(index);
        self
    }
}

impl From<AbilityKind> for AbilityRequest {
    fn from(kind: AbilityKind) -> Self {
        Self::new(kind)
    }
}

/// What a fired ability produced.
///
/// Offensive payloads (damage numbers, projectile counts) are resolved by an
/// external combat layer; this crate only computes them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    Strike { damage: f32 },
    Projectiles { count: u32, damage_each: f32, range: f32 },
    PoisonStrike { damage: f32 },
    Backstab { damage: f32 },
    Relocated { from: Position, to: Position },
    EffectStarted { kind: EffectKind, duration: f32 },
    Blessed { members: usize },
    Healed { targets: usize, amount: f32 },
    Resurrected { target: usize, health: f32 },
}

/// Why an ability did not fire.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityRejection {
    #[error("caster is dead")]
    Dead,

    #[error("ability is not part of this class kit")]
    Unavailable,

    #[error("requires {required} mana, {available} available")]
    InsufficientMana { required: f32, available: f32 },

    #[error("{0} is already active")]
    AlreadyActive(EffectKind),

    #[error("no valid target")]
    NoTarget,

    #[error("ability precondition not met")]
    NotReady,
}

/// Result of an ability invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityOutcome {
    Fired {
        kind: AbilityKind,
        cost: f32,
        effect: AbilityEffect,
    },
    Rejected {
        kind: AbilityKind,
        reason: AbilityRejection,
    },
}

impl AbilityOutcome {
    pub const fn rejected(kind: AbilityKind, reason: AbilityRejection) -> Self {
        Self::Rejected { kind, reason }
    }

    pub const fn kind(&self) -> AbilityKind {
        match self {
            Self::Fired { kind, .. } | Self::Rejected { kind, .. } => *kind,
        }
    }

    pub const fn is_fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }

    pub fn effect(&self) -> Option<&AbilityEffect> {
        match self {
            Self::Fired { effect, .. } => Some(effect),
            Self::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<AbilityRejection> {
        match self {
            Self::Fired { .. } => None,
            Self::Rejected { reason, .. } => Some(*reason),
        }
    }
}

/// Requests produced by a kit's idle behavior in one tick.
pub type IdleRequests = ArrayVec<AbilityRequest, { HeroConfig::MAX_IDLE_REQUESTS }>;

/// Mutable view of the caster handed to a kit for one cast.
pub struct AbilityContext<'a> {
    pub position: &'a mut Position,
    pub health: ResourceMeter,
    pub mana: &'a mut ResourceMeter,
    pub attack_power: f32,
    pub effects: &'a mut TimedEffects,
    pub party: &'a mut dyn PartyView,
    pub dice: Dice<'a>,
}

impl AbilityContext<'_> {
    /// Deducts `cost` and fires `cast`, or rejects without touching mana.
    pub fn spend(
        &mut self,
        kind: AbilityKind,
        cost: f32,
        cast: impl FnOnce(&mut Self) -> AbilityEffect,
    ) -> AbilityOutcome {
        if !self.mana.try_spend(cost) {
            return AbilityOutcome::rejected(
                kind,
                AbilityRejection::InsufficientMana {
                    required: cost,
                    available: self.mana.current,
                },
            );
        }
        let effect = cast(self);
        AbilityOutcome::Fired { kind, cost, effect }
    }

    /// Starts a timed `effect` for `cost` mana.
    ///
    /// Rejects without side effects when the effect is already running or
    /// `duration` is not positive.
    pub fn start_effect(
        &mut self,
        kind: AbilityKind,
        cost: f32,
        effect: Effect,
        duration: f32,
    ) -> AbilityOutcome {
        let effect_kind = effect.kind();
        if let Err(reason) = self.ensure_inactive(effect_kind) {
            return AbilityOutcome::rejected(kind, reason);
        }
        if duration.is_nan() || duration <= 0.0 {
            return AbilityOutcome::rejected(kind, AbilityRejection::NotReady);
        }
        self.spend(kind, cost, |ctx| {
            ctx.effects.activate(effect, duration);
            AbilityEffect::EffectStarted {
                kind: effect_kind,
                duration,
            }
        })
    }

    /// Rejects with [`AbilityRejection::AlreadyActive`] when `kind` is running.
    pub fn ensure_inactive(&self, kind: EffectKind) -> Result<(), AbilityRejection> {
        if self.effects.is_active(kind) {
            Err(AbilityRejection::AlreadyActive(kind))
        } else {
            Ok(())
        }
    }

    /// True when current health is below `fraction` of maximum.
    pub fn health_below(&self, fraction: f32) -> bool {
        self.health.current < self.health.maximum * fraction
    }
}

/// Per-class behavior hooks.
pub trait ClassBehavior {
    fn class(&self) -> CharacterClass;

    /// The ability fired by `execute_ability`.
    fn primary(&self) -> AbilityKind;

    /// Advisory cooldown (seconds) of the primary ability.
    fn cooldown(&self) -> f32;

    /// Abilities this kit understands.
    fn abilities(&self) -> &'static [AbilityKind];

    /// Mana cost of `kind`, or `None` if the kit does not have it.
    fn cost(&self, kind: AbilityKind) -> Option<f32>;

    /// Abilities the class reaches for when idle and alive.
    fn idle_requests(&self, _ctx: &AbilityContext<'_>) -> IdleRequests {
        IdleRequests::new()
    }

    /// Runs the gated ability. The caller has already verified the caster
    /// is alive.
    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome;

    /// Runs a request produced by [`ClassBehavior::idle_requests`].
    ///
    /// Emergency self-protection overrides this to skip the mana cost.
    fn idle_cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        self.cast(request, ctx)
    }

    /// Class passive applied to a hit that got past stealth.
    fn on_incoming_damage(&self, amount: f32, _dice: &mut Dice<'_>) -> f32 {
        amount
    }
}

/// Ability kit of a catalog entry, tagged by class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKit {
    Warrior(WarriorKit),
    Mage(MageKit),
    Rogue(RogueKit),
    Cleric(ClericKit),
}

impl ClassKit {
    /// Default kit for `class`.
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Warrior => Self::Warrior(WarriorKit::default()),
            CharacterClass::Mage => Self::Mage(MageKit::default()),
            CharacterClass::Rogue => Self::Rogue(RogueKit::default()),
            CharacterClass::Cleric => Self::Cleric(ClericKit::default()),
        }
    }

    fn behavior(&self) -> &dyn ClassBehavior {
        match self {
            Self::Warrior(kit) => kit,
            Self::Mage(kit) => kit,
            Self::Rogue(kit) => kit,
            Self::Cleric(kit) => kit,
        }
    }

    /// Name of the first timed-effect duration that is not a positive
    /// finite number.
    pub fn first_invalid_duration(&self) -> Option<&'static str> {
        let durations = match self {
            Self::Warrior(_) => vec![],
            Self::Mage(kit) => vec![("barrier_duration", kit.barrier_duration)],
            Self::Rogue(kit) => vec![
                ("backstab_window", kit.backstab_window),
                ("stealth_duration", kit.stealth_duration),
            ],
            Self::Cleric(kit) => vec![
                ("blessing_duration", kit.blessing_duration),
                ("sanctuary_duration", kit.sanctuary_duration),
            ],
        };
        durations
            .into_iter()
            .find(|&(_, duration)| !duration.is_finite() || duration <= 0.0)
            .map(|(name, _)| name)
    }
}

impl ClassBehavior for ClassKit {
    fn class(&self) -> CharacterClass {
        self.behavior().class()
    }

    fn primary(&self) -> AbilityKind {
        self.behavior().primary()
    }

    fn cooldown(&self) -> f32 {
        self.behavior().cooldown()
    }

    fn abilities(&self) -> &'static [AbilityKind] {
        self.behavior().abilities()
    }

    fn cost(&self, kind: AbilityKind) -> Option<f32> {
        self.behavior().cost(kind)
    }

    fn idle_requests(&self, ctx: &AbilityContext<'_>) -> IdleRequests {
        self.behavior().idle_requests(ctx)
    }

    fn cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        self.behavior().cast(request, ctx)
    }

    fn idle_cast(&self, request: AbilityRequest, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
        self.behavior().idle_cast(request, ctx)
    }

    fn on_incoming_damage(&self, amount: f32, dice: &mut Dice<'_>) -> f32 {
        self.behavior().on_incoming_damage(amount, dice)
    }
}
