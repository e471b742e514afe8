//! Deterministic rules for player-controlled combat characters.
//!
//! `hero-core` defines the canonical character model (classes, level curves,
//! resource pools, timed effects, class ability kits) and exposes pure APIs
//! that the lifecycle runtime and offline tools share. Every mutation of a
//! live character flows through [`CharacterInstance`]; read-only content is
//! reached through the [`ClassOracle`] trait.
pub mod ability;
pub mod character;
pub mod class;
pub mod combat;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod party;
pub mod snapshot;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityContext, AbilityEffect, AbilityKind, AbilityOutcome, AbilityRejection,
    AbilityRequest, ClassBehavior, ClassKit, ClericKit, MageKit, RogueKit, WarriorKit,
};
pub use character::{ActionState, CharacterInstance, CharacterStatus, IdleOutcomes, TickReport};
pub use class::CharacterClass;
pub use combat::DamageReport;
pub use config::HeroConfig;
pub use effects::{Effect, EffectKind, TimedEffect, TimedEffects};
pub use env::{
    CatalogError, ClassCatalog, ClassData, ClassOracle, Dice, PcgRng, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use party::{Ally, NoParty, Party, PartyMember, PartyView};
pub use snapshot::CharacterSnapshot;
pub use state::{CharacterId, LifecycleState, Position, ResourceMeter};
pub use stats::{CharacterStats, ClassBaseStats, LevelCurve};
