//! Lifecycle orchestration for the player character.
//!
//! This crate drives a single [`hero_core::CharacterInstance`] through its
//! life: class selection, spawning, leveling, death detection, the revive
//! countdown, shelter handoff and redeployment, plus save/restore.
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the [`PlayerCharacterManager`] and its builder
//! - [`collaborators`] defines the shelter and floor capabilities the manager consults
//! - [`events`] provides the topic-based notification bus
//! - [`error`] holds the recoverable lifecycle errors
//!
//! Everything runs on the caller's thread; the embedding game advances time
//! with [`PlayerCharacterManager::tick`].
pub mod collaborators;
pub mod error;
pub mod events;
pub mod manager;

pub use collaborators::{Floor, InMemoryShelter, OpenFloor, Shelter};
pub use error::{LifecycleError, Result};
pub use events::{CharacterEvent, EventBus, Topic};
pub use manager::{ManagerBuilder, ManagerState, PlayerCharacterManager, ReviveProcess};
