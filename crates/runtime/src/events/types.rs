//! Event payloads.

use hero_core::{CharacterClass, CharacterId, CharacterStatus};
use serde::{Deserialize, Serialize};

use super::Topic;

/// Notifications published by the lifecycle manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CharacterEvent {
    /// The class used for the next spawn changed.
    ClassSelected { class: CharacterClass },

    /// A new instance was created; any previous one was discarded.
    Spawned(CharacterStatus),

    /// Death was detected and the revive countdown started.
    Died {
        id: CharacterId,
        class: CharacterClass,
        level: u32,
        /// Length of the countdown in seconds.
        revive_time: f32,
    },

    /// The countdown finished; the character is alive with full pools.
    Revived(CharacterStatus),

    /// The persisted level changed (and was applied to any live instance).
    LevelChanged { previous: u32, level: u32 },
}

impl CharacterEvent {
    pub fn topic(&self) -> Topic {
        match self {
            Self::ClassSelected { .. } => Topic::Selection,
            Self::Spawned(_) | Self::Died { .. } | Self::Revived(_) => Topic::Lifecycle,
            Self::LevelChanged { .. } => Topic::Progression,
        }
    }
}
