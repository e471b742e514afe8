//! Errors surfaced by the lifecycle manager.
//!
//! Every variant is recoverable: the manager's state is left consistent and
//! the caller may retry (typically on a later tick or with a different
//! placement).
use thiserror::Error;

use hero_core::{CatalogError, CharacterClass, ErrorSeverity, GameError, Position};

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("cannot configure class '{class}'")]
    Configuration {
        class: CharacterClass,
        #[source]
        source: CatalogError,
    },

    #[error("no character has been spawned")]
    NoCharacter,

    #[error("character is not in the shelter")]
    NotInShelter,

    #[error("character is dead")]
    CharacterDead,

    #[error("floor {floor} rejected placement at {position}")]
    PlacementRejected { floor: usize, position: Position },

    #[error("shelter refused the character")]
    ShelterRejected,
}

impl GameError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration { .. } => ErrorSeverity::Validation,
            Self::NoCharacter
            | Self::NotInShelter
            | Self::CharacterDead
            | Self::PlacementRejected { .. }
            | Self::ShelterRejected => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "LIFECYCLE_CONFIGURATION",
            Self::NoCharacter => "LIFECYCLE_NO_CHARACTER",
            Self::NotInShelter => "LIFECYCLE_NOT_IN_SHELTER",
            Self::CharacterDead => "LIFECYCLE_CHARACTER_DEAD",
            Self::PlacementRejected { .. } => "LIFECYCLE_PLACEMENT_REJECTED",
            Self::ShelterRejected => "LIFECYCLE_SHELTER_REJECTED",
        }
    }
}
