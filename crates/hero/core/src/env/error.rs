//! Catalog access errors.

use crate::class::CharacterClass;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while looking up or registering class content.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// No catalog entry exists for the class.
    #[error("class '{0}' is not present in the catalog")]
    MissingClass(CharacterClass),

    /// The ability kit belongs to a different class than the entry.
    #[error("catalog entry for '{class}' carries a '{kit}' ability kit")]
    KitMismatch {
        class: CharacterClass,
        kit: CharacterClass,
    },

    /// A stat curve has negative or non-finite coefficients.
    #[error("catalog entry for '{class}' has an invalid '{stat}' curve")]
    InvalidCurve {
        class: CharacterClass,
        stat: &'static str,
    },

    /// An ability kit has a timed effect that would never start.
    #[error("catalog entry for '{class}' has a non-positive '{field}'")]
    InvalidDuration {
        class: CharacterClass,
        field: &'static str,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingClass(_) => "CATALOG_MISSING_CLASS",
            Self::KitMismatch { .. } => "CATALOG_KIT_MISMATCH",
            Self::InvalidCurve { .. } => "CATALOG_INVALID_CURVE",
            Self::InvalidDuration { .. } => "CATALOG_INVALID_DURATION",
        }
    }
}
