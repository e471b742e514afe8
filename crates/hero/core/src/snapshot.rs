//! Persisted character state.
//!
//! The snapshot is a flat, versionless record of what the lifecycle manager
//! needs to rebuild its character. Byte encoding is left to the caller;
//! with the `serde` feature any serde format works.

use crate::class::CharacterClass;
use crate::state::Position;

/// Flat save record for the managed character.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub selected_class: CharacterClass,
    pub level: u32,
    /// False when the manager had no spawned character; the remaining
    /// character fields are then meaningless.
    pub has_character: bool,
    pub is_alive: bool,
    pub is_in_shelter: bool,
    pub current_health: f32,
    pub current_mana: f32,
    pub position: Position,
    pub is_reviving: bool,
    pub revive_time_remaining: f32,
}

impl CharacterSnapshot {
    /// Snapshot of a manager that has not spawned anything yet.
    pub fn without_character(selected_class: CharacterClass, level: u32) -> Self {
        Self {
            selected_class,
            level,
            has_character: false,
            is_alive: false,
            is_in_shelter: false,
            current_health: 0.0,
            current_mana: 0.0,
            position: Position::ORIGIN,
            is_reviving: false,
            revive_time_remaining: 0.0,
        }
    }
}
