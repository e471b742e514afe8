use tracing::info;

use hero_core::CharacterSnapshot;

use super::{PlayerCharacterManager, ReviveProcess};
use crate::collaborators::{Floor, Shelter};
use crate::error::{LifecycleError, Result};

impl<S: Shelter, F: Floor> PlayerCharacterManager<S, F> {
    /// Captures selection, level and the character's observable state.
    pub fn export_snapshot(&self) -> CharacterSnapshot {
        let Some(character) = self.character.as_ref() else {
            return CharacterSnapshot::without_character(self.selected_class, self.level);
        };
        CharacterSnapshot {
            selected_class: self.selected_class,
            level: self.level,
            has_character: true,
            is_alive: character.is_alive(),
            is_in_shelter: character.is_in_shelter(),
            current_health: character.health().current,
            current_mana: character.mana().current,
            position: character.position(),
            is_reviving: self.revive.is_some(),
            revive_time_remaining: self.revive_time_remaining(),
        }
    }

    /// Rebuilds the manager from a snapshot.
    ///
    /// The character is respawned at full pools and the saved deficits are
    /// replayed without mitigation or rolls. A dead character resumes its
    /// revive countdown; a living sheltered one is handed back to the shelter.
    pub fn restore_snapshot(&mut self, snapshot: &CharacterSnapshot) -> Result<()> {
        self.select_class(snapshot.selected_class);
        self.set_level(snapshot.level);
        if !snapshot.has_character {
            self.destroy_character();
            return Ok(());
        }

        self.spawn(snapshot.position)?;
        let revive_total = self.revive_time_for(self.selected_class, self.level);
        let Some(character) = self.character.as_mut() else {
            return Err(LifecycleError::NoCharacter);
        };

        let health = character.health();
        let mana = character.mana();
        character.drain_mana(mana.maximum - snapshot.current_mana);
        if snapshot.is_alive {
            character.apply_unmitigated_damage(health.maximum - snapshot.current_health);
        } else {
            character.apply_unmitigated_damage(health.maximum);
        }

        if !character.is_alive() {
            if snapshot.is_reviving {
                self.revive = Some(ReviveProcess::resume(
                    snapshot.revive_time_remaining,
                    revive_total,
                ));
            }
        } else if snapshot.is_in_shelter {
            if !self.shelter.add_to_shelter(character) {
                return Err(LifecycleError::ShelterRejected);
            }
            character.enter_shelter();
        }

        info!(
            class = %snapshot.selected_class,
            level = snapshot.level,
            state = ?self.state(),
            "snapshot restored"
        );
        Ok(())
    }
}
