//! Player character lifecycle manager.
//!
//! The manager owns at most one [`CharacterInstance`] and moves it through
//! four states:
//!
//! ```text
//!  NoCharacter ──spawn──▶ Active ──death──▶ Reviving ──countdown──▶ InShelter
//!                           ▲                                          │
//!                           └─────────────── deploy ◀──────────────────┘
//! ```
//!
//! Class selection and level are manager state: they persist across spawns
//! and deaths, and a level change is pushed into the live instance.
mod builder;
mod revive;
mod snapshot;

pub use builder::ManagerBuilder;
pub use revive::ReviveProcess;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use hero_core::{
    CharacterClass, CharacterId, CharacterInstance, ClassData, ClassOracle, HeroConfig,
    PartyView, Position, RngOracle, TickReport, compute_seed,
};

use crate::collaborators::{Floor, Shelter};
use crate::error::{LifecycleError, Result};
use crate::events::{CharacterEvent, EventBus, Topic};

/// Coarse lifecycle state for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerState {
    NoCharacter,
    /// On the field. A character that just died stays here until the next
    /// tick detects the death.
    Active,
    Reviving,
    InShelter,
}

/// Spawns, levels, revives and shelters the player character.
pub struct PlayerCharacterManager<S, F> {
    // Read-only content and configuration
    catalog: Arc<dyn ClassOracle>,
    config: HeroConfig,
    rng: Arc<dyn RngOracle>,

    // Collaborators
    events: EventBus,
    shelter: S,
    floor: F,

    // Persisted selection
    selected_class: CharacterClass,
    level: u32,

    // Live state
    character: Option<CharacterInstance>,
    revive: Option<ReviveProcess>,
    spawn_count: u32,
}

impl<S: Shelter, F: Floor> PlayerCharacterManager<S, F> {
    /// Manager with the built-in catalog and default configuration.
    pub fn new(shelter: S, floor: F) -> Self {
        ManagerBuilder::new().build(shelter, floor)
    }

    pub(crate) fn from_parts(
        catalog: Arc<dyn ClassOracle>,
        config: HeroConfig,
        rng: Arc<dyn RngOracle>,
        events: EventBus,
        shelter: S,
        floor: F,
    ) -> Self {
        Self {
            catalog,
            selected_class: config.starting_class,
            level: config.starting_level.max(1),
            config,
            rng,
            events,
            shelter,
            floor,
            character: None,
            revive: None,
            spawn_count: 0,
        }
    }

    // ========================================================================
    // Selection and Progression
    // ========================================================================

    /// Chooses the class for the next spawn. Selecting the current class
    /// does nothing.
    pub fn select_class(&mut self, class: CharacterClass) {
        if self.selected_class == class {
            return;
        }
        debug!(from = %self.selected_class, to = %class, "class selected");
        self.selected_class = class;
        self.events.publish(CharacterEvent::ClassSelected { class });
    }

    /// Sets the persisted level (at least 1) and applies it to the live
    /// character. Setting the current level does nothing.
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        if level == self.level {
            return;
        }
        let previous = self.level;
        self.level = level;
        if let Some(character) = self.character.as_mut() {
            character.set_level(level);
        }
        debug!(previous, level, "level changed");
        self.events
            .publish(CharacterEvent::LevelChanged { previous, level });
    }

    pub fn level_up(&mut self) {
        self.set_level(self.level.saturating_add(1));
    }

    // ========================================================================
    // Spawning
    // ========================================================================

    /// Creates a fresh character of the selected class at the persisted
    /// level, replacing any existing one (and cancelling its revive).
    pub fn spawn(&mut self, position: Position) -> Result<CharacterId> {
        let class = self.selected_class;
        let data = self.catalog.require(class).map_err(|source| {
            error!(%class, %source, "cannot spawn");
            LifecycleError::Configuration { class, source }
        })?;

        let id = CharacterId(self.spawn_count.wrapping_add(1));
        let seed = compute_seed(self.config.rng_seed, u64::from(id.0), 0);
        let character =
            CharacterInstance::new(id, data, self.level, position, Arc::clone(&self.rng), seed);

        self.discard_character();
        self.spawn_count = id.0;
        info!(%id, %class, level = self.level, %position, "character spawned");
        self.events.publish(CharacterEvent::Spawned(character.status()));
        self.character = Some(character);
        Ok(id)
    }

    /// Removes the character (and any revive in progress).
    ///
    /// Returns false if there was nothing to remove.
    pub fn destroy_character(&mut self) -> bool {
        let existed = self.character.is_some();
        self.discard_character();
        if existed {
            debug!("character destroyed");
        }
        existed
    }

    fn discard_character(&mut self) {
        self.revive = None;
        if let Some(old) = self.character.take()
            && old.is_in_shelter()
            && !self.shelter.remove_from_shelter(&old)
        {
            warn!(id = %old.id(), "shelter did not release discarded character");
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the lifecycle by `dt` seconds.
    ///
    /// Order: revive countdown, the character's own tick (idle abilities,
    /// effect timers), then death detection. A revive that completes while
    /// the shelter refuses the character still revives it (on the field) and
    /// reports [`LifecycleError::ShelterRejected`].
    pub fn tick(&mut self, dt: f32, party: &mut dyn PartyView) -> Result<Option<TickReport>> {
        let dt = dt.max(0.0);

        let countdown_done = self
            .revive
            .as_mut()
            .is_some_and(|revive| revive.advance(dt));
        let revived = if countdown_done {
            self.complete_revive()
        } else {
            Ok(())
        };

        let report = self
            .character
            .as_mut()
            .map(|character| character.tick(dt, party));

        self.detect_death();
        revived.map(|()| report)
    }

    fn complete_revive(&mut self) -> Result<()> {
        self.revive = None;
        let Some(character) = self.character.as_mut() else {
            return Ok(());
        };
        if !character.revive() {
            return Ok(());
        }

        let sheltered = self.shelter.add_to_shelter(character);
        if sheltered {
            character.enter_shelter();
        }
        info!(id = %character.id(), sheltered, "character revived");
        self.events
            .publish(CharacterEvent::Revived(character.status()));

        if sheltered {
            Ok(())
        } else {
            warn!(id = %character.id(), "shelter refused revived character");
            Err(LifecycleError::ShelterRejected)
        }
    }

    fn detect_death(&mut self) {
        if self.revive.is_some() {
            return;
        }
        let Some(character) = self.character.as_ref() else {
            return;
        };
        if character.is_alive() {
            return;
        }

        let (id, class, level) = (character.id(), character.class(), character.level());
        let revive_time = self.revive_time_for(class, level);
        self.revive = Some(ReviveProcess::start(revive_time));
        info!(%id, %class, level, revive_time, "character died");
        self.events.publish(CharacterEvent::Died {
            id,
            class,
            level,
            revive_time,
        });
    }

    /// Catalog revive time for `class` at `level`, or the configured base
    /// time when the class has none.
    fn revive_time_for(&self, class: CharacterClass, level: u32) -> f32 {
        self.catalog
            .class_data(class)
            .and_then(|data| data.revive_time(level))
            .unwrap_or(self.config.base_revive_time)
    }

    // ========================================================================
    // Shelter and Deployment
    // ========================================================================

    /// Moves the sheltered character onto `floor_index` at `position`.
    pub fn deploy_from_shelter(&mut self, position: Position, floor_index: usize) -> Result<()> {
        let Some(character) = self.character.as_mut() else {
            warn!("deploy declined: no character");
            return Err(LifecycleError::NoCharacter);
        };
        if !character.is_in_shelter() {
            warn!(id = %character.id(), "deploy declined: character is not in the shelter");
            return Err(LifecycleError::NotInShelter);
        }
        if !self.floor.can_place_character(floor_index, position) {
            warn!(floor = floor_index, %position, "deploy declined: placement rejected");
            return Err(LifecycleError::PlacementRejected {
                floor: floor_index,
                position,
            });
        }
        if !self.shelter.remove_from_shelter(character) {
            warn!(id = %character.id(), "deploy declined: shelter refused release");
            return Err(LifecycleError::ShelterRejected);
        }

        character.deploy(position);
        info!(id = %character.id(), floor = floor_index, %position, "character deployed");
        Ok(())
    }

    /// Retreats a living character into the shelter. Already sheltered is
    /// not an error.
    pub fn shelter_character(&mut self) -> Result<()> {
        let Some(character) = self.character.as_mut() else {
            return Err(LifecycleError::NoCharacter);
        };
        if character.is_in_shelter() {
            return Ok(());
        }
        if !character.is_alive() {
            return Err(LifecycleError::CharacterDead);
        }
        if !self.shelter.add_to_shelter(character) {
            warn!(id = %character.id(), "shelter refused character");
            return Err(LifecycleError::ShelterRejected);
        }
        character.enter_shelter();
        debug!(id = %character.id(), "character sheltered");
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> ManagerState {
        match &self.character {
            None => ManagerState::NoCharacter,
            Some(_) if self.revive.is_some() => ManagerState::Reviving,
            Some(character) if character.is_in_shelter() => ManagerState::InShelter,
            Some(_) => ManagerState::Active,
        }
    }

    pub fn available_classes(&self) -> Vec<CharacterClass> {
        self.catalog.available_classes()
    }

    pub fn class_data(&self, class: CharacterClass) -> Option<&ClassData> {
        self.catalog.class_data(class)
    }

    pub fn selected_class(&self) -> CharacterClass {
        self.selected_class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn character(&self) -> Option<&CharacterInstance> {
        self.character.as_ref()
    }

    /// Mutable access for the combat layer (damage, ability use, engagement).
    pub fn character_mut(&mut self) -> Option<&mut CharacterInstance> {
        self.character.as_mut()
    }

    pub fn has_character(&self) -> bool {
        self.character.is_some()
    }

    pub fn is_character_alive(&self) -> bool {
        self.character.as_ref().is_some_and(|c| c.is_alive())
    }

    pub fn is_reviving(&self) -> bool {
        self.revive.is_some()
    }

    pub fn revive(&self) -> Option<&ReviveProcess> {
        self.revive.as_ref()
    }

    /// Seconds left on the revive countdown, or 0 when not reviving.
    pub fn revive_time_remaining(&self) -> f32 {
        self.revive.map_or(0.0, |r| r.remaining())
    }

    /// Elapsed fraction of the revive countdown, or 0 when not reviving.
    pub fn revive_progress(&self) -> f32 {
        self.revive.map_or(0.0, |r| r.progress())
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CharacterEvent> {
        self.events.subscribe(topic)
    }

    pub fn shelter(&self) -> &S {
        &self.shelter
    }

    pub fn shelter_mut(&mut self) -> &mut S {
        &mut self.shelter
    }

    pub fn floor(&self) -> &F {
        &self.floor
    }
}
