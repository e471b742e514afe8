use hero_core::{CharacterId, CharacterInstance};

/// Holding area for characters that are off the field.
///
/// A `false` from either mutator is a hard refusal; the manager reports it
/// as [`LifecycleError::ShelterRejected`](crate::LifecycleError::ShelterRejected).
pub trait Shelter {
    fn add_to_shelter(&mut self, character: &CharacterInstance) -> bool;

    fn remove_from_shelter(&mut self, character: &CharacterInstance) -> bool;

    /// Number of characters currently held.
    fn occupancy(&self) -> usize;
}

/// Shelter backed by a list of occupant ids, with an optional capacity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShelter {
    occupants: Vec<CharacterId>,
    capacity: Option<usize>,
}

impl InMemoryShelter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            occupants: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.occupants.contains(&id)
    }

    pub fn occupants(&self) -> &[CharacterId] {
        &self.occupants
    }
}

impl Shelter for InMemoryShelter {
    fn add_to_shelter(&mut self, character: &CharacterInstance) -> bool {
        let id = character.id();
        if self.contains(id) {
            return false;
        }
        if self.capacity.is_some_and(|cap| self.occupants.len() >= cap) {
            return false;
        }
        self.occupants.push(id);
        true
    }

    fn remove_from_shelter(&mut self, character: &CharacterInstance) -> bool {
        let id = character.id();
        match self.occupants.iter().position(|&occupant| occupant == id) {
            Some(index) => {
                self.occupants.remove(index);
                true
            }
            None => false,
        }
    }

    fn occupancy(&self) -> usize {
        self.occupants.len()
    }
}
