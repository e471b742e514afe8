use hero_core::{NoParty, Position};
use hero_runtime::{
    Floor, InMemoryShelter, LifecycleError, ManagerState, OpenFloor, PlayerCharacterManager,
    Shelter,
};

fn revive_into_shelter<F: Floor>(manager: &mut PlayerCharacterManager<InMemoryShelter, F>) {
    manager.spawn(Position::ORIGIN).unwrap();
    let character = manager.character_mut().unwrap();
    let health = character.health().maximum;
    character.apply_unmitigated_damage(health);
    manager.tick(0.0, &mut NoParty).unwrap();
    let total = manager.revive().unwrap().total();
    manager.tick(total, &mut NoParty).unwrap();
}

#[test]
fn deploy_requires_a_sheltered_character() {
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::new(), OpenFloor);
    assert_eq!(
        manager.deploy_from_shelter(Position::ORIGIN, 0),
        Err(LifecycleError::NoCharacter)
    );

    manager.spawn(Position::ORIGIN).unwrap();
    assert_eq!(
        manager.deploy_from_shelter(Position::ORIGIN, 0),
        Err(LifecycleError::NotInShelter)
    );
}

#[test]
fn deploy_respects_floor_placement() {
    let floor = |floor_index: usize, _position: Position| floor_index == 1;
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::new(), floor);
    revive_into_shelter(&mut manager);

    let target = Position::new(5.0, 5.0);
    assert_eq!(
        manager.deploy_from_shelter(target, 0),
        Err(LifecycleError::PlacementRejected {
            floor: 0,
            position: target
        })
    );
    assert_eq!(manager.state(), ManagerState::InShelter);
    assert_eq!(manager.shelter().occupancy(), 1);

    manager.deploy_from_shelter(target, 1).unwrap();
    assert_eq!(manager.state(), ManagerState::Active);
    assert_eq!(manager.character().unwrap().position(), target);
    assert_eq!(manager.shelter().occupancy(), 0);
}

#[test]
fn full_shelter_still_revives_but_reports_rejection() {
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::with_capacity(0), OpenFloor);
    manager.spawn(Position::ORIGIN).unwrap();
    let character = manager.character_mut().unwrap();
    let health = character.health().maximum;
    character.apply_unmitigated_damage(health);
    manager.tick(0.0, &mut NoParty).unwrap();
    let total = manager.revive().unwrap().total();

    assert_eq!(
        manager.tick(total, &mut NoParty),
        Err(LifecycleError::ShelterRejected)
    );
    assert!(manager.is_character_alive());
    assert!(!manager.is_reviving());
    assert_eq!(manager.state(), ManagerState::Active);
}

#[test]
fn voluntary_retreat_and_redeploy() {
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::new(), OpenFloor);
    assert_eq!(manager.shelter_character(), Err(LifecycleError::NoCharacter));

    manager.spawn(Position::ORIGIN).unwrap();
    manager.shelter_character().unwrap();
    manager.shelter_character().unwrap();
    assert_eq!(manager.state(), ManagerState::InShelter);
    assert_eq!(manager.shelter().occupancy(), 1);

    manager.deploy_from_shelter(Position::new(1.0, 0.0), 3).unwrap();
    assert_eq!(manager.state(), ManagerState::Active);
}

#[test]
fn dead_character_cannot_retreat() {
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::new(), OpenFloor);
    manager.spawn(Position::ORIGIN).unwrap();
    let character = manager.character_mut().unwrap();
    let health = character.health().maximum;
    character.apply_unmitigated_damage(health);

    assert_eq!(manager.shelter_character(), Err(LifecycleError::CharacterDead));
}

#[test]
fn destroying_a_sheltered_character_frees_its_slot() {
    let mut manager = PlayerCharacterManager::new(InMemoryShelter::new(), OpenFloor);
    manager.spawn(Position::ORIGIN).unwrap();
    manager.shelter_character().unwrap();

    assert!(manager.destroy_character());
    assert_eq!(manager.shelter().occupancy(), 0);
    assert_eq!(manager.state(), ManagerState::NoCharacter);
    assert!(!manager.destroy_character());
}
