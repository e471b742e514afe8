use std::sync::Arc;

use hero_core::{
    CharacterClass, CharacterSnapshot, ClassCatalog, ClassOracle, HeroConfig, LevelCurve,
    NoParty, Position,
};
use hero_runtime::{
    InMemoryShelter, ManagerBuilder, ManagerState, OpenFloor, PlayerCharacterManager, Shelter,
};

/// Mage variant whose level-5 pools are exactly 120 health and 60 mana.
fn catalog() -> ClassCatalog {
    let mut catalog = ClassCatalog::builtin();
    let mut mage = catalog.require(CharacterClass::Mage).unwrap().clone();
    mage.stats.health = LevelCurve::new(80.0, 10.0);
    mage.stats.mana = LevelCurve::new(40.0, 5.0);
    catalog.insert(mage).unwrap();
    catalog
}

fn manager() -> PlayerCharacterManager<InMemoryShelter, OpenFloor> {
    ManagerBuilder::new()
        .catalog(Arc::new(catalog()))
        .config(HeroConfig::default().with_rng_seed(11))
        .build(InMemoryShelter::new(), OpenFloor)
}

#[test]
fn round_trip_reproduces_pools_and_shelter() {
    let mut source = manager();
    source.select_class(CharacterClass::Mage);
    source.set_level(5);
    source.spawn(Position::new(3.0, 4.0)).unwrap();
    let character = source.character_mut().unwrap();
    assert_eq!(character.health().maximum, 120.0);
    assert_eq!(character.mana().maximum, 60.0);
    character.apply_unmitigated_damage(80.0);
    character.drain_mana(50.0);
    source.shelter_character().unwrap();

    let snapshot = source.export_snapshot();
    assert_eq!(snapshot.current_health, 40.0);
    assert_eq!(snapshot.current_mana, 10.0);
    assert!(snapshot.is_in_shelter);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: CharacterSnapshot = serde_json::from_str(&json).unwrap();

    let mut target = manager();
    target.restore_snapshot(&decoded).unwrap();
    let restored = target.character().unwrap();
    assert_eq!(target.level(), 5);
    assert_eq!(target.selected_class(), CharacterClass::Mage);
    assert!((restored.health().current - 40.0).abs() < 1e-3);
    assert!((restored.mana().current - 10.0).abs() < 1e-3);
    assert!(restored.is_in_shelter());
    assert_eq!(target.state(), ManagerState::InShelter);
    assert_eq!(target.shelter().occupancy(), 1);
    assert_eq!(target.export_snapshot(), snapshot);
}

#[test]
fn reviving_snapshot_resumes_countdown() {
    let mut source = manager();
    source.select_class(CharacterClass::Rogue);
    source.spawn(Position::ORIGIN).unwrap();
    let character = source.character_mut().unwrap();
    let health = character.health().maximum;
    character.apply_unmitigated_damage(health);
    source.tick(0.0, &mut NoParty).unwrap();
    source.tick(4.0, &mut NoParty).unwrap();

    let snapshot = source.export_snapshot();
    assert!(snapshot.is_reviving);
    assert!(!snapshot.is_alive);

    let mut target = manager();
    target.restore_snapshot(&snapshot).unwrap();
    assert_eq!(target.state(), ManagerState::Reviving);
    assert_eq!(target.revive_time_remaining(), snapshot.revive_time_remaining);

    let remaining = target.revive_time_remaining();
    target.tick(remaining, &mut NoParty).unwrap();
    assert_eq!(target.state(), ManagerState::InShelter);
}

#[test]
fn empty_snapshot_clears_character() {
    let mut target = manager();
    target.spawn(Position::ORIGIN).unwrap();

    let snapshot = CharacterSnapshot::without_character(CharacterClass::Cleric, 3);
    target.restore_snapshot(&snapshot).unwrap();

    assert_eq!(target.state(), ManagerState::NoCharacter);
    assert_eq!(target.selected_class(), CharacterClass::Cleric);
    assert_eq!(target.level(), 3);
}
