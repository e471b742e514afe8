use std::sync::Arc;

use hero_core::{
    AbilityKind, Ally, CatalogError, CharacterClass, ClassCatalog, ClassData, ClassKit,
    ClassOracle, GameError, HeroConfig, LevelCurve, NoParty, Party, PartyMember, Position,
};
use hero_runtime::{
    CharacterEvent, InMemoryShelter, LifecycleError, ManagerBuilder, ManagerState, OpenFloor,
    PlayerCharacterManager, Shelter, Topic,
};

fn manager() -> PlayerCharacterManager<InMemoryShelter, OpenFloor> {
    PlayerCharacterManager::new(InMemoryShelter::new(), OpenFloor)
}

fn kill(manager: &mut PlayerCharacterManager<InMemoryShelter, OpenFloor>) {
    let character = manager.character_mut().unwrap();
    let health = character.health().maximum;
    character.apply_unmitigated_damage(health);
}

#[test]
fn level_set_before_spawn_scales_stats() {
    let mut manager = manager();
    manager.select_class(CharacterClass::Warrior);
    manager.set_level(10);
    manager.spawn(Position::ORIGIN).unwrap();

    let expected = ClassCatalog::builtin()
        .require(CharacterClass::Warrior)
        .unwrap()
        .stats_at(10);
    let character = manager.character().unwrap();
    assert_eq!(character.stats(), expected);
    assert_eq!(character.health().current, expected.max_health);
    assert_eq!(character.mana().current, expected.max_mana);
}

#[test]
fn forced_death_starts_catalog_revive_on_next_tick() {
    let mut manager = manager();
    let mut lifecycle = manager.subscribe(Topic::Lifecycle);
    manager.select_class(CharacterClass::Mage);
    manager.set_level(5);
    manager.spawn(Position::ORIGIN).unwrap();
    kill(&mut manager);
    assert_eq!(manager.state(), ManagerState::Active);

    manager.tick(0.1, &mut NoParty).unwrap();
    assert_eq!(manager.state(), ManagerState::Reviving);
    assert_eq!(manager.revive_time_remaining(), 38.0);

    assert!(matches!(lifecycle.try_recv(), Ok(CharacterEvent::Spawned(_))));
    assert!(matches!(
        lifecycle.try_recv(),
        Ok(CharacterEvent::Died { revive_time, level: 5, .. }) if revive_time == 38.0
    ));
}

#[test]
fn repeated_detection_keeps_one_timer() {
    let mut manager = manager();
    let mut lifecycle = manager.subscribe(Topic::Lifecycle);
    manager.spawn(Position::ORIGIN).unwrap();
    kill(&mut manager);

    manager.tick(0.0, &mut NoParty).unwrap();
    let total = manager.revive().unwrap().total();
    manager.tick(1.0, &mut NoParty).unwrap();
    manager.tick(1.0, &mut NoParty).unwrap();

    assert_eq!(manager.revive().unwrap().total(), total);
    assert_eq!(manager.revive_time_remaining(), total - 2.0);

    let deaths = std::iter::from_fn(|| lifecycle.try_recv().ok())
        .filter(|event| matches!(event, CharacterEvent::Died { .. }))
        .count();
    assert_eq!(deaths, 1);
}

#[test]
fn revive_lands_in_shelter_with_full_pools() {
    let mut manager = manager();
    manager.spawn(Position::ORIGIN).unwrap();
    manager.character_mut().unwrap().use_ability(AbilityKind::PowerStrike.into(), &mut NoParty);
    kill(&mut manager);
    manager.tick(0.0, &mut NoParty).unwrap();

    let total = manager.revive().unwrap().total();
    manager.tick(total / 2.0, &mut NoParty).unwrap();
    assert!((manager.revive_progress() - 0.5).abs() < 1e-4);
    manager.tick(total, &mut NoParty).unwrap();

    assert_eq!(manager.state(), ManagerState::InShelter);
    assert_eq!(manager.shelter().occupancy(), 1);
    let character = manager.character().unwrap();
    assert!(character.is_alive());
    assert_eq!(character.health().current, character.health().maximum);
    assert_eq!(character.mana().current, character.mana().maximum);
}

#[test]
fn missing_class_data_falls_back_to_base_revive_time() {
    let mut catalog = ClassCatalog::new();
    let mut data: ClassData = ClassCatalog::builtin()
        .require(CharacterClass::Rogue)
        .unwrap()
        .clone();
    data.stats.revive_time = None;
    catalog.insert(data).unwrap();

    let mut manager = ManagerBuilder::new()
        .catalog(Arc::new(catalog))
        .config(
            HeroConfig::default()
                .with_starting_class(CharacterClass::Rogue)
                .with_base_revive_time(12.0),
        )
        .build(InMemoryShelter::new(), OpenFloor);
    manager.spawn(Position::ORIGIN).unwrap();
    kill(&mut manager);
    manager.tick(0.0, &mut NoParty).unwrap();

    assert_eq!(manager.revive_time_remaining(), 12.0);
}

#[test]
fn spawn_without_catalog_entry_is_configuration_error() {
    let mut manager = ManagerBuilder::new()
        .catalog(Arc::new(ClassCatalog::new()))
        .build(InMemoryShelter::new(), OpenFloor);

    let err = manager.spawn(Position::ORIGIN).unwrap_err();
    assert_eq!(
        err,
        LifecycleError::Configuration {
            class: CharacterClass::Warrior,
            source: CatalogError::MissingClass(CharacterClass::Warrior),
        }
    );
    assert_eq!(err.error_code(), "LIFECYCLE_CONFIGURATION");
    assert_eq!(manager.state(), ManagerState::NoCharacter);
    assert!(manager.available_classes().is_empty());
}

#[test]
fn respawn_replaces_character_and_cancels_revive() {
    let mut manager = manager();
    let first = manager.spawn(Position::ORIGIN).unwrap();
    kill(&mut manager);
    manager.tick(0.0, &mut NoParty).unwrap();
    assert!(manager.is_reviving());

    manager.select_class(CharacterClass::Cleric);
    let second = manager.spawn(Position::new(2.0, 2.0)).unwrap();

    assert_ne!(first, second);
    assert!(!manager.is_reviving());
    assert!(manager.is_character_alive());
    assert_eq!(manager.character().unwrap().class(), CharacterClass::Cleric);
}

#[test]
fn level_changes_propagate_and_notify_once() {
    let mut manager = manager();
    let mut progression = manager.subscribe(Topic::Progression);
    manager.spawn(Position::ORIGIN).unwrap();

    manager.level_up();
    manager.set_level(2);
    manager.set_level(0);

    assert_eq!(manager.level(), 1);
    assert_eq!(manager.character().unwrap().level(), 1);
    assert_eq!(
        progression.try_recv().unwrap(),
        CharacterEvent::LevelChanged {
            previous: 1,
            level: 2
        }
    );
    assert_eq!(
        progression.try_recv().unwrap(),
        CharacterEvent::LevelChanged {
            previous: 2,
            level: 1
        }
    );
    assert!(progression.try_recv().is_err());
}

#[test]
fn selecting_same_class_is_silent() {
    let mut manager = manager();
    let mut selection = manager.subscribe(Topic::Selection);

    manager.select_class(CharacterClass::Warrior);
    assert!(selection.try_recv().is_err());

    manager.select_class(CharacterClass::Mage);
    manager.select_class(CharacterClass::Mage);
    assert_eq!(
        selection.try_recv().unwrap(),
        CharacterEvent::ClassSelected {
            class: CharacterClass::Mage
        }
    );
    assert!(selection.try_recv().is_err());
}

#[test]
fn dropped_subscriber_does_not_break_publishing() {
    let mut manager = manager();
    drop(manager.subscribe(Topic::Lifecycle));
    manager.spawn(Position::ORIGIN).unwrap();
    assert_eq!(manager.events().subscriber_count(Topic::Lifecycle), 0);
}

#[test]
fn kit_from_catalog_drives_abilities() {
    let mut catalog = ClassCatalog::builtin();
    let mut mage = catalog.require(CharacterClass::Mage).unwrap().clone();
    if let ClassKit::Mage(kit) = &mut mage.kit {
        kit.barrier_cost = 10.0;
    }
    mage.stats.mana = LevelCurve::flat(10.0);
    catalog.insert(mage).unwrap();

    let mut manager = ManagerBuilder::new()
        .catalog(Arc::new(catalog))
        .config(HeroConfig::default().with_starting_class(CharacterClass::Mage))
        .build(InMemoryShelter::new(), OpenFloor);
    manager.spawn(Position::ORIGIN).unwrap();

    let character = manager.character_mut().unwrap();
    assert!(character.use_ability(AbilityKind::Barrier.into(), &mut NoParty).is_fired());
    assert_eq!(character.mana().current, 0.0);
}

#[test]
fn manager_tick_runs_idle_support_on_the_party() {
    let mut manager = manager();
    manager.select_class(CharacterClass::Cleric);
    manager.spawn(Position::ORIGIN).unwrap();
    let mut party = Party::new(vec![
        Ally::new("golem", Position::new(2.0, 0.0), 100.0).with_health(30.0),
    ]);

    let report = manager.tick(0.5, &mut party).unwrap().unwrap();
    assert_eq!(report.idle.len(), 1);
    assert_eq!(report.idle[0].kind(), AbilityKind::Heal);
    assert_eq!(party.get(0).unwrap().health(), 52.5);
}
