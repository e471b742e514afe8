//! Class catalog definitions and oracle interface.
//!
//! The catalog maps each [`CharacterClass`] to its level curves, ability kit
//! tuning and display metadata. It is loaded once at startup (see the
//! `hero-content` loaders) and never mutated by the simulation.

use std::collections::BTreeMap;

use crate::ability::{ClassBehavior, ClassKit, ClericKit, MageKit, RogueKit, WarriorKit};
use crate::class::CharacterClass;
use crate::stats::{CharacterStats, ClassBaseStats, LevelCurve};

use super::CatalogError;

/// Read-only catalog entry for one class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassData {
    pub class: CharacterClass,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub stats: ClassBaseStats,
    pub kit: ClassKit,
}

impl ClassData {
    /// Stats evaluated at `level`.
    pub fn stats_at(&self, level: u32) -> CharacterStats {
        self.stats.at_level(level)
    }

    /// Revive countdown at `level`, if the class defines one.
    pub fn revive_time(&self, level: u32) -> Option<f32> {
        self.stats.revive_time(level)
    }

    /// Checks that the kit matches the class, every curve is usable and
    /// every timed effect lasts a positive time.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let kit = self.kit.class();
        if kit != self.class {
            return Err(CatalogError::KitMismatch {
                class: self.class,
                kit,
            });
        }
        if let Some(stat) = self.stats.first_invalid_curve() {
            return Err(CatalogError::InvalidCurve {
                class: self.class,
                stat,
            });
        }
        if let Some(field) = self.kit.first_invalid_duration() {
            return Err(CatalogError::InvalidDuration {
                class: self.class,
                field,
            });
        }
        Ok(())
    }
}

/// Oracle providing class content by class identity.
pub trait ClassOracle: Send + Sync {
    /// Returns the catalog entry for `class`, if present.
    fn class_data(&self, class: CharacterClass) -> Option<&ClassData>;

    /// Classes that have a catalog entry, in catalog order.
    fn available_classes(&self) -> Vec<CharacterClass>;

    /// Returns the entry for `class` or [`CatalogError::MissingClass`].
    fn require(&self, class: CharacterClass) -> Result<&ClassData, CatalogError> {
        self.class_data(class)
            .ok_or(CatalogError::MissingClass(class))
    }
}

/// In-memory class catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassCatalog {
    entries: BTreeMap<CharacterClass, ClassData>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from entries, validating each one.
    ///
    /// A later entry for the same class replaces an earlier one.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ClassData>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Validates and registers an entry, returning the one it replaced.
    pub fn insert(&mut self, entry: ClassData) -> Result<Option<ClassData>, CatalogError> {
        entry.validate()?;
        Ok(self.entries.insert(entry.class, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassData> {
        self.entries.values()
    }

    /// The shipped balance for all four classes.
    pub fn builtin() -> Self {
        let entries = [
            ClassData {
                class: CharacterClass::Warrior,
                display_name: "Warrior".into(),
                description: "Front-line bruiser with a heavy power strike.".into(),
                stats: ClassBaseStats {
                    health: LevelCurve::new(150.0, 15.0),
                    mana: LevelCurve::new(40.0, 4.0),
                    attack_power: LevelCurve::new(20.0, 3.0),
                    revive_time: Some(LevelCurve::new(25.0, 2.0)),
                },
                kit: ClassKit::Warrior(WarriorKit::default()),
            },
            ClassData {
                class: CharacterClass::Mage,
                display_name: "Mage".into(),
                description: "Fires magic missiles and shields itself with a barrier.".into(),
                stats: ClassBaseStats {
                    health: LevelCurve::new(80.0, 8.0),
                    mana: LevelCurve::new(60.0, 6.0),
                    attack_power: LevelCurve::new(25.0, 3.0),
                    revive_time: Some(LevelCurve::new(30.0, 2.0)),
                },
                kit: ClassKit::Mage(MageKit::default()),
            },
            ClassData {
                class: CharacterClass::Rogue,
                display_name: "Rogue".into(),
                description: "Quick-stepping striker that hides in the shadows.".into(),
                stats: ClassBaseStats {
                    health: LevelCurve::new(100.0, 10.0),
                    mana: LevelCurve::new(50.0, 5.0),
                    attack_power: LevelCurve::new(22.0, 3.0),
                    revive_time: Some(LevelCurve::new(20.0, 1.5)),
                },
                kit: ClassKit::Rogue(RogueKit::default()),
            },
            ClassData {
                class: CharacterClass::Cleric,
                display_name: "Cleric".into(),
                description: "Blesses and heals the party from a sanctuary.".into(),
                stats: ClassBaseStats {
                    health: LevelCurve::new(90.0, 9.0),
                    mana: LevelCurve::new(80.0, 8.0),
                    attack_power: LevelCurve::new(15.0, 2.0),
                    revive_time: Some(LevelCurve::new(35.0, 2.5)),
                },
                kit: ClassKit::Cleric(ClericKit::default()),
            },
        ];

        let mut catalog = Self::new();
        for entry in entries {
            catalog.entries.insert(entry.class, entry);
        }
        catalog
    }
}

impl ClassOracle for ClassCatalog {
    fn class_data(&self, class: CharacterClass) -> Option<&ClassData> {
        self.entries.get(&class)
    }

    fn available_classes(&self) -> Vec<CharacterClass> {
        self.entries.keys().copied().collect()
    }
}
