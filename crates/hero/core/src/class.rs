//! Character class identity.

/// Playable character classes.
///
/// The class is fixed for the lifetime of a spawned character and selects
/// both its level curve and its ability kit in the catalog.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterClass {
    /// Melee bruiser.
    #[default]
    Warrior,
    /// Ranged caster with barrier and area heal.
    Mage,
    /// Mobile striker with stealth and backstab.
    Rogue,
    /// Party healer with blessing and sanctuary.
    Cleric,
}

impl CharacterClass {
    /// Returns the identifier used in content files and logs.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
