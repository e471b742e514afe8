/// Where a character is in its death/revive/deploy cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleState {
    /// On the field and able to act.
    #[default]
    Active,
    /// Health reached zero; waiting for the manager's revive countdown.
    Dead,
    /// Held in the shelter until deployed back to the field.
    InShelter,
}
