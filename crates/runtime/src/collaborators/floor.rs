use hero_core::Position;

/// Placement validation for deploying a character onto a dungeon floor.
pub trait Floor {
    /// Returns true if the character may be placed at `position` on
    /// `floor_index`.
    fn can_place_character(&self, floor_index: usize, position: Position) -> bool;
}

/// Any `Fn(floor_index, position) -> bool` works as a floor.
impl<F> Floor for F
where
    F: Fn(usize, Position) -> bool,
{
    fn can_place_character(&self, floor_index: usize, position: Position) -> bool {
        self(floor_index, position)
    }
}

/// Floor that accepts every placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFloor;

impl Floor for OpenFloor {
    fn can_place_character(&self, _floor_index: usize, _position: Position) -> bool {
        true
    }
}
