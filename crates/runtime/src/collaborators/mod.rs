//! Capabilities the manager consults but does not own.
//!
//! The shelter (holding area for revived or retreating characters) and the
//! floor placement system live elsewhere in the game. The manager only asks
//! them yes/no questions through these traits.

mod floor;
mod shelter;

pub use floor::{Floor, OpenFloor};
pub use shelter::{InMemoryShelter, Shelter};
