//! Plain value types shared by every character module.
mod common;
mod lifecycle;

pub use common::{CharacterId, Position, ResourceMeter};
pub use lifecycle::LifecycleState;
