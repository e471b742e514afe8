//! Topic-based notifications for character lifecycle changes.
//!
//! The manager publishes a [`CharacterEvent`] for every externally visible
//! transition. Consumers subscribe to the topics they need and may drop
//! their receiver at any time; publishing never blocks and never fails.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::CharacterEvent;
