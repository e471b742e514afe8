//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::CharacterEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Class selection changes
    Selection,
    /// Spawn, death and revive
    Lifecycle,
    /// Level changes
    Progression,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Selection, Topic::Lifecycle, Topic::Progression];
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning the bus shares its channels.
#[derive(Clone)]
pub struct EventBus {
    selection: broadcast::Sender<CharacterEvent>,
    lifecycle: broadcast::Sender<CharacterEvent>,
    progression: broadcast::Sender<CharacterEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            selection: broadcast::channel(capacity).0,
            lifecycle: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<CharacterEvent> {
        match topic {
            Topic::Selection => &self.selection,
            Topic::Lifecycle => &self.lifecycle,
            Topic::Progression => &self.progression,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: CharacterEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CharacterEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<CharacterEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
