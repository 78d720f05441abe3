//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use mon_core::CurseStateChangeEvent;

use super::types::{CaptureEvent, CombatEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Curse cycle transitions
    Curse,
    /// Resolved punches
    Combat,
    /// Resolved capture attempts
    Capture,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Curse, Topic::Combat, Topic::Capture];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Curse(CurseStateChangeEvent),
    Combat(CombatEvent),
    Capture(CaptureEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Curse(_) => Topic::Curse,
            Event::Combat(_) => Topic::Combat,
            Event::Capture(_) => Topic::Capture,
        }
    }
}

#[derive(Debug)]
struct Channels {
    curse: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    capture: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Curse => &self.curse,
            Topic::Combat => &self.combat,
            Topic::Capture => &self.capture,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events nobody listens
/// to are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                curse: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                capture: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mon_core::{CyclePhase, TransitionCause};
    use std::time::Duration;

    fn rest_event() -> Event {
        Event::Curse(CurseStateChangeEvent {
            phase: CyclePhase::Rest,
            curse: None,
            remaining: Duration::from_secs(60),
            cause: TransitionCause::Cancelled,
        })
    }

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut curse_rx = bus.subscribe(Topic::Curse);
        let mut combat_rx = bus.subscribe(Topic::Combat);

        bus.publish(rest_event());

        assert_eq!(curse_rx.recv().await.expect("curse event"), rest_event());
        assert!(matches!(
            combat_rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(rest_event());
        let clone = bus.clone();
        let receivers = clone.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 3);
    }
}
