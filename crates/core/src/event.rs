//! Domain events published once per dialogue turn outcome.
//!
//! The controller publishes one event per outcome. Front ends (or tests) can
//! subscribe to react without coupling to the controller internals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// An in-domain question was answered by the remote model
    QuestionAnswered {
        model: String,
        tokens_used: Option<u32>,
        history_turns: usize,
        timestamp: DateTime<Utc>,
    },

    /// An out-of-domain question got the canned refusal
    QuestionRefused {
        question_preview: String,
        timestamp: DateTime<Utc>,
    },

    /// The completion call failed or timed out; memory was left untouched
    RemoteCallFailed {
        error_message: String,
        timestamp: DateTime<Utc>,
    },

    /// Session memory was cleared
    SessionReset {
        turns_cleared: usize,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::QuestionRefused {
            question_preview: "오늘 날씨 어때".into(),
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            DomainEvent::QuestionRefused {
                question_preview, ..
            } => assert_eq!(question_preview, "오늘 날씨 어때"),
            other => panic!("Expected QuestionRefused, got {other:?}"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(DomainEvent::SessionReset {
            turns_cleared: 0,
            timestamp: Utc::now(),
        });
    }
}
