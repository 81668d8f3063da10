//! In-process booking event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Shared via `Arc<EventBus>` in the API state. Publishing never blocks and
//! never fails; events published with no subscriber are dropped.

use bucketlist_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::booking::BookingEvent;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A [`BookingEvent`] as delivered to subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    #[serde(flatten)]
    pub event: BookingEvent,
    /// The user whose request caused the event, when there was one.
    pub actor_user_id: Option<DbId>,
    pub occurred_at: Timestamp,
}

/// Fan-out hub for booking events.
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Stamp `event` and hand it to every current subscriber.
    pub fn publish(&self, event: BookingEvent, actor_user_id: Option<DbId>) {
        tracing::debug!(
            event = event.name(),
            booking_id = event.booking_id(),
            subscribers = self.sender.receiver_count(),
            "Publishing booking event"
        );
        let envelope = EventEnvelope {
            event,
            actor_user_id,
            occurred_at: Utc::now(),
        };
        // SendError only means there are zero receivers.
        let _ = self.sender.send(envelope);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
