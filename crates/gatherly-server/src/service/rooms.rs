//! Per-event broadcast rooms for real-time RSVP notifications.
//!
//! Each event gets its own `tokio::sync::broadcast` channel, created on
//! demand when the first client subscribes and pruned once no subscribers
//! remain. Delivery is at-most-once, lagged receivers skip missed messages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gatherly_postgres::types::{RsvpResponse, RsvpTally};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::TRACING_TARGET_SERVICE as TRACING_TARGET;

/// Capacity of the broadcast channel per event (messages buffered).
const BROADCAST_CAPACITY: usize = 100;

/// Notification published to an event's room after an RSVP changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpNotice {
    /// Event the RSVP belongs to.
    pub event_id: Uuid,
    /// Account that submitted or withdrew the RSVP.
    pub account_id: Uuid,
    /// Display name of the responder.
    pub display_name: String,
    /// The submitted response, `None` when the RSVP was withdrawn.
    pub response: Option<RsvpResponse>,
    /// Tally recomputed after the change was committed.
    pub tally: RsvpTally,
    /// When the change was observed.
    pub timestamp: jiff::Timestamp,
}

/// Registry of per-event broadcast channels.
///
/// Stored in [`ServiceState`] so handlers and the WebSocket endpoint share
/// the same set of rooms. The map lock is a std mutex, critical sections
/// only insert or remove a sender and never await.
///
/// [`ServiceState`]: crate::service::ServiceState
#[derive(Debug, Clone, Default)]
pub struct EventRooms {
    rooms: Arc<Mutex<HashMap<Uuid, broadcast::Sender<RsvpNotice>>>>,
}

impl EventRooms {
    /// Creates an empty room registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the room for an event, creating the room on demand.
    pub fn subscribe(&self, event_id: Uuid) -> broadcast::Receiver<RsvpNotice> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        match rooms.get(&event_id) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = broadcast::channel(BROADCAST_CAPACITY);
                rooms.insert(event_id, sender);

                tracing::debug!(
                    target: TRACING_TARGET,
                    event_id = %event_id,
                    "created broadcast room for event"
                );

                receiver
            }
        }
    }

    /// Publishes a notice to the event's room.
    ///
    /// Returns the number of subscribers the notice was delivered to. A room
    /// without subscribers is pruned and the notice is dropped, publishing
    /// is always best-effort.
    pub fn publish(&self, notice: RsvpNotice) -> usize {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        let Some(sender) = rooms.get(&notice.event_id) else {
            return 0;
        };

        match sender.send(notice) {
            Ok(delivered) => delivered,
            Err(broadcast::error::SendError(notice)) => {
                // All receivers dropped since the room was created.
                rooms.remove(&notice.event_id);

                tracing::debug!(
                    target: TRACING_TARGET,
                    event_id = %notice.event_id,
                    "pruned broadcast room without subscribers"
                );

                0
            }
        }
    }

    /// Removes the event's room if it has no remaining subscribers.
    ///
    /// Called when a WebSocket client leaves a room or disconnects.
    pub fn prune(&self, event_id: Uuid) {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(sender) = rooms.get(&event_id)
            && sender.receiver_count() == 0
        {
            rooms.remove(&event_id);

            tracing::debug!(
                target: TRACING_TARGET,
                event_id = %event_id,
                "pruned broadcast room without subscribers"
            );
        }
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
        rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(event_id: Uuid, account_id: Uuid) -> RsvpNotice {
        RsvpNotice {
            event_id,
            account_id,
            display_name: "Dana".to_owned(),
            response: Some(RsvpResponse::Yes),
            tally: RsvpTally {
                yes: 1,
                no: 0,
                maybe: 0,
                total: 1,
            },
            timestamp: jiff::Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_notice() {
        let rooms = EventRooms::new();
        let event_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();

        let mut receiver = rooms.subscribe(event_id);
        assert_eq!(rooms.publish(notice(event_id, account_id)), 1);

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.event_id, event_id);
        assert_eq!(received.account_id, account_id);
        assert_eq!(received.response, Some(RsvpResponse::Yes));
    }

    #[tokio::test]
    async fn publish_without_room_is_dropped() {
        let rooms = EventRooms::new();
        assert_eq!(rooms.publish(notice(Uuid::new_v4(), Uuid::new_v4())), 0);
        assert_eq!(rooms.room_count(), 0);
    }

    #[tokio::test]
    async fn publish_after_all_receivers_left_prunes_room() {
        let rooms = EventRooms::new();
        let event_id = Uuid::new_v4();

        let receiver = rooms.subscribe(event_id);
        assert_eq!(rooms.room_count(), 1);
        drop(receiver);

        assert_eq!(rooms.publish(notice(event_id, Uuid::new_v4())), 0);
        assert_eq!(rooms.room_count(), 0);
    }

    #[tokio::test]
    async fn prune_keeps_rooms_with_subscribers() {
        let rooms = EventRooms::new();
        let event_id = Uuid::new_v4();

        let _receiver = rooms.subscribe(event_id);
        rooms.prune(event_id);
        assert_eq!(rooms.room_count(), 1);
    }

    #[tokio::test]
    async fn rooms_are_isolated_per_event() {
        let rooms = EventRooms::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut first_rx = rooms.subscribe(first);
        let mut second_rx = rooms.subscribe(second);

        rooms.publish(notice(first, Uuid::new_v4()));

        assert!(first_rx.recv().await.is_ok());
        assert!(second_rx.try_recv().is_err());
    }
}
