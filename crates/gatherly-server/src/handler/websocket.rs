//! WebSocket handler for real-time RSVP notifications.
//!
//! Clients connect once and manage their room memberships over the socket
//! with `join-event` / `leave-event` messages. The server pushes
//! `rsvp-received` messages for every joined room, skipping notices that
//! originated from the connected account itself. Delivery is at-most-once,
//! a lagged client skips missed notices instead of replaying them.

use std::ops::ControlFlow;

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::extract::ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamMap;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use uuid::Uuid;

use crate::extract::{AuthState, Json};
use crate::handler::response::ErrorResponse;
use crate::handler::Result;
use crate::service::{EventRooms, RsvpNotice, ServiceState};

/// Tracing target for RSVP websocket operations.
const TRACING_TARGET: &str = "gatherly_server::handler::websocket";

/// Maximum size of a WebSocket message in bytes (1 MB).
const MAX_MESSAGE_SIZE: usize = 1_024 * 1_024;

/// Context for a WebSocket connection.
#[derive(Debug, Clone)]
struct WsContext {
    /// Unique connection identifier for logging/debugging.
    connection_id: Uuid,
    /// The authenticated account ID.
    account_id: Uuid,
}

impl WsContext {
    /// Creates a new WebSocket connection context.
    fn new(account_id: Uuid) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            account_id,
        }
    }
}

/// Messages clients send over the socket.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
enum ClientMessage {
    /// Subscribes the connection to an event's room.
    JoinEvent { event_id: Uuid },
    /// Unsubscribes the connection from an event's room.
    LeaveEvent { event_id: Uuid },
}

/// Messages the server pushes to clients.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
enum ServerMessage {
    /// An RSVP changed in one of the joined rooms.
    RsvpReceived {
        #[serde(flatten)]
        notice: RsvpNotice,
    },
}

/// Processes an incoming WebSocket message from the client.
fn process_client_message(
    ctx: &WsContext,
    msg: Message,
    rooms: &EventRooms,
    joined: &mut StreamMap<Uuid, BroadcastStream<RsvpNotice>>,
) -> ControlFlow<(), ()> {
    match msg {
        Message::Text(text) => {
            if text.len() > MAX_MESSAGE_SIZE {
                tracing::warn!(
                    target: TRACING_TARGET,
                    connection_id = %ctx.connection_id,
                    message_size = text.len(),
                    "message exceeds maximum size, dropping"
                );
                return ControlFlow::Continue(());
            }

            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::JoinEvent { event_id }) => {
                    // Idempotent: joining a joined room is a no-op
                    if !joined.contains_key(&event_id) {
                        let receiver = rooms.subscribe(event_id);
                        joined.insert(event_id, BroadcastStream::new(receiver));

                        tracing::debug!(
                            target: TRACING_TARGET,
                            connection_id = %ctx.connection_id,
                            event_id = %event_id,
                            "joined event room"
                        );
                    }
                    ControlFlow::Continue(())
                }
                Ok(ClientMessage::LeaveEvent { event_id }) => {
                    if joined.remove(&event_id).is_some() {
                        rooms.prune(event_id);

                        tracing::debug!(
                            target: TRACING_TARGET,
                            connection_id = %ctx.connection_id,
                            event_id = %event_id,
                            "left event room"
                        );
                    }
                    ControlFlow::Continue(())
                }
                Err(e) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        connection_id = %ctx.connection_id,
                        error = %e,
                        "failed to parse message, dropping"
                    );
                    ControlFlow::Continue(())
                }
            }
        }
        Message::Binary(data) => {
            tracing::debug!(
                target: TRACING_TARGET,
                connection_id = %ctx.connection_id,
                data_length = data.len(),
                "received binary message (not supported), dropping"
            );
            ControlFlow::Continue(())
        }
        Message::Close(close_frame) => {
            if let Some(cf) = close_frame {
                tracing::info!(
                    target: TRACING_TARGET,
                    connection_id = %ctx.connection_id,
                    close_code = cf.code,
                    close_reason = %cf.reason,
                    "client sent close frame"
                );
            } else {
                tracing::info!(
                    target: TRACING_TARGET,
                    connection_id = %ctx.connection_id,
                    "client sent close frame"
                );
            }
            ControlFlow::Break(())
        }
        Message::Ping(_) | Message::Pong(_) => ControlFlow::Continue(()),
    }
}

/// Handles the WebSocket connection lifecycle.
///
/// A single loop multiplexes client messages and broadcast notices from all
/// joined rooms. Disconnecting drops every membership and prunes rooms left
/// without subscribers.
async fn handle_rsvp_websocket(socket: WebSocket, account_id: Uuid, rooms: EventRooms) {
    let start_time = std::time::Instant::now();
    let ctx = WsContext::new(account_id);

    tracing::info!(
        target: TRACING_TARGET,
        connection_id = %ctx.connection_id,
        account_id = %ctx.account_id,
        "websocket connection established"
    );

    let (mut sender, mut receiver) = socket.split();
    let mut joined: StreamMap<Uuid, BroadcastStream<RsvpNotice>> = StreamMap::new();
    let mut notices_sent: u64 = 0;

    loop {
        tokio::select! {
            client_msg = receiver.next() => {
                match client_msg {
                    Some(Ok(msg)) => {
                        if process_client_message(&ctx, msg, &rooms, &mut joined).is_break() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            connection_id = %ctx.connection_id,
                            error = %e,
                            "error receiving from websocket"
                        );
                        break;
                    }
                    None => break,
                }
            }
            Some((event_id, notice)) = joined.next(), if !joined.is_empty() => {
                match notice {
                    Ok(notice) => {
                        // Echo prevention: skip the caller's own notices
                        if notice.account_id == ctx.account_id {
                            continue;
                        }

                        let push = ServerMessage::RsvpReceived { notice };
                        match serde_json::to_string(&push) {
                            Ok(text) => {
                                if let Err(e) =
                                    sender.send(Message::Text(Utf8Bytes::from(text))).await
                                {
                                    tracing::debug!(
                                        target: TRACING_TARGET,
                                        connection_id = %ctx.connection_id,
                                        error = %e,
                                        "failed to send notice, client disconnected"
                                    );
                                    break;
                                }
                                notices_sent += 1;
                            }
                            Err(e) => {
                                tracing::error!(
                                    target: TRACING_TARGET,
                                    connection_id = %ctx.connection_id,
                                    error = %e,
                                    "failed to serialize notice"
                                );
                            }
                        }
                    }
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        // At-most-once delivery, lagged clients skip ahead
                        tracing::warn!(
                            target: TRACING_TARGET,
                            connection_id = %ctx.connection_id,
                            event_id = %event_id,
                            skipped = skipped,
                            "client lagged behind, notices skipped"
                        );
                    }
                }
            }
        }
    }

    // Drop memberships before pruning so empty rooms are removed
    let joined_events: Vec<Uuid> = joined.keys().copied().collect();
    drop(joined);
    for event_id in joined_events {
        rooms.prune(event_id);
    }

    tracing::info!(
        target: TRACING_TARGET,
        connection_id = %ctx.connection_id,
        account_id = %ctx.account_id,
        duration_ms = start_time.elapsed().as_millis(),
        notices_sent = notices_sent,
        "websocket connection closed"
    );
}

/// Establishes the RSVP notification WebSocket connection.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn rsvp_websocket_handler(
    State(rooms): State<EventRooms>,
    AuthState(auth_claims): AuthState,
    ws: WebSocketUpgrade,
) -> Result<Response> {
    let account_id = auth_claims.account_id;

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %account_id,
        "websocket connection requested"
    );

    Ok(ws.on_upgrade(move |socket| handle_rsvp_websocket(socket, account_id, rooms)))
}

fn rsvp_websocket_handler_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Connect to RSVP WebSocket")
        .description(
            "Establishes a WebSocket connection for real-time RSVP notifications. \
             Send join-event / leave-event messages to manage room memberships.",
        )
        .response::<101, ()>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the WebSocket route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/ws", get_with(rsvp_websocket_handler, rsvp_websocket_handler_docs))
        .with_path_items(|item| item.tag("WebSocket"))
}

#[cfg(test)]
mod tests {
    use gatherly_postgres::types::{RsvpResponse, RsvpTally};

    use super::*;

    #[test]
    fn client_messages_use_kebab_case_tags() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"join-event","eventId":"8c4b63d4-5c67-4a3a-9686-7d8b6e5a0f3c"}"#)
                .unwrap();
        assert!(matches!(msg, ClientMessage::JoinEvent { .. }));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"leave-event","eventId":"8c4b63d4-5c67-4a3a-9686-7d8b6e5a0f3c"}"#)
                .unwrap();
        assert!(matches!(msg, ClientMessage::LeaveEvent { .. }));
    }

    #[test]
    fn unknown_client_message_is_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"shout"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn server_message_flattens_notice() {
        let push = ServerMessage::RsvpReceived {
            notice: RsvpNotice {
                event_id: Uuid::new_v4(),
                account_id: Uuid::new_v4(),
                display_name: "Dana".to_owned(),
                response: Some(RsvpResponse::Yes),
                tally: RsvpTally {
                    yes: 1,
                    no: 0,
                    maybe: 0,
                    total: 1,
                },
                timestamp: jiff::Timestamp::now(),
            },
        };

        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["type"], "rsvp-received");
        assert_eq!(json["response"], "Yes");
        assert_eq!(json["tally"]["total"], 1);
    }

    #[tokio::test]
    async fn join_and_leave_manage_room_memberships() {
        let rooms = EventRooms::new();
        let ctx = WsContext::new(Uuid::new_v4());
        let mut joined = StreamMap::new();
        let event_id = Uuid::new_v4();

        let join = Message::Text(Utf8Bytes::from(
            serde_json::to_string(&ClientMessage::JoinEvent { event_id }).unwrap(),
        ));
        assert!(process_client_message(&ctx, join.clone(), &rooms, &mut joined).is_continue());
        assert_eq!(joined.len(), 1);
        assert_eq!(rooms.room_count(), 1);

        // Joining again is a no-op
        assert!(process_client_message(&ctx, join, &rooms, &mut joined).is_continue());
        assert_eq!(joined.len(), 1);

        let leave = Message::Text(Utf8Bytes::from(
            serde_json::to_string(&ClientMessage::LeaveEvent { event_id }).unwrap(),
        ));
        assert!(process_client_message(&ctx, leave, &rooms, &mut joined).is_continue());
        assert_eq!(joined.len(), 0);
        assert_eq!(rooms.room_count(), 0);
    }

    #[tokio::test]
    async fn close_frame_breaks_the_loop() {
        let rooms = EventRooms::new();
        let ctx = WsContext::new(Uuid::new_v4());
        let mut joined = StreamMap::new();

        let flow = process_client_message(&ctx, Message::Close(None), &rooms, &mut joined);
        assert!(flow.is_break());
    }
}
