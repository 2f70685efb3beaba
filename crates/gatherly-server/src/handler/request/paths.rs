//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for event-level operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPathParams {
    /// Unique identifier of the event.
    pub event_id: Uuid,
}

/// Path parameters for invite-link access.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteTokenPathParams {
    /// The invite token shared by the event organizer.
    pub invite_token: String,
}
