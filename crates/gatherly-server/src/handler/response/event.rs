//! Event response types.

use gatherly_postgres::model::Event;
use gatherly_postgres::types::{EventCategory, EventStatus};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full event payload returned by event endpoints.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Unique event identifier.
    pub id: Uuid,
    /// Title shown in listings.
    pub title: String,
    /// Longer event description.
    pub description: String,
    /// Moment at which the event takes place.
    pub event_date: Timestamp,
    /// Display time shown alongside the date.
    pub event_time: String,
    /// Venue or address.
    pub location: String,
    /// Account that created and owns the event.
    pub created_by: Uuid,
    /// Display name of the organizer, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    /// Token for invite-link access.
    pub invite_token: String,
    /// Optional attendee capacity.
    pub max_attendees: Option<i32>,
    /// Whether the event appears in public listings.
    pub is_public: bool,
    /// Event category.
    pub category: EventCategory,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Timestamp when the event was created.
    pub created_at: Timestamp,
    /// Timestamp when the event was last updated.
    pub updated_at: Timestamp,
}

impl EventDetails {
    /// Builds the payload from the database model.
    pub fn from_model(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date.into(),
            event_time: event.event_time,
            location: event.location,
            created_by: event.created_by,
            organizer_name: None,
            invite_token: event.invite_token,
            max_attendees: event.max_attendees,
            is_public: event.is_public,
            category: event.category,
            status: event.status,
            created_at: event.created_at.into(),
            updated_at: event.updated_at.into(),
        }
    }

    /// Builds the payload from a model joined with the organizer's name.
    pub fn from_joined((event, organizer_name): (Event, String)) -> Self {
        Self {
            organizer_name: Some(organizer_name),
            ..Self::from_model(event)
        }
    }

    /// Attaches the organizer's display name.
    pub fn with_organizer(mut self, organizer_name: String) -> Self {
        self.organizer_name = Some(organizer_name);
        self
    }
}
