//! Event model covering scheduling, capacity and invite sharing.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::events;
use crate::types::{EventCategory, EventStatus};

/// Main event model representing a planned gathering.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event title shown in listings (3-100 characters).
    pub title: String,
    /// Longer event description (10-500 characters).
    pub description: String,
    /// Moment at which the event takes place.
    pub event_date: Timestamp,
    /// Display time shown alongside the date (e.g. "18:30").
    pub event_time: String,
    /// Venue or address (3-100 characters).
    pub location: String,
    /// Account that created and owns the event.
    pub created_by: Uuid,
    /// Opaque token for invite-link access (unique).
    pub invite_token: String,
    /// Optional attendee capacity, unlimited when absent.
    pub max_attendees: Option<i32>,
    /// Whether the event appears in public listings.
    pub is_public: bool,
    /// Event category used for filtering.
    pub category: EventCategory,
    /// Lifecycle status of the event.
    pub status: EventStatus,
    /// Timestamp when the event was created.
    pub created_at: Timestamp,
    /// Timestamp when the event was last updated.
    pub updated_at: Timestamp,
}

/// Subset of event columns joined onto RSVP rows in listings.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventSummary {
    /// Event title shown in listings.
    pub title: String,
    /// Moment at which the event takes place.
    pub event_date: Timestamp,
    /// Venue or address.
    pub location: String,
}

/// Data for creating a new event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEvent {
    /// Event title shown in listings (3-100 characters).
    pub title: String,
    /// Longer event description (10-500 characters).
    pub description: String,
    /// Moment at which the event takes place.
    pub event_date: Timestamp,
    /// Display time shown alongside the date (e.g. "18:30").
    pub event_time: String,
    /// Venue or address (3-100 characters).
    pub location: String,
    /// Account that creates and owns the event.
    pub created_by: Uuid,
    /// Opaque token for invite-link access.
    pub invite_token: String,
    /// Optional attendee capacity.
    pub max_attendees: Option<i32>,
    /// Whether the event appears in public listings.
    pub is_public: bool,
    /// Event category used for filtering.
    pub category: EventCategory,
}

/// Data for updating an event.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateEvent {
    /// Event title shown in listings.
    pub title: Option<String>,
    /// Longer event description.
    pub description: Option<String>,
    /// Moment at which the event takes place.
    pub event_date: Option<Timestamp>,
    /// Display time shown alongside the date.
    pub event_time: Option<String>,
    /// Venue or address.
    pub location: Option<String>,
    /// Optional attendee capacity.
    pub max_attendees: Option<Option<i32>>,
    /// Whether the event appears in public listings.
    pub is_public: Option<bool>,
    /// Event category used for filtering.
    pub category: Option<EventCategory>,
    /// Lifecycle status of the event.
    pub status: Option<EventStatus>,
}

impl Event {
    /// Returns whether the event still accepts new or updated RSVPs.
    pub fn accepts_rsvps(&self) -> bool {
        self.status.accepts_rsvps()
    }

    /// Returns whether the given account owns this event.
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.created_by == account_id
    }
}

impl UpdateEvent {
    /// Returns whether the changeset carries no field updates.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.event_date.is_none()
            && self.event_time.is_none()
            && self.location.is_none()
            && self.max_attendees.is_none()
            && self.is_public.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }
}
