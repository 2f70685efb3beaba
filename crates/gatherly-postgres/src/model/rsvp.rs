//! RSVP model linking accounts to events with a response.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::rsvps;
use crate::types::RsvpResponse;

/// A single account's response to a single event.
///
/// The `(event_id, account_id)` pair is unique, so repeated submissions
/// update the existing row instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = rsvps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rsvp {
    /// Unique RSVP identifier.
    pub id: Uuid,
    /// Event this response belongs to.
    pub event_id: Uuid,
    /// Account that submitted the response.
    pub account_id: Uuid,
    /// Attendance response.
    pub response: RsvpResponse,
    /// Optional note to the organizer (up to 200 characters).
    pub message: String,
    /// Additional guests brought along (0-10).
    pub plus_ones: i32,
    /// Timestamp when the RSVP was first submitted.
    pub created_at: Timestamp,
    /// Timestamp when the RSVP was last changed.
    pub updated_at: Timestamp,
}

/// Data for creating a new RSVP.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rsvps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRsvp {
    /// Event this response belongs to.
    pub event_id: Uuid,
    /// Account that submitted the response.
    pub account_id: Uuid,
    /// Attendance response.
    pub response: RsvpResponse,
    /// Optional note to the organizer.
    pub message: String,
    /// Additional guests brought along.
    pub plus_ones: i32,
}
