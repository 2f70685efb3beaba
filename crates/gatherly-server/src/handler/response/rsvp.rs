//! RSVP response types.

use gatherly_postgres::model::{AccountDisplay, Event, EventSummary, Rsvp};
use gatherly_postgres::types::RsvpResponse;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full RSVP payload returned by RSVP endpoints.
///
/// The joined fields are present when the endpoint enriches the row with
/// responder or event columns and omitted otherwise.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDetails {
    /// Unique RSVP identifier.
    pub id: Uuid,
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
    /// Display name of the responder, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_name: Option<String>,
    /// Email address of the responder, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_email: Option<String>,
    /// Title of the event, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    /// Date of the event, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Timestamp>,
    /// Location of the event, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,
    /// Display name of the event's organizer, when joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    /// Timestamp when the RSVP was first submitted.
    pub created_at: Timestamp,
    /// Timestamp when the RSVP was last changed.
    pub updated_at: Timestamp,
}

impl RsvpDetails {
    /// Builds the payload from the database model.
    pub fn from_model(rsvp: Rsvp) -> Self {
        Self {
            id: rsvp.id,
            event_id: rsvp.event_id,
            account_id: rsvp.account_id,
            response: rsvp.response,
            message: rsvp.message,
            plus_ones: rsvp.plus_ones,
            responder_name: None,
            responder_email: None,
            event_title: None,
            event_date: None,
            event_location: None,
            organizer_name: None,
            created_at: rsvp.created_at.into(),
            updated_at: rsvp.updated_at.into(),
        }
    }

    /// Builds the payload from a row joined with the responder's display
    /// fields.
    pub fn from_responder((rsvp, responder): (Rsvp, AccountDisplay)) -> Self {
        Self {
            responder_name: Some(responder.display_name),
            responder_email: Some(responder.email_address),
            ..Self::from_model(rsvp)
        }
    }

    /// Builds the payload from a row joined with the event's summary columns
    /// and its organizer's display name.
    pub fn from_account_listing(
        (rsvp, event, organizer_name): (Rsvp, EventSummary, String),
    ) -> Self {
        Self {
            event_title: Some(event.title),
            event_date: Some(event.event_date.into()),
            event_location: Some(event.location),
            organizer_name: Some(organizer_name),
            ..Self::from_model(rsvp)
        }
    }

    /// Attaches the responder's display name and email.
    pub fn with_responder(mut self, display_name: String, email_address: String) -> Self {
        self.responder_name = Some(display_name);
        self.responder_email = Some(email_address);
        self
    }

    /// Attaches the event's title, date and location.
    pub fn with_event(mut self, event: Event) -> Self {
        self.event_title = Some(event.title);
        self.event_date = Some(event.event_date.into());
        self.event_location = Some(event.location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rsvp() -> Rsvp {
        Rsvp {
            id: Uuid::nil(),
            event_id: Uuid::nil(),
            account_id: Uuid::nil(),
            response: RsvpResponse::Yes,
            message: "Bringing snacks".to_owned(),
            plus_ones: 2,
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
            updated_at: jiff::Timestamp::UNIX_EPOCH.into(),
        }
    }

    #[test]
    fn bare_payload_omits_joined_fields() {
        let details = RsvpDetails::from_model(sample_rsvp());
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["response"], "Yes");
        assert!(json.get("responderName").is_none());
        assert!(json.get("eventTitle").is_none());
    }

    #[test]
    fn responder_join_carries_name_and_email() {
        let responder = AccountDisplay {
            display_name: "Sam Okafor".to_owned(),
            email_address: "sam@example.com".to_owned(),
        };
        let details = RsvpDetails::from_responder((sample_rsvp(), responder));
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["responderName"], "Sam Okafor");
        assert_eq!(json["responderEmail"], "sam@example.com");
    }

    #[test]
    fn account_listing_carries_event_and_organizer_fields() {
        let event = EventSummary {
            title: "Rooftop film night".to_owned(),
            event_date: jiff::Timestamp::UNIX_EPOCH.into(),
            location: "Warehouse 12".to_owned(),
        };
        let details = RsvpDetails::from_account_listing((
            sample_rsvp(),
            event,
            "Priya Raman".to_owned(),
        ));
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["eventTitle"], "Rooftop film night");
        assert_eq!(json["eventLocation"], "Warehouse 12");
        assert_eq!(json["organizerName"], "Priya Raman");
        assert!(json.get("eventDate").is_some());
    }
}
