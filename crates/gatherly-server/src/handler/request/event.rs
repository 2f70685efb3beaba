//! Event request types.

use gatherly_postgres::model::{NewEvent, UpdateEvent};
use gatherly_postgres::types::{EventCategory, EventFilter, EventStatus};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::Pagination;

/// Request payload for creating an event.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Title shown in listings.
    #[validate(length(min = 3, max = 100))]
    pub title: String,
    /// Longer event description.
    #[validate(length(min = 10, max = 500))]
    pub description: String,
    /// Moment at which the event takes place.
    #[validate(custom(function = "validate_future_date"))]
    pub event_date: Timestamp,
    /// Display time shown alongside the date (e.g. "18:30").
    #[validate(length(min = 1, max = 16))]
    pub event_time: String,
    /// Venue or address.
    #[validate(length(min = 3, max = 100))]
    pub location: String,
    /// Optional attendee capacity, unlimited when omitted.
    #[validate(range(min = 1))]
    pub max_attendees: Option<i32>,
    /// Whether the event appears in public listings. Defaults to true.
    pub is_public: Option<bool>,
    /// Event category. Defaults to `other`.
    pub category: Option<EventCategory>,
}

impl CreateEvent {
    /// Converts the request into an insertable event model.
    pub fn into_model(self, created_by: Uuid, invite_token: String) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            event_date: self.event_date.into(),
            event_time: self.event_time,
            location: self.location,
            created_by,
            invite_token,
            max_attendees: self.max_attendees,
            is_public: self.is_public.unwrap_or(true),
            category: self.category.unwrap_or_default(),
        }
    }
}

/// Request payload for partially updating an event.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// New title.
    #[validate(length(min = 3, max = 100))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(min = 10, max = 500))]
    pub description: Option<String>,
    /// New date.
    pub event_date: Option<Timestamp>,
    /// New display time.
    #[validate(length(min = 1, max = 16))]
    pub event_time: Option<String>,
    /// New venue or address.
    #[validate(length(min = 3, max = 100))]
    pub location: Option<String>,
    /// New attendee capacity. `null` removes the limit.
    ///
    /// Omitting the field leaves the capacity unchanged.
    #[serde(default, deserialize_with = "deserialize_double_option")]
    pub max_attendees: Option<Option<i32>>,
    /// New visibility.
    pub is_public: Option<bool>,
    /// New category.
    pub category: Option<EventCategory>,
    /// New lifecycle status.
    pub status: Option<EventStatus>,
}

impl UpdateEventRequest {
    /// Converts the request into an event changeset.
    pub fn into_changes(self) -> UpdateEvent {
        UpdateEvent {
            title: self.title,
            description: self.description,
            event_date: self.event_date.map(Into::into),
            event_time: self.event_time,
            location: self.location,
            max_attendees: self.max_attendees,
            is_public: self.is_public,
            category: self.category,
            status: self.status,
        }
    }
}

/// Query parameters for the public event listing.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEvents {
    /// Restricts results to a single category.
    pub category: Option<EventCategory>,
    /// Case-insensitive substring match against title, description and
    /// location.
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// One-based page number.
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u32>,
    /// Maximum number of records to return per page.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl ListEvents {
    /// Returns the storage-level filter for this listing.
    pub fn filter(&self) -> EventFilter {
        EventFilter {
            category: self.category,
            search: self.search.clone(),
        }
    }

    /// Returns the pagination parameters for this listing.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Distinguishes an omitted field from an explicit `null`.
///
/// Serde only calls this when the field is present, so `null` becomes
/// `Some(None)` while an absent field stays `None` via the default.
fn deserialize_double_option<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

/// Rejects event dates in the past.
fn validate_future_date(event_date: &Timestamp) -> Result<(), ValidationError> {
    if *event_date < Timestamp::now() {
        return Err(ValidationError::new("past_date")
            .with_message("Event date cannot be in the past".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateEvent {
        CreateEvent {
            title: "Summer rooftop party".to_owned(),
            description: "Snacks, drinks and a skyline view.".to_owned(),
            event_date: Timestamp::now() + jiff::SignedDuration::from_hours(48),
            event_time: "18:30".to_owned(),
            location: "12 Harbor Street".to_owned(),
            max_attendees: Some(40),
            is_public: None,
            category: Some(EventCategory::Party),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn past_date_is_rejected() {
        let mut request = valid_create();
        request.event_date = Timestamp::now() - jiff::SignedDuration::from_hours(1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn short_title_is_rejected() {
        let mut request = valid_create();
        request.title = "Hi".to_owned();
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut request = valid_create();
        request.max_attendees = Some(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn defaults_applied_in_model() {
        let mut request = valid_create();
        request.is_public = None;
        request.category = None;

        let model = request.into_model(Uuid::new_v4(), Uuid::new_v4().to_string());
        assert!(model.is_public);
        assert_eq!(model.category, EventCategory::Other);
    }

    #[test]
    fn omitted_capacity_is_left_unchanged() {
        let request: UpdateEventRequest = serde_json::from_str(r#"{"title":"New name!"}"#).unwrap();
        assert!(request.max_attendees.is_none());

        let request: UpdateEventRequest =
            serde_json::from_str(r#"{"maxAttendees":null}"#).unwrap();
        assert_eq!(request.max_attendees, Some(None));
    }
}
