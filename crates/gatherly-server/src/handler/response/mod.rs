//! Response types for HTTP handlers.

use gatherly_postgres::types::RsvpTally;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod account;
mod error_response;
mod event;
mod monitor;
mod rsvp;

pub use account::{AccountProfile, AuthSession};
pub use error_response::ErrorResponse;
pub use event::EventDetails;
pub use monitor::{DatabaseStatus, HealthStatus};
pub use rsvp::RsvpDetails;

/// Uniform success envelope for API responses.
///
/// Every successful response carries `success: true` and the payload under
/// `data`. List endpoints add `count` (items in this page) and `total`
/// (items matching the query); RSVP endpoints add the per-event tally under
/// `stats`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}Envelope")]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Always true for successful responses.
    pub success: bool,
    /// The response payload.
    pub data: T,
    /// Number of items in this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Total number of items matching the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    /// Aggregated RSVP counts for the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RsvpTally>,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Wraps a payload in a success envelope.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            total: None,
            stats: None,
            message: None,
        }
    }

    /// Attaches the number of items in this response.
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Attaches the total number of matching items.
    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Attaches the per-event RSVP tally.
    pub fn with_stats(mut self, stats: RsvpTally) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Attaches a human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_success_flag() {
        let envelope = Envelope::new(42);
        let json = serde_json::to_string(&envelope).unwrap();

        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":42"));
        assert!(!json.contains("count"));
    }

    #[test]
    fn list_envelope_carries_counts() {
        let envelope = Envelope::new(vec![1, 2, 3]).with_count(3).with_total(12);
        let json = serde_json::to_string(&envelope).unwrap();

        assert!(json.contains("\"count\":3"));
        assert!(json.contains("\"total\":12"));
    }
}
