//! RSVP request types.

use gatherly_postgres::model::{NewRsvp, Rsvp};
use gatherly_postgres::types::RsvpResponse;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload for submitting or changing an RSVP.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRsvp {
    /// Attendance response.
    pub response: RsvpResponse,
    /// Optional note to the organizer.
    #[validate(length(max = 200))]
    pub message: Option<String>,
    /// Additional guests brought along.
    #[validate(range(min = 0, max = 10))]
    pub plus_ones: Option<i32>,
}

impl SubmitRsvp {
    /// Converts the request into an upsertable RSVP model.
    ///
    /// The response always overwrites. An omitted `message` or `plusOnes`
    /// keeps the value from the caller's previous RSVP when one exists,
    /// otherwise the column default applies (empty message, zero guests).
    pub fn into_model(self, event_id: Uuid, account_id: Uuid, prior: Option<&Rsvp>) -> NewRsvp {
        NewRsvp {
            event_id,
            account_id,
            response: self.response,
            message: self
                .message
                .or_else(|| prior.map(|rsvp| rsvp.message.clone()))
                .unwrap_or_default(),
            plus_ones: self
                .plus_ones
                .or_else(|| prior.map(|rsvp| rsvp.plus_ones))
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior_rsvp() -> Rsvp {
        Rsvp {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            response: RsvpResponse::Maybe,
            message: "Bringing dessert".to_owned(),
            plus_ones: 2,
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
            updated_at: jiff::Timestamp::UNIX_EPOCH.into(),
        }
    }

    #[test]
    fn guest_counts_validate_at_bounds() {
        for (plus_ones, ok) in [(0, true), (10, true), (11, false), (-1, false)] {
            let request = SubmitRsvp {
                response: RsvpResponse::Yes,
                message: None,
                plus_ones: Some(plus_ones),
            };
            assert_eq!(request.validate().is_ok(), ok, "plus_ones = {plus_ones}");
        }
    }

    #[test]
    fn long_message_is_rejected() {
        let request = SubmitRsvp {
            response: RsvpResponse::Yes,
            message: Some("x".repeat(201)),
            plus_ones: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn omitted_fields_keep_prior_values() {
        let prior = prior_rsvp();
        let request = SubmitRsvp {
            response: RsvpResponse::Yes,
            message: None,
            plus_ones: None,
        };

        let model = request.into_model(prior.event_id, prior.account_id, Some(&prior));
        assert_eq!(model.response, RsvpResponse::Yes);
        assert_eq!(model.message, "Bringing dessert");
        assert_eq!(model.plus_ones, 2);
    }

    #[test]
    fn provided_fields_overwrite_prior_values() {
        let prior = prior_rsvp();
        let request = SubmitRsvp {
            response: RsvpResponse::No,
            message: Some(String::new()),
            plus_ones: Some(0),
        };

        let model = request.into_model(prior.event_id, prior.account_id, Some(&prior));
        assert_eq!(model.response, RsvpResponse::No);
        assert_eq!(model.message, "");
        assert_eq!(model.plus_ones, 0);
    }

    #[test]
    fn first_submission_uses_defaults() {
        let request = SubmitRsvp {
            response: RsvpResponse::Yes,
            message: None,
            plus_ones: None,
        };

        let model = request.into_model(Uuid::new_v4(), Uuid::new_v4(), None);
        assert_eq!(model.message, "");
        assert_eq!(model.plus_ones, 0);
    }
}
