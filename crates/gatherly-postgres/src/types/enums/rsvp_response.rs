//! RSVP response enumeration.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// An attendee's answer to an event invitation.
///
/// This enumeration corresponds to the `RSVP_RESPONSE` PostgreSQL enum.
/// The wire representation keeps the capitalized form used by clients.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::RsvpResponse"]
pub enum RsvpResponse {
    /// Attendee will attend
    #[db_rename = "yes"]
    #[serde(rename = "Yes")]
    #[strum(serialize = "Yes")]
    Yes,

    /// Attendee will not attend
    #[db_rename = "no"]
    #[serde(rename = "No")]
    #[strum(serialize = "No")]
    No,

    /// Attendee is undecided
    #[db_rename = "maybe"]
    #[serde(rename = "Maybe")]
    #[strum(serialize = "Maybe")]
    Maybe,
}

impl RsvpResponse {
    /// Returns whether this response counts toward attendance.
    #[inline]
    pub fn is_attending(self) -> bool {
        matches!(self, RsvpResponse::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_capitalized() {
        let json = serde_json::to_string(&RsvpResponse::Maybe).unwrap();
        assert_eq!(json, "\"Maybe\"");

        let parsed: RsvpResponse = serde_json::from_str("\"Yes\"").unwrap();
        assert_eq!(parsed, RsvpResponse::Yes);
    }

    #[test]
    fn lowercase_is_rejected() {
        assert!(serde_json::from_str::<RsvpResponse>("\"yes\"").is_err());
    }
}
