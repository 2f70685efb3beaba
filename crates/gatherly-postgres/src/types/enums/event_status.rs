//! Event status enumeration for event lifecycle tracking.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the current lifecycle status of an event.
///
/// This enumeration corresponds to the `EVENT_STATUS` PostgreSQL enum. Only
/// active events accept new or updated RSVPs.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::EventStatus"]
pub enum EventStatus {
    /// Event is upcoming and accepting RSVPs
    #[db_rename = "active"]
    #[serde(rename = "active")]
    #[strum(serialize = "active")]
    #[default]
    Active,

    /// Event was cancelled by its owner
    #[db_rename = "cancelled"]
    #[serde(rename = "cancelled")]
    #[strum(serialize = "cancelled")]
    Cancelled,

    /// Event already took place
    #[db_rename = "completed"]
    #[serde(rename = "completed")]
    #[strum(serialize = "completed")]
    Completed,
}

impl EventStatus {
    /// Returns whether events with this status accept RSVP writes.
    #[inline]
    pub fn accepts_rsvps(self) -> bool {
        matches!(self, EventStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_accepts_rsvps() {
        assert!(EventStatus::Active.accepts_rsvps());
        assert!(!EventStatus::Cancelled.accepts_rsvps());
        assert!(!EventStatus::Completed.accepts_rsvps());
    }

    #[test]
    fn parses_from_wire_name() {
        assert_eq!("active".parse::<EventStatus>(), Ok(EventStatus::Active));
        assert_eq!(
            "cancelled".parse::<EventStatus>(),
            Ok(EventStatus::Cancelled)
        );
        assert!("archived".parse::<EventStatus>().is_err());
    }
}
