use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ConstraintCategory;

/// All database constraints defined on the `events` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum EventConstraints {
    /// Primary key constraint on the id column.
    #[strum(serialize = "events_pkey")]
    PrimaryKey,
    /// Unique constraint on the invite token.
    #[strum(serialize = "events_invite_token_unique")]
    InviteTokenUnique,
    /// Foreign key constraint to the accounts table.
    #[strum(serialize = "events_created_by_fkey")]
    CreatedByFkey,
    /// Check constraint on the title length.
    #[strum(serialize = "events_title_length")]
    TitleLength,
    /// Check constraint on the description length.
    #[strum(serialize = "events_description_length")]
    DescriptionLength,
    /// Check constraint on the location length.
    #[strum(serialize = "events_location_length")]
    LocationLength,
    /// Check constraint on the minimum attendee capacity.
    #[strum(serialize = "events_max_attendees_min")]
    MaxAttendeesMin,
}

impl EventConstraints {
    /// Creates a new [`EventConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        Self::from_str(constraint).ok()
    }

    /// Returns the category of this constraint.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::PrimaryKey | Self::InviteTokenUnique => ConstraintCategory::Uniqueness,
            Self::CreatedByFkey => ConstraintCategory::Reference,
            Self::TitleLength
            | Self::DescriptionLength
            | Self::LocationLength
            | Self::MaxAttendeesMin => ConstraintCategory::Validation,
        }
    }
}

impl From<EventConstraints> for String {
    fn from(constraint: EventConstraints) -> Self {
        constraint.to_string()
    }
}

impl TryFrom<String> for EventConstraints {
    type Error = strum::ParseError;

    fn try_from(constraint: String) -> Result<Self, Self::Error> {
        Self::from_str(&constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_constraint_names() {
        let constraint = EventConstraints::new("events_invite_token_unique").unwrap();
        assert_eq!(String::from(constraint), "events_invite_token_unique");
    }

    #[test]
    fn categorizes_foreign_keys() {
        let constraint = EventConstraints::new("events_created_by_fkey").unwrap();
        assert_eq!(constraint.categorize(), ConstraintCategory::Reference);
    }
}
