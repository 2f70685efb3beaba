use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ConstraintCategory;

/// All database constraints defined on the `rsvps` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum RsvpConstraints {
    /// Primary key constraint on the id column.
    #[strum(serialize = "rsvps_pkey")]
    PrimaryKey,
    /// Unique constraint guaranteeing one RSVP per account per event.
    #[strum(serialize = "rsvps_event_id_account_id_unique")]
    EventIdAccountIdUnique,
    /// Foreign key constraint to the events table.
    #[strum(serialize = "rsvps_event_id_fkey")]
    EventIdFkey,
    /// Foreign key constraint to the accounts table.
    #[strum(serialize = "rsvps_account_id_fkey")]
    AccountIdFkey,
    /// Check constraint on the message length.
    #[strum(serialize = "rsvps_message_length")]
    MessageLength,
    /// Check constraint on the plus-ones range.
    #[strum(serialize = "rsvps_plus_ones_range")]
    PlusOnesRange,
}

impl RsvpConstraints {
    /// Creates a new [`RsvpConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        Self::from_str(constraint).ok()
    }

    /// Returns the category of this constraint.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::PrimaryKey | Self::EventIdAccountIdUnique => ConstraintCategory::Uniqueness,
            Self::EventIdFkey | Self::AccountIdFkey => ConstraintCategory::Reference,
            Self::MessageLength | Self::PlusOnesRange => ConstraintCategory::Validation,
        }
    }
}

impl From<RsvpConstraints> for String {
    fn from(constraint: RsvpConstraints) -> Self {
        constraint.to_string()
    }
}

impl TryFrom<String> for RsvpConstraints {
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
        let constraint = RsvpConstraints::new("rsvps_event_id_account_id_unique").unwrap();
        assert_eq!(String::from(constraint), "rsvps_event_id_account_id_unique");
    }

    #[test]
    fn categorizes_uniqueness() {
        let constraint = RsvpConstraints::new("rsvps_event_id_account_id_unique").unwrap();
        assert_eq!(constraint.categorize(), ConstraintCategory::Uniqueness);
    }
}
