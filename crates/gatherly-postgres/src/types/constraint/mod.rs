//! Database constraint violations organized by table.
//!
//! This module provides an enumeration of all database constraint violations,
//! organized per table so handlers can map them to precise error responses.

mod accounts;
mod events;
mod rsvps;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::AccountConstraints;
pub use self::events::EventConstraints;
pub use self::rsvps::RsvpConstraints;

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps all table-specific constraint types, providing a single
/// interface for handling any constraint violation while maintaining type
/// safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    Event(EventConstraints),
    Rsvp(RsvpConstraints),
}

/// Categories of database constraint violations.
///
/// This enum helps classify constraint violations by their purpose, making it
/// easier to handle different categories of errors appropriately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
    /// Referential integrity constraints (foreign keys).
    Reference,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatherly_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("rsvps_event_id_account_id_unique");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        let prefix = constraint.split('_').next()?;

        match prefix {
            "accounts" => AccountConstraints::new(constraint).map(Self::Account),
            "events" => EventConstraints::new(constraint).map(Self::Event),
            "rsvps" => RsvpConstraints::new(constraint).map(Self::Rsvp),
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::Event(_) => "events",
            ConstraintViolation::Rsvp(_) => "rsvps",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::Event(c) => c.categorize(),
            ConstraintViolation::Rsvp(c) => c.categorize(),
        }
    }

    /// Returns whether this violation is a uniqueness conflict.
    pub fn is_unique_violation(&self) -> bool {
        self.categorize() == ConstraintCategory::Uniqueness
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => c.fmt(f),
            ConstraintViolation::Event(c) => c.fmt(f),
            ConstraintViolation::Rsvp(c) => c.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraints() {
        let violation = ConstraintViolation::new("accounts_email_address_unique");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Account(
                AccountConstraints::EmailAddressUnique
            ))
        );
        assert_eq!(violation.unwrap().table_name(), "accounts");

        let violation = ConstraintViolation::new("events_invite_token_unique");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Event(
                EventConstraints::InviteTokenUnique
            ))
        );

        let violation = ConstraintViolation::new("rsvps_plus_ones_range");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Rsvp(RsvpConstraints::PlusOnesRange))
        );
    }

    #[test]
    fn rejects_unknown_constraints() {
        assert!(ConstraintViolation::new("projects_name_unique").is_none());
        assert!(ConstraintViolation::new("").is_none());
    }

    #[test]
    fn categorizes_uniqueness() {
        let violation = ConstraintViolation::new("rsvps_event_id_account_id_unique").unwrap();
        assert!(violation.is_unique_violation());

        let violation = ConstraintViolation::new("rsvps_message_length").unwrap();
        assert!(!violation.is_unique_violation());
    }
}
