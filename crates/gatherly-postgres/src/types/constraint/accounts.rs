use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ConstraintCategory;

/// All database constraints defined on the `accounts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AccountConstraints {
    /// Primary key constraint on the id column.
    #[strum(serialize = "accounts_pkey")]
    PrimaryKey,
    /// Unique constraint on the email address.
    #[strum(serialize = "accounts_email_address_unique")]
    EmailAddressUnique,
    /// Check constraint on the email address format.
    #[strum(serialize = "accounts_email_address_format")]
    EmailAddressFormat,
    /// Check constraint on the display name length.
    #[strum(serialize = "accounts_display_name_length")]
    DisplayNameLength,
}

impl AccountConstraints {
    /// Creates a new [`AccountConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        Self::from_str(constraint).ok()
    }

    /// Returns the category of this constraint.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::PrimaryKey | Self::EmailAddressUnique => ConstraintCategory::Uniqueness,
            Self::EmailAddressFormat | Self::DisplayNameLength => ConstraintCategory::Validation,
        }
    }
}

impl From<AccountConstraints> for String {
    fn from(constraint: AccountConstraints) -> Self {
        constraint.to_string()
    }
}

impl TryFrom<String> for AccountConstraints {
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
        let constraint = AccountConstraints::new("accounts_email_address_unique").unwrap();
        assert_eq!(String::from(constraint), "accounts_email_address_unique");
    }

    #[test]
    fn categorizes_validation_checks() {
        let constraint = AccountConstraints::new("accounts_display_name_length").unwrap();
        assert_eq!(constraint.categorize(), ConstraintCategory::Validation);
    }
}
