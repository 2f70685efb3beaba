//! Account model for authentication and profile management.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;

/// Main account model representing a registered user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Administrative privileges across the entire system.
    pub is_admin: bool,
    /// Human-readable name for UI and communications (2-100 characters).
    pub display_name: String,
    /// Primary email for authentication (validated format, unique).
    pub email_address: String,
    /// Securely hashed password.
    pub password_hash: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Public-facing account columns joined onto other rows.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountDisplay {
    /// Human-readable name for UI and communications.
    pub display_name: String,
    /// Primary email of the account.
    pub email_address: String,
}

/// Data for creating a new account.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Human-readable name for UI and communications (2-100 characters).
    pub display_name: String,
    /// Primary email for authentication (validated format, unique).
    pub email_address: String,
    /// Securely hashed password.
    pub password_hash: String,
}

/// Data for updating an account.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAccount {
    /// Human-readable name for UI and communications.
    pub display_name: Option<String>,
    /// Primary email for authentication.
    pub email_address: Option<String>,
    /// Securely hashed password.
    pub password_hash: Option<String>,
    /// Administrative privileges.
    pub is_admin: Option<bool>,
}

impl Account {
    /// Returns whether the account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
