//! Account and authentication response types.

use gatherly_postgres::model::Account;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of an account.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    /// Unique account identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub display_name: String,
    /// Primary email address.
    pub email_address: String,
    /// Whether the account has administrative privileges.
    pub is_admin: bool,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

impl AccountProfile {
    /// Builds a profile from the database model.
    ///
    /// The password hash never leaves the handler layer.
    pub fn from_model(account: Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            email_address: account.email_address,
            is_admin: account.is_admin,
            created_at: account.created_at.into(),
            updated_at: account.updated_at.into(),
        }
    }
}

/// Session details returned after successful registration or login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// The signed JWT bearer token.
    pub token: String,
    /// ID of the authenticated account.
    pub account_id: Uuid,
    /// ID of the issued token.
    pub token_id: Uuid,
    /// Timestamp when the token was issued.
    pub issued_at: Timestamp,
    /// Timestamp when the token expires.
    pub expires_at: Timestamp,
}
