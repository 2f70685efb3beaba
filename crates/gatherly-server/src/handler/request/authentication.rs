//! Authentication and profile request types.

use gatherly_postgres::model::UpdateAccount;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for account registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    /// Display name of the account.
    #[validate(length(min = 2, max = 100))]
    pub display_name: String,
    /// Email address of the account.
    #[validate(email)]
    pub email_address: String,
    /// Password of the account.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Email address of the account.
    #[validate(email)]
    pub email_address: String,
    /// Password of the account.
    pub password: String,
}

/// Request payload for updating the caller's profile.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New display name.
    #[validate(length(min = 2, max = 100))]
    pub display_name: Option<String>,
    /// New email address.
    #[validate(email)]
    pub email_address: Option<String>,
}

impl UpdateProfile {
    /// Returns whether the request carries no field updates.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email_address.is_none()
    }

    /// Converts the request into an account changeset.
    ///
    /// Email addresses are normalized to lowercase before storage.
    pub fn into_changes(self) -> UpdateAccount {
        UpdateAccount {
            display_name: self.display_name,
            email_address: self.email_address.map(|email| email.to_lowercase()),
            password_hash: None,
            is_admin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_short_display_name() {
        let request = Register {
            display_name: "x".to_owned(),
            email_address: "dana@example.com".to_owned(),
            password: "correct horse battery staple".to_owned(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn register_rejects_invalid_email() {
        let request = Register {
            display_name: "Dana".to_owned(),
            email_address: "not-an-email".to_owned(),
            password: "correct horse battery staple".to_owned(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn profile_update_normalizes_email() {
        let request = UpdateProfile {
            display_name: None,
            email_address: Some("Dana@Example.COM".to_owned()),
        };

        let changes = request.into_changes();
        assert_eq!(changes.email_address.as_deref(), Some("dana@example.com"));
        assert!(changes.display_name.is_none());
    }

    #[test]
    fn empty_profile_update_is_detected() {
        assert!(UpdateProfile::default().is_empty());
    }
}
