//! Password hashing and verification using Argon2id.
//!
//! Hashing and verification return handler errors directly so HTTP handlers
//! can propagate them with `?` without remapping.

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

/// Target identifier for password hashing logging.
const TRACING_TARGET: &str = "gatherly_server::service::password_hasher";

/// Password hashing and verification service using Argon2id.
///
/// Uses the default Argon2id parameters, which follow current OWASP
/// recommendations.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        Self { argon2 }
    }

    /// Hashes a password with a fresh cryptographically secure random salt.
    ///
    /// Returns a PHC string that includes the algorithm, parameters, salt and
    /// hash value. It can be stored directly in the database.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to generate cryptographically secure salt"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_context("Salt generation error")
                .with_resource("authentication")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC string hash.
    ///
    /// Returns `ErrorKind::Unauthorized` for incorrect passwords and
    /// `ErrorKind::InternalServerError` for malformed hashes or system
    /// failures. Error messages never reveal why verification failed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "Invalid password hash format provided"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication system temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "Password verification successful"
                );

                Ok(())
            }
            Err(ArgonError::Password) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "Password verification failed: incorrect password provided"
                );

                Err(ErrorKind::Unauthorized
                    .with_message("Authentication failed")
                    .with_context("Invalid credentials")
                    .with_resource("authentication"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Password verification system error"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Performs a dummy password verification to maintain consistent timing.
    ///
    /// Used when an account does not exist so login attempts against unknown
    /// email addresses take roughly the same time as real verifications.
    /// Always returns `false` but performs actual cryptographic work.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        use rand::Rng;

        let password_len = rand::random_range(16..32);
        let dummy_password: String = (0..password_len)
            .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
            .collect();

        // Hash the dummy password and verify against it. The verification
        // always fails but takes the same time as a real one.
        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErrorKind;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let password = "secure_password_123";
        let hash = hasher.hash_password(password)?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password(password, &hash).is_ok());
        assert!(hasher.verify_password("wrong_password", &hash).is_err());

        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let password = "test_password";

        let hash1 = hasher.hash_password(password)?;
        let hash2 = hasher.hash_password(password)?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password(password, &hash1).is_ok());
        assert!(hasher.verify_password(password, &hash2).is_ok());

        Ok(())
    }

    #[test]
    fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct_password")?;

        let error = hasher
            .verify_password("wrong_password", &hash)
            .expect_err("wrong password must fail verification");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);

        Ok(())
    }

    #[test]
    fn invalid_hash_is_internal_error() {
        let hasher = PasswordHasher::new();

        let error = hasher
            .verify_password("test_password", "not_a_valid_hash_format")
            .expect_err("invalid hash must fail verification");
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_always_fails() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("any_password"));
    }
}
