//! Authentication state extractor with database verification.
//!
//! This module provides [`AuthState`], an extractor that validates the JWT
//! token and then confirms the account it references still exists. Unlike
//! basic JWT validation, this extractor ensures deleted accounts lose access
//! immediately even while their tokens remain cryptographically valid.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use gatherly_postgres::PgClient;
use gatherly_postgres::query::AccountRepository;

use super::{AuthClaims, AuthHeader};
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// Authenticated user state with database verification.
///
/// [`AuthState`] is the primary authentication extractor. When extraction
/// succeeds the caller holds a cryptographically valid token whose account
/// still exists in the database.
///
/// # Performance Characteristics
///
/// - **First Use**: Performs full database verification
/// - **Subsequent Uses**: Uses cached result from request extensions
/// - **Database Impact**: Single existence query per request
///
/// # Error Conditions
///
/// Extraction fails with specific error types for:
/// - [`ErrorKind::MissingAuthToken`]: No Authorization header
/// - [`ErrorKind::MalformedAuthToken`]: Invalid JWT format
/// - [`ErrorKind::Unauthorized`]: Expired token or deleted account
/// - [`ErrorKind::InternalServerError`]: Database or system errors
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Creates a new [`AuthState`] from pre-verified claims.
    ///
    /// This method should only be used when the claims have already undergone
    /// database verification via [`Self::from_unverified_header`]. Using it
    /// with unverified claims bypasses the account existence check.
    #[inline]
    #[must_use]
    pub const fn from_verified_claims(auth_claims: AuthClaims) -> Self {
        Self(auth_claims)
    }

    /// Creates a new [`AuthState`] from an unverified JWT token with database validation.
    ///
    /// The token signature and standard claims have already been validated by
    /// [`AuthHeader`]; this method additionally confirms the referenced
    /// account still exists.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::Unauthorized`]: Account no longer exists
    /// * [`ErrorKind::InternalServerError`]: Database query failures
    pub async fn from_unverified_header(
        auth_header: AuthHeader,
        pg_client: &PgClient,
    ) -> Result<Self> {
        let auth_claims = auth_header.into_auth_claims();

        let account_exists = pg_client
            .account_exists(auth_claims.account_id)
            .await
            .map_err(|db_error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %db_error,
                    account_id = %auth_claims.account_id,
                    token_id = %auth_claims.token_id,
                    "Database error occurred during account validation query"
                );
                ErrorKind::InternalServerError
                    .with_message("Authentication verification is temporarily unavailable")
                    .with_context("Unable to validate account credentials")
            })?;

        if !account_exists {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = %auth_claims.account_id,
                token_id = %auth_claims.token_id,
                "Authentication failed: account referenced in token no longer exists"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Account not found")
                .with_context("Your account may have been deactivated"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %auth_claims.account_id,
            token_id = %auth_claims.token_id,
            is_admin = auth_claims.is_administrator,
            "Authentication verification completed successfully"
        );

        Ok(Self::from_verified_claims(auth_claims))
    }

    /// Returns the authenticated account id.
    #[inline]
    #[must_use]
    pub fn account_id(&self) -> uuid::Uuid {
        self.0.account_id
    }

    /// Returns whether the authenticated account has admin privileges.
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0.is_administrator
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Check for cached auth state to avoid repeated database queries
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        // Extract JWT token and verify the account against the database
        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let pg_client = PgClient::from_ref(state);
        let auth_state = Self::from_unverified_header(auth_header, &pg_client).await?;

        // Cache the verified state for subsequent extractors in the same request
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    PgClient: FromRef<S>,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_state) => Ok(Some(auth_state)),
            Err(_) => Ok(None),
        }
    }
}

impl aide::OperationInput for AuthState {}
