//! Authentication and profile handlers.
//!
//! Provides registration, login and profile management. Login performs a
//! dummy hash verification for unknown accounts so response timing does not
//! reveal whether an email address is registered.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use gatherly_postgres::PgClient;
use gatherly_postgres::model::{Account, NewAccount};
use gatherly_postgres::query::AccountRepository;

use crate::extract::{AuthClaims, AuthHeader, AuthState, Json, ValidateJson};
use crate::handler::request::{Login, Register, UpdateProfile};
use crate::handler::response::{AccountProfile, AuthSession, Envelope, ErrorResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, PasswordStrength, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "gatherly_server::handler::authentication";

/// Issues a signed session for the account.
fn create_session(account: &Account, keys: SessionKeys) -> Result<(AuthHeader, AuthSession)> {
    let auth_claims = AuthClaims::new(account);
    let auth_header = AuthHeader::new(auth_claims, keys);
    let auth_claims = auth_header.as_auth_claims();

    let session = AuthSession {
        token: auth_header.to_bearer_token()?,
        account_id: auth_claims.account_id,
        token_id: auth_claims.token_id,
        issued_at: auth_claims.issued_at(),
        expires_at: auth_claims.expires_at(),
    };

    Ok((auth_header, session))
}

/// Registers a new account.
#[tracing::instrument(skip_all, fields(email = %request.email_address))]
async fn register(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(password_strength): State<PasswordStrength>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Register>,
) -> Result<(StatusCode, AuthHeader, Json<Envelope<AuthSession>>)> {
    tracing::debug!(target: TRACING_TARGET, "Registering account");

    let normalized_email = request.email_address.to_lowercase();

    // Feed identifying inputs to the strength estimator
    let mut user_inputs = vec![request.display_name.as_str()];
    user_inputs.extend(normalized_email.split('@'));
    password_strength.validate_password(&request.password, &user_inputs)?;

    if pg_client
        .find_account_by_email(&normalized_email)
        .await?
        .is_some()
    {
        tracing::warn!(
            target: TRACING_TARGET,
            "Registration rejected: email already in use"
        );
        return Err(ErrorKind::Conflict
            .with_message("An account with this email address already exists.")
            .with_resource("account"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    let account = pg_client
        .create_account(NewAccount {
            display_name: request.display_name,
            email_address: normalized_email,
            password_hash,
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "Account registered"
    );

    let (auth_header, session) = create_session(&account, session_keys)?;
    Ok((StatusCode::CREATED, auth_header, Json(Envelope::new(session))))
}

fn register_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register account")
        .description("Creates a new account and returns a bearer token.")
        .response::<201, Json<Envelope<AuthSession>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Authenticates an account by email and password.
#[tracing::instrument(skip_all, fields(email = %request.email_address))]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, AuthHeader, Json<Envelope<AuthSession>>)> {
    tracing::debug!(target: TRACING_TARGET, "Login attempt");

    let normalized_email = request.email_address.to_lowercase();
    let account = pg_client.find_account_by_email(&normalized_email).await?;

    // Hash even when the account is unknown to keep timing uniform
    let password_valid = match &account {
        Some(account) => password_hasher
            .verify_password(&request.password, &account.password_hash)
            .is_ok(),
        None => password_hasher.verify_dummy_password(&request.password),
    };

    let Some(account) = account.filter(|_| password_valid) else {
        tracing::warn!(target: TRACING_TARGET, "Login failed");
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid email or password.")
            .with_resource("account"));
    };

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "Login successful"
    );

    let (auth_header, session) = create_session(&account, session_keys)?;
    Ok((StatusCode::CREATED, auth_header, Json(Envelope::new(session))))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Login")
        .description("Authenticates an account and returns a bearer token.")
        .response::<201, Json<Envelope<AuthSession>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns the caller's profile.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn get_profile(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<Envelope<AccountProfile>>)> {
    let account = pg_client
        .find_account_by_id(auth_claims.account_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("account"))?;

    let response = Envelope::new(AccountProfile::from_model(account));
    Ok((StatusCode::OK, Json(response)))
}

fn get_profile_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get profile")
        .description("Returns the authenticated account's profile.")
        .response::<200, Json<Envelope<AccountProfile>>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Updates the caller's profile.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn update_profile(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<UpdateProfile>,
) -> Result<(StatusCode, Json<Envelope<AccountProfile>>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating profile");

    if request.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("At least one field must be provided.")
            .with_resource("account"));
    }

    let account = pg_client
        .update_account(auth_claims.account_id, request.into_changes())
        .await?;

    tracing::info!(target: TRACING_TARGET, "Profile updated");

    let response = Envelope::new(AccountProfile::from_model(account));
    Ok((StatusCode::OK, Json(response)))
}

fn update_profile_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update profile")
        .description("Updates the authenticated account's display name or email.")
        .response::<200, Json<Envelope<AccountProfile>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all authentication routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/auth/register", post_with(register, register_docs))
        .api_route("/auth/login", post_with(login, login_docs))
        .api_route(
            "/auth/me",
            get_with(get_profile, get_profile_docs).put_with(update_profile, update_profile_docs),
        )
        .with_path_items(|item| item.tag("Authentication"))
}
