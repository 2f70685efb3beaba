//! Application state and dependency injection.

mod config;
mod error;
mod rooms;
mod security;

use gatherly_postgres::PgClient;

pub use crate::service::config::ServiceConfig;
pub use crate::service::error::{Result, ServiceError};
pub use crate::service::rooms::{EventRooms, RsvpNotice};
pub use crate::service::security::{
    CrackTimes, PasswordFeedback, PasswordHasher, PasswordStrength, PasswordStrengthResult,
    SessionKeys, SessionKeysConfig,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub password_strength: PasswordStrength,
    pub session_keys: SessionKeys,
    pub rooms: EventRooms,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database and loads required resources.
    pub async fn new(service_config: ServiceConfig) -> Result<Self> {
        let service_state = Self {
            postgres: service_config.connect_postgres().await?,

            password_hasher: PasswordHasher::new(),
            password_strength: PasswordStrength::new(),
            session_keys: service_config.load_session_keys().await?,
            rooms: EventRooms::new(),
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(password_strength: PasswordStrength);
impl_di!(session_keys: SessionKeys);
impl_di!(rooms: EventRooms);
