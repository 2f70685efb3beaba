//! Security primitives: password hashing, strength evaluation and JWT keys.

mod password_hasher;
mod password_strength;
mod session_keys;

pub use password_hasher::PasswordHasher;
pub use password_strength::{CrackTimes, PasswordFeedback, PasswordStrength, PasswordStrengthResult};
pub use session_keys::{SessionKeys, SessionKeysConfig};
