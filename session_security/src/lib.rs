//! session_security - Session lifecycle and credential hashing core
//!
//! This crate provides the security core of a web application's session
//! handling: validation, identifier rotation, and disposal of channel-bound
//! sessions, plus salted password hashing and verification with two
//! interchangeable algorithm families.
//!
//! Session records live in a pluggable store (in-memory or Redis, selected
//! via `SESSION_STORE_TYPE`); the guard operations only ever talk to the
//! store abstraction.

mod credential;
mod session;
mod storage;
#[cfg(test)]
mod test_utils;
mod utils;

pub use credential::{
    CredentialError, hash_password_pbkdf2, hash_password_sha512, verify_password_pbkdf2,
    verify_password_sha512,
};

pub use session::{
    ATTR_LAST_ACTION, ATTR_LAST_ROTATION, ATTR_ORIGIN_ADDRESS, ATTR_SESSION_START, ATTR_USER_ID,
    ATTR_USERNAME, RequestContext, SESSION_ABSOLUTE_LIFETIME, SESSION_IDLE_TIMEOUT,
    SESSION_ROTATION_INTERVAL, Session, SessionError, create_session, dispose_session,
    validate_session,
};

pub use storage::{AttributeValue, SessionHandle};

pub use utils::{UtilError, parse_numeric};

/// Initialize the session storage layer
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    Ok(())
}
