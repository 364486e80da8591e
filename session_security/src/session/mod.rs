mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_ABSOLUTE_LIFETIME, SESSION_IDLE_TIMEOUT, SESSION_ROTATION_INTERVAL};
pub use errors::SessionError;
pub use main::{create_session, dispose_session, validate_session};
pub use types::{
    ATTR_LAST_ACTION, ATTR_LAST_ROTATION, ATTR_ORIGIN_ADDRESS, ATTR_SESSION_START, ATTR_USER_ID,
    ATTR_USERNAME, RequestContext, Session,
};
