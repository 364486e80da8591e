use chrono::{DateTime, Utc};

use crate::storage::SessionHandle;

// Persisted attribute keys. Stable naming contract: existing stores carrying
// these keys stay readable across releases.
pub const ATTR_SESSION_START: &str = "session-start";
pub const ATTR_LAST_ACTION: &str = "last-action";
pub const ATTR_LAST_ROTATION: &str = "last-rotation";
pub const ATTR_ORIGIN_ADDRESS: &str = "origin-address";
pub const ATTR_USER_ID: &str = "user-id";
pub const ATTR_USERNAME: &str = "username";

/// Per-request view of the client channel: which channel token the request
/// carried, where it came from, and when it arrived.
///
/// The timestamp is captured at construction, so every time comparison made
/// while handling one request sees the same instant. `at` takes an explicit
/// instant for callers that need a deterministic clock.
#[derive(Debug, Clone)]
pub struct RequestContext {
    channel_id: String,
    remote_origin: String,
    received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(channel_id: &str, remote_origin: &str) -> Self {
        Self::at(channel_id, remote_origin, Utc::now())
    }

    pub fn at(channel_id: &str, remote_origin: &str, received_at: DateTime<Utc>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            remote_origin: remote_origin.to_string(),
            received_at,
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn remote_origin(&self) -> &str {
        &self.remote_origin
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Read-out of a validated or freshly created session. The store owns the
/// authoritative record; this snapshot is never written back wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub handle: SessionHandle,
    pub user_id: i64,
    pub username: Option<String>,
    pub origin_address: String,
    pub created_at: DateTime<Utc>,
    pub last_action_at: Option<DateTime<Utc>>,
    pub last_rotated_at: Option<DateTime<Utc>>,
}
