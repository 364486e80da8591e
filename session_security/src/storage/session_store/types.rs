use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::errors::StoreError;
use crate::storage::types::{AttributeValue, SessionHandle};

pub(crate) struct InMemorySessionStore {
    pub(super) channels: HashMap<String, SessionHandle>,
    pub(super) sessions: HashMap<SessionHandle, HashMap<String, AttributeValue>>,
}

pub(crate) struct RedisSessionStore {
    pub(super) client: redis::Client,
}

/// Channel-correlated session records.
///
/// Each channel is bound to at most one live handle; each handle owns a flat
/// attribute map. The store issues handles, it never accepts caller-chosen
/// ones.
#[async_trait]
pub(crate) trait SessionStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StoreError>;

    /// Resolve the handle currently bound to a channel, if its record is live.
    async fn get(&self, channel_id: &str) -> Result<Option<SessionHandle>, StoreError>;

    /// Issue a fresh handle and bind it to the channel, replacing any
    /// previous binding.
    async fn create(&mut self, channel_id: &str) -> Result<SessionHandle, StoreError>;

    /// Read a single attribute from a session record.
    async fn get_attribute(
        &self,
        handle: &SessionHandle,
        key: &str,
    ) -> Result<Option<AttributeValue>, StoreError>;

    /// Write a single attribute on a session record.
    async fn set_attribute(
        &mut self,
        handle: &SessionHandle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError>;

    /// Enumerate the attribute keys present on a session record.
    async fn attribute_keys(&self, handle: &SessionHandle) -> Result<Vec<String>, StoreError>;

    /// Destroy a session record. Unknown handles are a no-op.
    async fn invalidate(&mut self, handle: &SessionHandle) -> Result<(), StoreError>;
}
