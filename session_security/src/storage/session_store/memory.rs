use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::errors::StoreError;
use crate::storage::types::{AttributeValue, SessionHandle};
use crate::utils::gen_random_string;

use super::types::{InMemorySessionStore, SessionStore};

impl InMemorySessionStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self {
            channels: HashMap::new(),
            sessions: HashMap::new(),
        }
    }

    fn issue_handle() -> Result<SessionHandle, StoreError> {
        let id = gen_random_string(32).map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(SessionHandle::new(id))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn get(&self, channel_id: &str) -> Result<Option<SessionHandle>, StoreError> {
        // A binding may outlive its record; only a live record counts.
        Ok(self
            .channels
            .get(channel_id)
            .filter(|handle| self.sessions.contains_key(*handle))
            .cloned())
    }

    async fn create(&mut self, channel_id: &str) -> Result<SessionHandle, StoreError> {
        let handle = Self::issue_handle()?;
        self.sessions.insert(handle.clone(), HashMap::new());
        self.channels.insert(channel_id.to_string(), handle.clone());
        Ok(handle)
    }

    async fn get_attribute(
        &self,
        handle: &SessionHandle,
        key: &str,
    ) -> Result<Option<AttributeValue>, StoreError> {
        Ok(self
            .sessions
            .get(handle)
            .and_then(|attributes| attributes.get(key))
            .cloned())
    }

    async fn set_attribute(
        &mut self,
        handle: &SessionHandle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError> {
        match self.sessions.get_mut(handle) {
            Some(attributes) => {
                attributes.insert(key.to_string(), value);
                Ok(())
            }
            None => Err(StoreError::Storage(format!(
                "unknown session handle: {handle}"
            ))),
        }
    }

    async fn attribute_keys(&self, handle: &SessionHandle) -> Result<Vec<String>, StoreError> {
        Ok(self
            .sessions
            .get(handle)
            .map(|attributes| attributes.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn invalidate(&mut self, handle: &SessionHandle) -> Result<(), StoreError> {
        self.sessions.remove(handle);
        self.channels.retain(|_, bound| bound != handle);
        Ok(())
    }
}
