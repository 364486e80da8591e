use async_trait::async_trait;
use redis::{self, AsyncCommands};

use crate::storage::errors::StoreError;
use crate::storage::types::{AttributeValue, SessionHandle};
use crate::utils::gen_random_string;

use super::types::{RedisSessionStore, SessionStore};

const CHANNEL_PREFIX: &str = "session:channel";
const ATTRS_PREFIX: &str = "session:attrs";

impl RedisSessionStore {
    fn channel_key(channel_id: &str) -> String {
        format!("{CHANNEL_PREFIX}:{channel_id}")
    }

    fn attrs_key(handle: &SessionHandle) -> String {
        format!("{ATTRS_PREFIX}:{}", handle.as_str())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn init(&self) -> Result<(), StoreError> {
        // Verify the connection works
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    async fn get(&self, channel_id: &str) -> Result<Option<SessionHandle>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let bound: Option<String> = conn.get(Self::channel_key(channel_id)).await?;
        match bound {
            Some(id) => {
                let handle = SessionHandle::new(id);
                // A binding may outlive its record; only a live record counts.
                let live: bool = conn.exists(Self::attrs_key(&handle)).await?;
                Ok(live.then_some(handle))
            }
            None => Ok(None),
        }
    }

    async fn create(&mut self, channel_id: &str) -> Result<SessionHandle, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let handle = SessionHandle::new(
            gen_random_string(32).map_err(|e| StoreError::Storage(e.to_string()))?,
        );
        // The record materializes with its first attribute write; the binding
        // is what makes the handle reachable from the channel.
        let _: () = conn
            .set(Self::channel_key(channel_id), handle.as_str())
            .await?;
        Ok(handle)
    }

    async fn get_attribute(
        &self,
        handle: &SessionHandle,
        key: &str,
    ) -> Result<Option<AttributeValue>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let value: Option<String> = conn.hget(Self::attrs_key(handle), key).await?;
        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    async fn set_attribute(
        &mut self,
        handle: &SessionHandle,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let value = serde_json::to_string(&value)?;
        let _: () = conn.hset(Self::attrs_key(handle), key, value).await?;
        Ok(())
    }

    async fn attribute_keys(&self, handle: &SessionHandle) -> Result<Vec<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let keys: Vec<String> = conn.hkeys(Self::attrs_key(handle)).await?;
        Ok(keys)
    }

    async fn invalidate(&mut self, handle: &SessionHandle) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let _: () = conn.del(Self::attrs_key(handle)).await?;
        Ok(())
    }
}
