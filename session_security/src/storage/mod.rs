mod errors;
mod session_store;
mod types;

pub(crate) use errors::StoreError;
pub(crate) use session_store::{SESSION_STORE, SessionStore};
pub use types::{AttributeValue, SessionHandle};

/// Warm up the configured store and verify it is reachable.
pub(crate) async fn init() -> Result<(), StoreError> {
    SESSION_STORE.lock().await.init().await
}
