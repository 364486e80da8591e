use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Infrastructure failure reaching the session store. Distinct from a
    /// rejected session, which is reported as an absent session instead.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
