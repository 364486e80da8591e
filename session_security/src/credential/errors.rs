use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    /// The stored record cannot be decoded: wrong length for the algorithm
    /// family, or non-hex content. Callers should surface this as a generic
    /// authentication failure, indistinguishable from a wrong password.
    #[error("Malformed password record: {0}")]
    MalformedRecord(String),

    /// No cryptographically secure random source is available. Credential
    /// creation aborts; there is no fallback to a weaker generator.
    #[error("Random source error: {0}")]
    RandomSource(String),
}
