use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid format: {0}")]
    Format(String),
}

pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}

/// Strict numeric form-field parsing. A missing parameter is as invalid as an
/// unparsable one; both surface as a `Format` error.
pub fn parse_numeric(value: Option<&str>) -> Result<i64, UtilError> {
    match value {
        Some(s) => s
            .parse::<i64>()
            .map_err(|e| UtilError::Format(format!("not a number: {e}"))),
        None => Err(UtilError::Format("missing numeric parameter".to_string())),
    }
}
