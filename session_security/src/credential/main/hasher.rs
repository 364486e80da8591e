use ring::pbkdf2;
use ring::rand::SecureRandom;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::credential::config::PASSWORD_KDF_ITERATIONS;
use crate::credential::errors::CredentialError;

/// Salt length in bytes. Every record leads with the hex form of its salt.
const SALT_LEN: usize = 16;
/// SHA-512 digest length in bytes.
const SHA512_DIGEST_LEN: usize = 64;
/// PBKDF2 output length in bytes (256-bit derived key).
const PBKDF2_DIGEST_LEN: usize = 32;

/// Hash a password with the fast-hash family: a single SHA-512 pass over
/// salt and password bytes.
///
/// Materially weaker against offline brute force than the derivation family;
/// kept for legacy-compatible stores and low-threat contexts.
pub fn hash_password_sha512(password: &str) -> Result<String, CredentialError> {
    Ok(sha512_envelope(password, &generate_salt()?))
}

/// Check a password against a record produced by [`hash_password_sha512`].
pub fn verify_password_sha512(password: &str, record: &str) -> Result<bool, CredentialError> {
    let salt = decode_salt(record, SHA512_DIGEST_LEN)?;
    Ok(constant_time_eq(&sha512_envelope(password, &salt), record))
}

/// Hash a password with the derivation family: PBKDF2-HMAC-SHA256 with a
/// configurable iteration count. Preferred for new credentials.
pub fn hash_password_pbkdf2(password: &str) -> Result<String, CredentialError> {
    Ok(pbkdf2_envelope(password, &generate_salt()?))
}

/// Check a password against a record produced by [`hash_password_pbkdf2`].
///
/// Nothing in the record identifies the family that produced it; the caller
/// must pair each stored record with the matching verify function.
pub fn verify_password_pbkdf2(password: &str, record: &str) -> Result<bool, CredentialError> {
    let salt = decode_salt(record, PBKDF2_DIGEST_LEN)?;
    Ok(constant_time_eq(&pbkdf2_envelope(password, &salt), record))
}

fn generate_salt() -> Result<[u8; SALT_LEN], CredentialError> {
    let rng = ring::rand::SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| CredentialError::RandomSource("secure random source unavailable".to_string()))?;
    Ok(salt)
}

fn sha512_envelope(password: &str, salt: &[u8; SALT_LEN]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{}{}", hex::encode(salt), hex::encode(hasher.finalize()))
}

fn pbkdf2_envelope(password: &str, salt: &[u8; SALT_LEN]) -> String {
    let mut digest = [0u8; PBKDF2_DIGEST_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        *PASSWORD_KDF_ITERATIONS,
        salt,
        password.as_bytes(),
        &mut digest,
    );
    format!("{}{}", hex::encode(salt), hex::encode(digest))
}

/// Extract the salt from a stored record, rejecting anything that is not
/// exactly `hex(salt) || hex(digest)` for the given digest length.
fn decode_salt(record: &str, digest_len: usize) -> Result<[u8; SALT_LEN], CredentialError> {
    let expected_len = 2 * (SALT_LEN + digest_len);
    if record.len() != expected_len {
        return Err(CredentialError::MalformedRecord(format!(
            "expected {expected_len} hex characters, got {}",
            record.len()
        )));
    }
    if !record.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CredentialError::MalformedRecord(
            "record contains non-hex characters".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_LEN];
    hex::decode_to_slice(&record[..SALT_LEN * 2], &mut salt)
        .map_err(|e| CredentialError::MalformedRecord(e.to_string()))?;
    Ok(salt)
}

// Equality over the full envelope, salt echo included. Constant-time so the
// comparison leaks nothing about how much of a guessed record matched.
fn constant_time_eq(computed: &str, stored: &str) -> bool {
    computed.as_bytes().ct_eq(stored.as_bytes()).into()
}
