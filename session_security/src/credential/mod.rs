mod config;
mod errors;
mod main;

pub use errors::CredentialError;
pub use main::{
    hash_password_pbkdf2, hash_password_sha512, verify_password_pbkdf2, verify_password_sha512,
};
