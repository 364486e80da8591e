//! Shared test initialization
//!
//! Centralized setup so every test sees the same environment configuration
//! and a warmed-up session store.

use std::sync::Once;

/// Load the test environment and make sure the global session store is
/// usable.
///
/// Environment variables come from `.env_test` (falling back to `.env`),
/// loaded once per process; tests default to the in-memory store when
/// nothing is configured.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
        if std::env::var("SESSION_STORE_TYPE").is_err() {
            unsafe { std::env::set_var("SESSION_STORE_TYPE", "memory") };
        }
    });

    if let Err(e) = crate::storage::init().await {
        eprintln!("Warning: failed to initialize session store: {e}");
    }
}
