use std::env;
use std::sync::LazyLock;

/// Absolute session lifetime in seconds. A session older than this is void
/// regardless of activity.
pub static SESSION_ABSOLUTE_LIFETIME: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_ABSOLUTE_LIFETIME")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10800) // Default to 3 hours if not set or invalid
});

/// Idle timeout in seconds since the last recorded action.
pub static SESSION_IDLE_TIMEOUT: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_IDLE_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1800) // Default to 30 minutes if not set or invalid
});

/// Interval in seconds after which a validated session gets a fresh
/// identifier. Bounds the useful lifetime of a stolen handle.
pub static SESSION_ROTATION_INTERVAL: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_ROTATION_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120)
});
