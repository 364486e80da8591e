use std::num::NonZeroU32;
use std::{env, sync::LazyLock};

const DEFAULT_KDF_ITERATIONS: NonZeroU32 = NonZeroU32::new(65536).unwrap();

/// PBKDF2 iteration count. The CPU cost of the derivation family scales
/// linearly with this value.
pub(super) static PASSWORD_KDF_ITERATIONS: LazyLock<NonZeroU32> = LazyLock::new(|| {
    let iterations = match env::var("PASSWORD_KDF_ITERATIONS").ok() {
        None => DEFAULT_KDF_ITERATIONS,
        Some(v) => match v.parse::<u32>().ok().and_then(NonZeroU32::new) {
            Some(n) => n,
            None => {
                tracing::warn!(
                    "Invalid PASSWORD_KDF_ITERATIONS: {}. Using default {}",
                    v,
                    DEFAULT_KDF_ITERATIONS
                );
                DEFAULT_KDF_ITERATIONS
            }
        },
    };

    if iterations < DEFAULT_KDF_ITERATIONS {
        tracing::warn!(
            "PASSWORD_KDF_ITERATIONS set to {}, below the default {}. Derived hashes become cheaper to brute-force offline",
            iterations,
            DEFAULT_KDF_ITERATIONS
        );
    }

    iterations
});
