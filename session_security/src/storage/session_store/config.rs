use std::{env, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{InMemorySessionStore, RedisSessionStore, SessionStore};

pub(crate) static SESSION_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_STORE_TYPE")
        .ok()
        .unwrap_or("memory".to_string())
});

pub(crate) static SESSION_STORE: LazyLock<Mutex<Box<dyn SessionStore>>> = LazyLock::new(|| {
    let store_type = SESSION_STORE_TYPE.as_str();

    tracing::info!("Initializing session store with type: {}", store_type);

    let store: Box<dyn SessionStore> = match store_type {
        "memory" => Box::new(InMemorySessionStore::new()),
        "redis" => {
            let store_url = env::var("SESSION_STORE_URL")
                .expect("SESSION_STORE_URL must be set for the redis session store");
            let client = match redis::Client::open(store_url.as_str()) {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!("Failed to create Redis client: {}", e);
                    panic!("Failed to create Redis client: {e}");
                }
            };
            Box::new(RedisSessionStore { client })
        }
        t => panic!("Unsupported session store type: {t}. Supported types are 'memory' and 'redis'"),
    };

    Mutex::new(store)
});
