// Response cache over the shared store

use crate::cache::key::derive_key;
use crate::config::CacheConfig;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-through cache for resolved query responses.
///
/// Store faults never surface to the request path: a failed read behaves as
/// a miss and a failed write is logged and dropped. Entries are written with
/// a TTL and are only ever replaced wholesale or left to expire.
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Look up a previously cached response for `query`.
    ///
    /// Returns `None` on a miss and on any store fault.
    pub async fn lookup(&self, query: &str) -> Option<String> {
        let key = derive_key(&self.config.key_prefix, query);
        match self.store.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache lookup failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Write a resolved response with the configured TTL.
    ///
    /// Intended to run in a detached task after the response has been sent;
    /// a write failure is logged, never propagated.
    pub async fn store(&self, query: &str, value: &str) {
        let key = derive_key(&self.config.key_prefix, query);
        match self
            .store
            .set_ex(&key, value, self.config.ttl_seconds)
            .await
        {
            Ok(()) => debug!("Response cached with key: {}", key),
            Err(e) => warn!("Cache write failed for key {}: {}", key, e),
        }
    }
}
