//! Fixed-window admission control.
//!
//! One counter exists per (client, window) pair, kept in the shared store so
//! every gateway worker sees the same counts. Windows are aligned to fixed
//! wall-clock boundaries; a burst straddling a boundary can briefly admit up
//! to twice the nominal limit, which is an accepted property of the scheme.

use crate::config::RateLimitConfig;
use crate::store::KeyValueStore;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

/// Truncate a unix timestamp to its fixed-window identifier.
pub fn window_id(now_secs: u64, window_seconds: u64) -> u64 {
    now_secs / window_seconds
}

/// Per-client fixed-window rate limiter over the shared store.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Check whether a request from `client` is admitted right now.
    pub async fn admit(&self, client: &str) -> Admission {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.admit_at(client, now).await
    }

    /// Admission check against an explicit clock reading.
    ///
    /// Increments the counter for the client's current window; the first
    /// increment in a window also arms the window-length expiry so stale
    /// counters vanish on their own. If the store is unreachable the check
    /// fails open: a store outage must not take the whole service down.
    pub async fn admit_at(&self, client: &str, now_secs: u64) -> Admission {
        let window = window_id(now_secs, self.config.window_seconds);
        let key = format!("ratelimit:{}:{}", client, window);

        let count = match self.store.incr(&key).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Rate limiter store error, failing open: {}", e);
                return Admission::Admitted;
            }
        };

        if count == 1 {
            if let Err(e) = self
                .store
                .expire(&key, self.config.window_seconds as i64)
                .await
            {
                warn!("Failed to set expiry on rate-limit key {}: {}", key, e);
            }
        }

        if count > i64::from(self.config.max_requests) {
            warn!("Rate limit exceeded for client: {}", client);
            Admission::Rejected
        } else {
            Admission::Admitted
        }
    }
}
