//! Shared key-value store access.
//!
//! All cross-request state (rate-limit counters, cached responses) lives in
//! Redis. The [`KeyValueStore`] trait is the seam between the gateway's
//! policy components and the store transport, so tests can substitute an
//! in-memory implementation.

use crate::config::RedisConfig;
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

/// Atomic single-key operations the gateway relies on.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Increment the integer at `key` by 1, creating it at 0 first if absent.
    /// Returns the value after the increment.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Set the key's time-to-live.
    async fn expire(&self, key: &str, seconds: i64) -> Result<()>;

    /// Fetch the string value at `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key` with a time-to-live.
    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<()>;

    /// Round-trip liveness check.
    async fn ping(&self) -> Result<()>;
}

/// Redis-backed store using a multiplexed connection.
///
/// `ConnectionManager` is a cheap-to-clone handle over one multiplexed
/// connection with automatic reconnect; each operation clones it rather than
/// checking a connection out of a pool, so there is no handle to leak on an
/// error path.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis and establish the managed connection.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        info!("Connecting to Redis at {}:{}", config.host, config.port);
        let client = redis::Client::open(config.url())?;
        let manager = client.get_connection_manager().await?;
        debug!("Redis connection established");
        Ok(Self { manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        let count: i64 = conn.incr(key, 1).await?;
        Ok(count)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.expire(key, seconds).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
