//! Configuration data structures for the scribegate gateway.
//!
//! This module defines the schema for the application settings, covering the
//! HTTP server, the Redis store, the upstream completion API, cache and
//! rate-limit policy, and logging.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis store settings.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Upstream chat-completion API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Response cache policy.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Per-client rate-limit policy.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the tokio runtime.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the shared Redis store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis hostname. Default: `localhost`
    #[serde(default = "default_redis_host")]
    pub host: String,

    /// Redis port. Default: `6379`
    #[serde(default = "default_redis_port")]
    pub port: u16,

    /// Logical database index. Default: `0`
    #[serde(default)]
    pub db: i64,
}

impl RedisConfig {
    /// Connection URL in the form `redis://host:port/db`.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

/// Settings for the upstream chat-completion API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL of the chat-completions endpoint.
    /// Default: Groq's OpenAI-compatible endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the upstream API. Falls back to the `GROQ_API_KEY`
    /// environment variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model requested from the upstream. Default: `llama3-8b-8192`
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature. Default: `0.7`
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token budget. Default: `1024`
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// TCP connect timeout in seconds. Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Overall request timeout in seconds. Default: `30`
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Maximum upstream attempts per request (1 initial + retries).
    /// Default: `4`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff interval in milliseconds; each retry doubles it.
    /// Default: `2000`
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

/// Policy for the query-response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in seconds. Default: `3600`
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Key namespace, kept disjoint from rate-limit keys. Default: `chat:`
    #[serde(default = "default_cache_prefix")]
    pub key_prefix: String,
}

/// Policy for per-client admission control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per client per window. Default: `60`
    #[serde(default = "default_rate_limit")]
    pub max_requests: u32,

    /// Window length in seconds. Default: `60`
    #[serde(default = "default_rate_window")]
    pub window_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_redis_host(),
            port: default_redis_port(),
            db: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
            key_prefix: default_cache_prefix(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_rate_limit(),
            window_seconds: default_rate_window(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    4
}

fn default_backoff_base_ms() -> u64 {
    2000
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_cache_prefix() -> String {
    "chat:".to_string()
}

fn default_rate_limit() -> u32 {
    60
}

fn default_rate_window() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
