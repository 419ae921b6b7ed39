// Shared test fixtures: in-memory store and a scripted upstream server
#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use scribegate::config::{AppConfig, UpstreamConfig};
use scribegate::error::{GatewayError, Result};
use scribegate::store::KeyValueStore;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for Redis. TTLs are accepted and ignored; tests that
/// care about windows drive the limiter clock explicitly.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());
        let next = entry.parse::<i64>().unwrap_or(0) + 1;
        *entry = next.to_string();
        Ok(next)
    }

    async fn expire(&self, _key: &str, _seconds: i64) -> Result<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_ex(&self, key: &str, value: &str, _seconds: u64) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Store whose every operation fails, simulating a Redis outage.
pub struct UnreachableStore;

fn store_error() -> GatewayError {
    GatewayError::Store(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "simulated store outage",
    )))
}

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn incr(&self, _key: &str) -> Result<i64> {
        Err(store_error())
    }

    async fn expire(&self, _key: &str, _seconds: i64) -> Result<()> {
        Err(store_error())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(store_error())
    }

    async fn set_ex(&self, _key: &str, _value: &str, _seconds: u64) -> Result<()> {
        Err(store_error())
    }

    async fn ping(&self) -> Result<()> {
        Err(store_error())
    }
}

/// Upstream config pointed at a test server, with fast backoff.
pub fn upstream_config(api_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        api_url: api_url.to_string(),
        api_key: Some("test-key".to_string()),
        connect_timeout_seconds: 5,
        request_timeout_seconds: 5,
        backoff_base_ms: 10,
        ..UpstreamConfig::default()
    }
}

/// Full gateway config pointed at a test upstream.
pub fn app_config(api_url: &str) -> AppConfig {
    AppConfig {
        upstream: upstream_config(api_url),
        ..AppConfig::default()
    }
}

type ScriptedState = (Arc<Mutex<VecDeque<(u16, Value)>>>, Arc<AtomicUsize>);

async fn scripted_handler(State((script, hits)): State<ScriptedState>) -> (StatusCode, Json<Value>) {
    hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((200, json!({})));
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

/// Spawn an upstream test server that answers with the scripted
/// (status, body) sequence in order, then plain 200s. Returns the endpoint
/// URL and a counter of calls received.
pub async fn spawn_scripted_upstream(script: Vec<(u16, Value)>) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state: ScriptedState = (Arc::new(Mutex::new(VecDeque::from(script))), hits.clone());

    let app = Router::new()
        .route("/v1/chat/completions", post(scripted_handler))
        .with_state(state);

    serve(app, hits).await
}

type SlowState = (std::time::Duration, Arc<AtomicUsize>);

async fn slow_handler(State((delay, hits)): State<SlowState>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(delay).await;
    Json(json!({"choices": [{"message": {"content": "late"}}]}))
}

/// Spawn an upstream test server that stalls each response by `delay`,
/// for driving the transport-timeout path.
pub async fn spawn_slow_upstream(delay: std::time::Duration) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state: SlowState = (delay, hits.clone());

    let app = Router::new()
        .route("/v1/chat/completions", post(slow_handler))
        .with_state(state);

    serve(app, hits).await
}

async fn serve(app: Router, hits: Arc<AtomicUsize>) -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1/chat/completions", addr), hits)
}
