// HTTP request handlers

use super::routes::AppState;
use crate::error::GatewayError;
use crate::models::{extract_content, ChatRequest, CompletionEnvelope};
use axum::http::StatusCode;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Handler for `POST /api/chat`.
///
/// Checks the response cache first; on a miss resolves the query against the
/// upstream and hands the payload through verbatim. The cache write happens
/// in a detached task so the response never waits on the store.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, GatewayError> {
    let req: ChatRequest = serde_json::from_str(&body).map_err(|e| {
        warn!("Failed to deserialize chat request: {}", e);
        GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;
    let query = req.query;
    let preview: String = query.chars().take(30).collect();

    if let Some(cached) = state.cache.lookup(&query).await {
        info!("Cache hit for query: {}...", preview);
        return Ok(Json(CompletionEnvelope::from_content(cached)).into_response());
    }

    info!("Cache miss, calling upstream for query: {}...", preview);
    let start = std::time::Instant::now();
    let data = state.upstream.complete(&query).await?;
    debug!("Upstream call completed in {:.2}s", start.elapsed().as_secs_f64());

    if let Some(content) = extract_content(&data) {
        let cache = state.cache.clone();
        tokio::spawn(async move {
            cache.store(&query, &content).await;
        });
    }

    Ok(Json(data).into_response())
}

/// Handler for `POST /api/fallback`.
///
/// Canned offline responses used when the upstream is unavailable, keyed on
/// simple patterns in the query.
pub async fn fallback_handler(body: String) -> Result<Json<CompletionEnvelope>, GatewayError> {
    let req: ChatRequest = serde_json::from_str(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("JSON deserialization error: {}", e)))?;

    let content = fallback_content(&req.query);
    Ok(Json(CompletionEnvelope::from_content(content)))
}

/// Pick a canned response for a query.
pub fn fallback_content(query: &str) -> String {
    let query = query.to_lowercase();

    if ["hello", "hi", "hey"].iter().any(|w| query.contains(w)) {
        "Hello! How can I help you today?".to_string()
    } else if query.contains("time") {
        let now = chrono::Local::now().format("%H:%M:%S");
        format!("The current time is {}.", now)
    } else if query.contains("joke") {
        "Why don't scientists trust atoms? Because they make up everything!".to_string()
    } else if query.contains("thank") {
        "You're welcome! Is there anything else I can help with?".to_string()
    } else {
        "I'm currently in offline mode. Some features may be limited.".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Handler for `GET /health`; pings the shared store.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let mut checks = HashMap::new();

    let (overall_status, http_status) = match state.store.ping().await {
        Ok(()) => {
            checks.insert(
                "redis".to_string(),
                HealthCheck {
                    status: "ok".to_string(),
                    message: "connected".to_string(),
                },
            );
            (HealthStatus::Healthy, StatusCode::OK)
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            checks.insert(
                "redis".to_string(),
                HealthCheck {
                    status: "error".to_string(),
                    message: e.to_string(),
                },
            );
            (HealthStatus::Unhealthy, StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    checks.insert(
        "upstream".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API endpoint: {}", state.config.upstream.api_url),
        },
    );

    let body = HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (http_status, Json(body)).into_response()
}

/// Handler for `GET /`; service metadata and endpoint listing.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "scribegate",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": [
            {"path": "/api/chat", "method": "POST", "description": "Process chat requests"},
            {"path": "/api/fallback", "method": "POST", "description": "Fallback responses"},
            {"path": "/health", "method": "GET", "description": "Health check"}
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_greeting() {
        let content = fallback_content("Hi there");
        assert!(content.starts_with("Hello!"));
    }

    #[test]
    fn test_fallback_time() {
        let content = fallback_content("What time is it?");
        assert!(content.starts_with("The current time is"));
    }

    #[test]
    fn test_fallback_joke() {
        let content = fallback_content("Tell me a joke");
        assert!(content.contains("atoms"));
    }

    #[test]
    fn test_fallback_thanks() {
        let content = fallback_content("Thanks a lot");
        assert!(content.starts_with("You're welcome"));
    }

    #[test]
    fn test_fallback_default() {
        let content = fallback_content("explain quantum entanglement");
        assert!(content.contains("offline mode"));
    }
}
