// HTTP middleware

use super::routes::AppState;
use crate::error::GatewayError;
use crate::ratelimit::Admission;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Admission-control middleware for the `/api/` endpoints.
///
/// Every API request is gated on the fixed-window rate limiter before the
/// handler runs; non-API paths (health, root) pass straight through.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !request.uri().path().starts_with("/api/") {
        return next.run(request).await;
    }

    let client = client_identity(&request);
    match state.limiter.admit(&client).await {
        Admission::Admitted => next.run(request).await,
        Admission::Rejected => GatewayError::RateLimited.into_response(),
    }
}

/// Identify the caller for rate-limit bucketing.
///
/// Prefers the first `X-Forwarded-For` hop (the gateway typically sits
/// behind a reverse proxy), then the peer socket address.
fn client_identity(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        let forwarded = forwarded.trim();
        if !forwarded.is_empty() {
            return forwarded.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
