// HTTP routes configuration

use super::handlers::{chat_handler, fallback_handler, health_handler, root_handler};
use super::middleware::{rate_limit, request_id_layers};
use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::ratelimit::RateLimiter;
use crate::store::KeyValueStore;
use crate::upstream::UpstreamClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub cache: Arc<ResponseCache>,
    pub limiter: Arc<RateLimiter>,
    pub upstream: Arc<UpstreamClient>,
}

pub fn create_router(
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    upstream: UpstreamClient,
) -> Result<Router> {
    let cache = Arc::new(ResponseCache::new(store.clone(), config.cache.clone()));
    let limiter = Arc::new(RateLimiter::new(store.clone(), config.rate_limit.clone()));

    let state = AppState {
        config,
        store,
        cache,
        limiter,
        upstream: Arc::new(upstream),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/fallback", post(fallback_handler))
        .layer(axum::middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
