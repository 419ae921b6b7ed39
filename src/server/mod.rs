//! Axum-based HTTP server for the scribegate gateway.
//!
//! # Components
//!
//! - `handlers`: implementation of the individual endpoints (chat, fallback,
//!   health, root).
//! - `middleware`: rate-limit admission and request ID layers.
//! - `routes`: the main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
