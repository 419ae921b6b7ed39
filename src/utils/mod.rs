//! Cross-cutting helpers for the scribegate gateway.
//!
//! # Submodules
//!
//! - `logging`: tracing subscriber initialization.
//! - `retry`: backoff construction and retry classification.

pub mod logging;
pub mod retry;
