//! Upstream chat-completion client.
//!
//! Wraps the third-party completion endpoint with per-attempt timeouts, a
//! bounded retry loop, and exponential backoff between retryable failures.
//!
//! # Components
//!
//! - `client`: the reqwest-based caller and its retry loop.
//! - `outcome`: classification of a single upstream attempt.

pub mod client;
pub mod outcome;

pub use client::UpstreamClient;
pub use outcome::{AttemptOutcome, RetryReason};
