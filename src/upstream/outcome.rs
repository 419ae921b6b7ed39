// Classification of a single upstream attempt

use serde_json::Value;

/// Why an attempt is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// The upstream answered 429.
    RateLimited,
    /// The transport timed out before a response arrived.
    Timeout,
}

/// Result of one upstream call attempt.
///
/// `Retryable` consumes a retry slot and triggers a backoff sleep;
/// `Terminal` ends the request immediately, with the upstream status kept
/// as a hint for the client-facing error.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(Value),
    Retryable(RetryReason),
    Terminal { status: Option<u16>, message: String },
}
