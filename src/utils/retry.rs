// Backoff construction and retry classification

use backoff::ExponentialBackoff;
use std::time::Duration;

/// Build the exponential backoff schedule used between upstream retries.
///
/// Starting from `initial` and doubling each step, with no randomization:
/// with the default 2s base the waits are 2s, 4s, 8s. The attempt cap lives
/// in the retry loop, so the schedule itself never gives up.
pub fn build_backoff(initial: Duration) -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: initial,
        initial_interval: initial,
        randomization_factor: 0.0,
        multiplier: 2.0,
        max_interval: Duration::from_secs(60),
        max_elapsed_time: None,
        ..Default::default()
    }
}

/// Whether an upstream HTTP status consumes a retry slot.
///
/// Only upstream throttling is retried; every other non-success status is
/// terminal for the request. Transport timeouts are classified separately.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoff::backoff::Backoff;

    #[test]
    fn test_backoff_doubles_without_jitter() {
        let mut backoff = build_backoff(Duration::from_secs(2));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(2)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(4)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(8)));
    }

    #[test]
    fn test_backoff_never_exhausts() {
        let mut backoff = build_backoff(Duration::from_millis(10));
        for _ in 0..32 {
            assert!(backoff.next_backoff().is_some());
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(500));
        assert!(!is_retryable_status(502));
        assert!(!is_retryable_status(503));
    }
}
