// Fixed-window rate limiter tests

mod common;

use common::{MemoryStore, UnreachableStore};
use scribegate::config::RateLimitConfig;
use scribegate::ratelimit::{Admission, RateLimiter};
use std::sync::Arc;

fn limiter(store: Arc<dyn scribegate::store::KeyValueStore>) -> RateLimiter {
    RateLimiter::new(
        store,
        RateLimitConfig {
            max_requests: 60,
            window_seconds: 60,
        },
    )
}

#[tokio::test]
async fn test_sixty_first_request_in_window_rejected() {
    let limiter = limiter(Arc::new(MemoryStore::default()));
    let now = 1_000_000;

    for _ in 0..60 {
        assert_eq!(limiter.admit_at("1.2.3.4", now).await, Admission::Admitted);
    }
    assert_eq!(limiter.admit_at("1.2.3.4", now).await, Admission::Rejected);
}

#[tokio::test]
async fn test_counter_resets_when_window_rolls_over() {
    let limiter = limiter(Arc::new(MemoryStore::default()));
    let now = 1_000_020;

    for _ in 0..61 {
        limiter.admit_at("1.2.3.4", now).await;
    }
    assert_eq!(limiter.admit_at("1.2.3.4", now).await, Admission::Rejected);

    // Next fixed window starts a fresh counter
    let next_window = now + 60;
    assert_eq!(
        limiter.admit_at("1.2.3.4", next_window).await,
        Admission::Admitted
    );
}

#[tokio::test]
async fn test_clients_are_counted_independently() {
    let limiter = limiter(Arc::new(MemoryStore::default()));
    let now = 1_000_000;

    for _ in 0..61 {
        limiter.admit_at("1.2.3.4", now).await;
    }
    assert_eq!(limiter.admit_at("1.2.3.4", now).await, Admission::Rejected);
    assert_eq!(limiter.admit_at("5.6.7.8", now).await, Admission::Admitted);
}

#[tokio::test]
async fn test_store_outage_fails_open() {
    let limiter = limiter(Arc::new(UnreachableStore));

    // Admission must not depend on the store being reachable
    for _ in 0..100 {
        assert_eq!(
            limiter.admit_at("1.2.3.4", 1_000_000).await,
            Admission::Admitted
        );
    }
}
