// Upstream completion API client with bounded retry and backoff

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};
use crate::models::CompletionRequest;
use crate::upstream::outcome::{AttemptOutcome, RetryReason};
use crate::utils::retry;
use backoff::backoff::Backoff;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Client for the upstream chat-completions endpoint.
///
/// Holds the pooled HTTP client and the retry policy. The credential is
/// required at construction time so a misconfigured deployment fails at
/// startup rather than on the first request.
#[derive(Debug)]
pub struct UpstreamClient {
    http_client: Client,
    config: UpstreamConfig,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            error!("Upstream API key not configured");
            GatewayError::Config("API key not configured".to_string())
        })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created upstream HTTP client with connection pooling");

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// Resolve a query against the upstream, retrying transient failures.
    ///
    /// At most `max_attempts` calls are made; between retryable attempts the
    /// task sleeps the next backoff interval. Only this request's task is
    /// suspended. Returns the upstream payload verbatim on success.
    pub async fn complete(&self, query: &str) -> Result<Value> {
        let payload = CompletionRequest::for_query(
            query,
            &self.config.model,
            self.config.temperature,
            self.config.max_tokens,
        );

        let mut backoff =
            retry::build_backoff(Duration::from_millis(self.config.backoff_base_ms));
        let mut last_retry_reason = RetryReason::RateLimited;

        for attempt in 1..=self.config.max_attempts {
            info!(
                "Calling upstream API (attempt {}/{})",
                attempt, self.config.max_attempts
            );

            match self.attempt(&payload).await {
                AttemptOutcome::Success(body) => {
                    if attempt > 1 {
                        debug!("Upstream call succeeded on attempt {}", attempt);
                    }
                    return Ok(body);
                }
                AttemptOutcome::Terminal { status, message } => {
                    error!(
                        "Upstream API error (status {:?}): {}",
                        status, message
                    );
                    return Err(GatewayError::UpstreamApi(message));
                }
                AttemptOutcome::Retryable(reason) => {
                    last_retry_reason = reason;
                    if attempt == self.config.max_attempts {
                        break;
                    }
                    let wait = backoff
                        .next_backoff()
                        .unwrap_or(Duration::from_secs(60));
                    warn!(
                        "Upstream attempt {} failed ({:?}), retrying in {}ms",
                        attempt,
                        reason,
                        wait.as_millis()
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }

        error!("All upstream retries failed");
        Err(match last_retry_reason {
            RetryReason::Timeout => GatewayError::UpstreamTimeout,
            RetryReason::RateLimited => GatewayError::UpstreamUnavailable,
        })
    }

    /// Make one upstream call and classify its outcome.
    async fn attempt(&self, payload: &CompletionRequest) -> AttemptOutcome {
        let response = match self
            .http_client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Timeout calling upstream API");
                return AttemptOutcome::Retryable(RetryReason::Timeout);
            }
            Err(e) => {
                return AttemptOutcome::Terminal {
                    status: None,
                    message: format!("HTTP error: {}", e),
                };
            }
        };

        let status = response.status();

        if retry::is_retryable_status(status.as_u16()) {
            warn!("Rate limited by upstream API");
            return AttemptOutcome::Retryable(RetryReason::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return AttemptOutcome::Terminal {
                status: Some(status.as_u16()),
                message: format!("Error from upstream API: HTTP {}: {}", status, error_text),
            };
        }

        match response.json::<Value>().await {
            Ok(body) => AttemptOutcome::Success(body),
            Err(e) if e.is_timeout() => {
                warn!("Timeout reading upstream response body");
                AttemptOutcome::Retryable(RetryReason::Timeout)
            }
            Err(e) => AttemptOutcome::Terminal {
                status: Some(status.as_u16()),
                message: format!("Invalid upstream response: {}", e),
            },
        }
    }
}
