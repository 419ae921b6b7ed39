// Error taxonomy and HTTP mapping tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use scribegate::error::GatewayError;

#[test]
fn test_status_mapping() {
    let cases = vec![
        (
            GatewayError::InvalidRequest("missing query".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (GatewayError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
        (
            GatewayError::Config("API key not configured".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            GatewayError::UpstreamApi("HTTP 500: boom".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
        (
            GatewayError::UpstreamUnavailable,
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (GatewayError::UpstreamTimeout, StatusCode::GATEWAY_TIMEOUT),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status_code(), expected, "wrong status for {}", error);
    }
}

#[test]
fn test_responses_carry_the_status() {
    let response = GatewayError::RateLimited.into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = GatewayError::UpstreamTimeout.into_response();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::InvalidRequest("missing query".to_string()),
        GatewayError::RateLimited,
        GatewayError::Config("API key not configured".to_string()),
        GatewayError::UpstreamApi("HTTP 500".to_string()),
        GatewayError::UpstreamUnavailable,
        GatewayError::UpstreamTimeout,
        GatewayError::Internal("oops".to_string()),
    ];

    for error in errors {
        assert!(!error.to_string().is_empty());
    }
}

#[test]
fn test_retry_exhaustion_message_names_retries() {
    assert!(GatewayError::UpstreamUnavailable
        .to_string()
        .contains("retries"));
}
