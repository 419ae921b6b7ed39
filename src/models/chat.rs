//! Chat request and completion envelope types.
//!
//! The gateway passes the upstream payload through verbatim on a cache miss,
//! so the typed envelope here only covers what the gateway itself constructs
//! (cache-hit responses) or extracts (the assistant message content).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// One message in the upstream conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: String,
}

/// Request body sent to the upstream chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn for_query(
        query: &str,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: Some("user".to_string()),
                content: query.to_string(),
            }],
            temperature,
            max_tokens,
        }
    }
}

/// Minimal completion envelope, `{"choices":[{"message":{"content":...}}]}`.
///
/// Mirrors the upstream response shape so cache hits are byte-compatible
/// with responses that passed through from the upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionEnvelope {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

impl CompletionEnvelope {
    /// Wrap previously resolved content in the upstream envelope shape.
    pub fn from_content(content: String) -> Self {
        Self {
            choices: vec![Choice {
                message: ChatMessage {
                    role: None,
                    content,
                },
            }],
        }
    }
}

/// Pull the first choice's message content out of an upstream payload.
pub fn extract_content(payload: &Value) -> Option<String> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}
