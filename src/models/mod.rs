// Wire types for the inbound API and the upstream completion API

pub mod chat;

pub use chat::{
    extract_content, ChatMessage, ChatRequest, CompletionEnvelope, CompletionRequest,
};
