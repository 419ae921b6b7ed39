// scribegate - caching, rate-limited gateway for LLM chat completions

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod server;
pub mod store;
pub mod upstream;
pub mod utils;
