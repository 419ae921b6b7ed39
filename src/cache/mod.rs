// Response cache module

pub mod key;
pub mod manager;

pub use key::derive_key;
pub use manager::ResponseCache;
