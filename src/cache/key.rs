// Cache key derivation

use sha2::{Digest, Sha256};

/// Derive a stable cache key for a query.
///
/// The key is the SHA-256 digest of the raw query bytes, hex-encoded and
/// prefixed with `namespace` so cache keys never collide with rate-limit
/// keys in the same store. Pure function of the query content; identical
/// queries always map to the same key.
pub fn derive_key(namespace: &str, query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    format!("{}{:x}", namespace, hasher.finalize())
}
