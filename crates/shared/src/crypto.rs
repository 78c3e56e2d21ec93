//! Hashing helpers.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hashes a client-supplied idempotency token, namespaced by scope and caller.
///
/// Two different users (or the two ledgers) reusing the same token never collide.
pub fn idempotency_hash(scope: &str, user_id: i64, token: &str) -> String {
    sha256_hex(&format!("{}:{}:{}", scope, user_id, token.trim()))
}
