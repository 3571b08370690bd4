//! Content hashes identifying transcript documents.
//!
//! Two files with the same hash are the same document, whatever their names.
//! Import skips documents whose hash it has already stored, and batch output
//! carries the same hash so entries can be matched against the store.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a document's raw bytes.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
