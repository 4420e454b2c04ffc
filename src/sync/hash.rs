//! Content hashing for drift detection.
//!
//! This module provides SHA256-based content hashing. The digest of a
//! synced file's content (marker line excluded) is what gets embedded in
//! the checksum marker, so later runs can detect manual edits without
//! keeping any out-of-band state.

use sha2::{Digest, Sha256};

/// Compute a SHA256 hash of raw bytes as a 64-char lowercase hex string.
///
/// Deterministic and collision-resistant enough to serve as a change
/// marker; this is not a security control.
///
/// # Example
///
/// ```
/// let digest = modsync::sync::content_digest(b"Hi");
/// assert_eq!(digest.len(), 64);
/// ```
#[must_use]
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = content_digest(b"hello world");
        let b = content_digest(b"hello world");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // SHA256 produces 64 hex chars
    }

    #[test]
    fn test_digest_changes_with_content() {
        assert_ne!(content_digest(b"Hi"), content_digest(b"Hi!"));
    }

    #[test]
    fn test_digest_of_empty_input() {
        // SHA256 of the empty string, a fixed known value
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
