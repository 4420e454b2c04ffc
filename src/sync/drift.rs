//! Drift classification for tracked destination files.
//!
//! A tracked file is *drifted* when its content no longer matches the
//! digest embedded in its checksum marker, which means someone edited it
//! after the last sync. Drifted files are preserved byte-for-byte; getting
//! this backward would silently destroy manual edits.

use crate::sync::hash::content_digest;
use crate::sync::marker;

/// Classification of a destination file's relationship to its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    /// Marker present and content matches: the file is exactly as the
    /// engine last wrote it.
    Unmodified,
    /// Marker present but content mismatches: manually edited since the
    /// last sync.
    Modified,
    /// No marker: never written by the engine (or untracked by convention).
    Untracked,
}

impl DriftStatus {
    /// Whether the sync engine may overwrite a file in this state.
    ///
    /// `Untracked` files are always rewritten (adopted), `Modified` files
    /// are always left alone, and `Unmodified` files need no write at all.
    #[must_use]
    pub const fn overwrite_allowed(&self) -> bool {
        matches!(self, Self::Untracked)
    }
}

impl std::fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmodified => write!(f, "unmodified"),
            Self::Modified => write!(f, "modified"),
            Self::Untracked => write!(f, "untracked"),
        }
    }
}

/// Classify a destination file's stored content.
///
/// Strips the marker line, recomputes the digest of the remainder, and
/// compares it against the embedded digest.
#[must_use]
pub fn classify(stored_content: &str) -> DriftStatus {
    let (embedded, remainder) = marker::strip(stored_content);
    match embedded {
        None => DriftStatus::Untracked,
        Some(digest) if digest == content_digest(remainder.as_bytes()) => {
            DriftStatus::Unmodified
        }
        Some(_) => DriftStatus::Modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamped(content: &str) -> String {
        marker::attach(&content_digest(content.as_bytes()), content)
    }

    #[test]
    fn test_classify_unmodified() {
        assert_eq!(classify(&stamped("Hi")), DriftStatus::Unmodified);
    }

    #[test]
    fn test_classify_modified_after_edit() {
        // Stamp "Hi", then edit the body without updating the marker
        let edited = stamped("Hi").replace("Hi", "Hi!");
        assert_eq!(classify(&edited), DriftStatus::Modified);
    }

    #[test]
    fn test_classify_untracked_without_marker() {
        assert_eq!(classify("plain content"), DriftStatus::Untracked);
        assert_eq!(classify(""), DriftStatus::Untracked);
    }

    #[test]
    fn test_revert_restores_unmodified() {
        let original = stamped("Hi");
        let edited = original.replace("Hi", "Hi!");
        assert_eq!(classify(&edited), DriftStatus::Modified);

        // Manually reverting the edit makes the marker match again
        let reverted = edited.replace("Hi!", "Hi");
        assert_eq!(classify(&reverted), DriftStatus::Unmodified);
    }

    #[test]
    fn test_overwrite_policy() {
        assert!(DriftStatus::Untracked.overwrite_allowed());
        assert!(!DriftStatus::Modified.overwrite_allowed());
        assert!(!DriftStatus::Unmodified.overwrite_allowed());
    }
}
