//! Core types for sync operations.

use std::path::PathBuf;

use serde::Serialize;

/// One directory-level sync rule: a source directory on disk mapped to a
/// destination path in the store.
///
/// Mappings are rebuilt from the module layout convention on every import
/// call; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMapping {
    /// Source directory inside the module checkout.
    pub source: PathBuf,
    /// Destination path in the store (root-relative, `/` separators).
    pub destination: String,
    /// Skip drift detection entirely and recursively overwrite.
    pub skip_drift_check: bool,
    /// Whether destination files carry checksum markers.
    pub tracked: bool,
}

impl ExportMapping {
    /// A drift-tracked mapping (checksum markers, manual edits preserved).
    #[must_use]
    pub fn tracked(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            skip_drift_check: false,
            tracked: true,
        }
    }

    /// An unconditional mapping (plain recursive copy, no markers).
    #[must_use]
    pub fn unconditional(
        source: impl Into<PathBuf>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            skip_drift_check: true,
            tracked: false,
        }
    }
}

/// Statistics for one sync run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SyncStats {
    /// Tracked files written (new or re-adopted untracked files).
    pub written: usize,
    /// Tracked files left alone because of manual edits (drift).
    pub preserved: usize,
    /// Tracked files already up to date (no write needed).
    pub up_to_date: usize,
    /// Files copied through the unconditional path.
    pub copied: usize,
    /// Mappings skipped because the destination root is a symlink.
    pub symlink_skips: usize,
}

impl SyncStats {
    /// Total files touched or considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written + self.preserved + self.up_to_date + self.copied
    }

    /// Returns true if the run did not write anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.written == 0 && self.copied == 0
    }

    /// Fold another run's stats into this one.
    pub fn merge(&mut self, other: &Self) {
        self.written += other.written;
        self.preserved += other.preserved;
        self.up_to_date += other.up_to_date;
        self.copied += other.copied;
        self.symlink_skips += other.symlink_skips;
    }
}

/// Sync-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// IO error during file or store operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while executing a mapping's copy, with the fixed context
    /// the module loader matches on.
    #[error("error copying module resources: {message}")]
    Copy {
        /// Underlying failure description.
        message: String,
    },
}

/// Result type for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_constructors() {
        let tracked = ExportMapping::tracked("/mod/dist/actions", "/actions/mod");
        assert!(tracked.tracked);
        assert!(!tracked.skip_drift_check);

        let raw = ExportMapping::unconditional("/mod/assets", "/assets/modules/mod");
        assert!(!raw.tracked);
        assert!(raw.skip_drift_check);
    }

    #[test]
    fn test_stats_merge_and_noop() {
        let mut total = SyncStats::default();
        assert!(total.is_noop());

        total.merge(&SyncStats {
            written: 2,
            preserved: 1,
            up_to_date: 3,
            copied: 4,
            symlink_skips: 1,
        });

        assert_eq!(total.total(), 10);
        assert!(!total.is_noop());
    }

    #[test]
    fn test_copy_error_context_message() {
        let err = SyncError::Copy {
            message: "disk full".into(),
        };
        assert_eq!(
            err.to_string(),
            "error copying module resources: disk full"
        );
    }
}
