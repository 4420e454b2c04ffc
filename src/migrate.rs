//! Declarative migration descriptors.
//!
//! A module may ship a `migrations.json` at its root: a JSON array of
//! instructions, each naming destination files that an older module
//! version wrote and the current one wants gone. The descriptor is
//! re-evaluated on every module load; there is no ledger of applied
//! migrations, deleting an absent file is simply a no-op, so re-running
//! is effectively at-most-once.
//!
//! ```json
//! [
//!   { "filesToDelete": ["actions/nlu/legacy-train.js"] },
//!   { "filesToDelete": ["content-types/nlu/intent_old.json"] }
//! ]
//! ```
//!
//! Parsing is tolerant at the instruction level: entries without a valid
//! `filesToDelete` sequence are skipped with a warning. The descriptor as
//! a whole must still be a non-empty JSON array, otherwise parsing fails.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::DestinationStore;

/// One migration instruction: destination files to retire.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationInstruction {
    /// Root-relative destination paths to delete. Instructions without
    /// this field (or with the wrong shape) are skipped, not rejected.
    #[serde(default, rename = "filesToDelete")]
    pub files_to_delete: Option<Vec<String>>,
}

/// Outcome of one descriptor run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MigrationReport {
    /// Files that existed and were deleted.
    pub deleted: usize,
    /// Listed files that were already absent.
    pub already_absent: usize,
    /// Instructions skipped for lacking a valid `filesToDelete` sequence.
    pub skipped_instructions: usize,
}

impl MigrationReport {
    /// Returns true if the run changed nothing in the store.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.deleted == 0
    }
}

/// Run the migration descriptor at `descriptor_path` against the store.
///
/// A missing descriptor is a normal condition and returns `Ok(None)`.
/// Instructions execute in order; a failure aborts the remaining ones.
///
/// # Errors
///
/// - [`Error::MigrationParse`] if the descriptor is not a non-empty JSON
///   array.
/// - [`Error::MigrationFailed`] if the descriptor cannot be read or a
///   deletion fails; the message names the descriptor file.
pub fn run<S: DestinationStore>(
    store: &S,
    descriptor_path: &Path,
) -> Result<Option<MigrationReport>> {
    if !descriptor_path.exists() {
        debug!(file = %descriptor_path.display(), "no migration descriptor, skipping");
        return Ok(None);
    }

    let content = fs::read_to_string(descriptor_path).map_err(|e| Error::MigrationFailed {
        file: descriptor_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let instructions = parse_descriptor(descriptor_path, &content)?;
    let mut report = MigrationReport::default();

    for instruction in instructions {
        let Some(files) = instruction.files_to_delete else {
            warn!(
                file = %descriptor_path.display(),
                "instruction without a filesToDelete sequence, skipping"
            );
            report.skipped_instructions += 1;
            continue;
        };

        for path in files {
            let deleted =
                store
                    .delete(&path)
                    .map_err(|e| Error::MigrationFailed {
                        file: descriptor_path.to_path_buf(),
                        message: format!("deleting {path}: {e}"),
                    })?;
            if deleted {
                info!(path, "migration deleted file");
                report.deleted += 1;
            } else {
                debug!(path, "migration target already absent");
                report.already_absent += 1;
            }
        }
    }

    Ok(Some(report))
}

/// Parse descriptor content into instructions.
///
/// The top level must be a non-empty JSON array; individual entries that
/// fail to deserialize are treated as instructions without a valid
/// sequence (skipped by the caller).
fn parse_descriptor(path: &Path, content: &str) -> Result<Vec<MigrationInstruction>> {
    let parse_err = |message: String| Error::MigrationParse {
        file: path.to_path_buf(),
        message,
    };

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;

    let entries = value
        .as_array()
        .ok_or_else(|| parse_err("expected a JSON array of instructions".to_string()))?;
    if entries.is_empty() {
        return Err(parse_err("descriptor is empty".to_string()));
    }

    Ok(entries
        .iter()
        .map(|entry| {
            serde_json::from_value(entry.clone()).unwrap_or(MigrationInstruction {
                files_to_delete: None,
            })
        })
        .collect())
}
