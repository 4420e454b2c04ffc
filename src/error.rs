//! Error types for modsync.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (1=internal, 2=config, 3=not_found,
//!   4=validation, 6=sync, 7=migration, 8=io)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Not-found conditions inside the engine (missing migration descriptor,
//! missing source directory, missing destination file) are normal no-op
//! branches and never surface here; only genuine failures do.

use std::path::PathBuf;
use thiserror::Error;

use crate::sync::SyncError;

/// Result type alias for modsync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string; shells on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    NotConfigured,
    ConfigError,

    // Not Found (exit 3)
    ModuleNotFound,
    TemplateNotFound,

    // Validation (exit 4)
    InvalidArgument,

    // Migration (exit 7)
    MigrationParse,
    MigrationFailed,

    // Sync (exit 6)
    SyncError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ModuleNotFound => "MODULE_NOT_FOUND",
            Self::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::MigrationParse => "MIGRATION_PARSE",
            Self::MigrationFailed => "MIGRATION_FAILED",
            Self::SyncError => "SYNC_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotConfigured | Self::ConfigError => 2,
            Self::ModuleNotFound | Self::TemplateNotFound => 3,
            Self::InvalidArgument => 4,
            Self::SyncError => 6,
            Self::MigrationParse | Self::MigrationFailed => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a scripted caller should retry with corrected input.
    ///
    /// True for validation errors and misspelled module ids. False for
    /// I/O, parse, or internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::ModuleNotFound)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in modsync operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No modsync.json found (searched from current directory upward)")]
    NotConfigured,

    #[error("Module not found: {id}")]
    ModuleNotFound { id: String },

    #[error("Bot template not found: {name} (module {module})")]
    TemplateNotFound { module: String, name: String },

    #[error("Invalid migration file {file}: {message}")]
    MigrationParse { file: PathBuf, message: String },

    #[error("Error executing migration file {file}: {message}")]
    MigrationFailed { file: PathBuf, message: String },

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::ModuleNotFound { .. } => ErrorCode::ModuleNotFound,
            Self::TemplateNotFound { .. } => ErrorCode::TemplateNotFound,
            Self::MigrationParse { .. } => ErrorCode::MigrationParse,
            Self::MigrationFailed { .. } => ErrorCode::MigrationFailed,
            Self::Sync(_) => ErrorCode::SyncError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotConfigured => Some(
                "Create a modsync.json at the workspace root, or pass --config <path>."
                    .to_string(),
            ),

            Self::ModuleNotFound { id } => Some(format!(
                "No module '{id}' in the modules table. Check modsync.json."
            )),

            Self::TemplateNotFound { module, .. } => Some(format!(
                "Check dist/bot-templates/ under the '{module}' module directory."
            )),

            Self::MigrationParse { .. } => Some(
                "migrations.json must be a non-empty JSON array of instruction objects, \
                 e.g. [{\"filesToDelete\": [\"actions/old.js\"]}]"
                    .to_string(),
            ),

            Self::MigrationFailed { .. }
            | Self::Sync(_)
            | Self::Config(_)
            | Self::InvalidArgument(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::NotConfigured.exit_code(), 2);
        assert_eq!(
            Error::ModuleNotFound { id: "x".into() }.exit_code(),
            3
        );
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_migration_errors_exit_with_code_7() {
        // Migration is its own category between sync (6) and I/O (8);
        // scripted callers match on it to tell a bad descriptor apart
        // from a failed copy.
        assert_eq!(ErrorCode::MigrationParse.exit_code(), 7);
        assert_eq!(ErrorCode::MigrationFailed.exit_code(), 7);
        assert_eq!(
            Error::MigrationParse {
                file: PathBuf::from("migrations.json"),
                message: "empty".into()
            }
            .exit_code(),
            7
        );
        assert_eq!(
            Error::MigrationFailed {
                file: PathBuf::from("migrations.json"),
                message: "delete failed".into()
            }
            .exit_code(),
            7
        );
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::NotConfigured;
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "NOT_CONFIGURED");
        assert!(json["error"]["hint"].as_str().is_some());
        assert_eq!(json["error"]["exit_code"], 2);
    }

    #[test]
    fn test_module_not_found_retryable() {
        let err = Error::ModuleNotFound { id: "nlu".into() };
        assert!(err.error_code().is_retryable());
        assert!(!Error::Other("x".into()).error_code().is_retryable());
    }
}
