//! Checksum marker codec.
//!
//! Every tracked file the engine writes starts with a single marker line:
//!
//! ```text
//! //CHECKSUM:<64-hex-char-digest>
//! ```
//!
//! followed by the platform line terminator and then the file's content.
//! The marker must be stripped before hashing and re-attached after
//! writing; [`strip`] and [`attach`] are exact inverses of each other.

/// Literal prefix of the marker line.
pub const CHECKSUM_PREFIX: &str = "//CHECKSUM:";

/// Platform line terminator used after the marker line.
#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
/// Platform line terminator used after the marker line.
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

/// Prepend a marker line carrying `digest` to `content`.
#[must_use]
pub fn attach(digest: &str, content: &str) -> String {
    format!("{CHECKSUM_PREFIX}{digest}{LINE_SEP}{content}")
}

/// Split a marker line off `content`.
///
/// If the first line starts with [`CHECKSUM_PREFIX`], returns the embedded
/// digest and the remainder of the file. Otherwise returns `None` and the
/// content unchanged.
///
/// Invariant: `strip(attach(d, c)) == (Some(d), c)` for all `d`, `c`.
#[must_use]
pub fn strip(content: &str) -> (Option<String>, String) {
    let Some(rest) = content.strip_prefix(CHECKSUM_PREFIX) else {
        return (None, content.to_string());
    };

    match rest.find(LINE_SEP) {
        Some(pos) => (
            Some(rest[..pos].to_string()),
            rest[pos + LINE_SEP.len()..].to_string(),
        ),
        // Marker line with no terminator: the whole file is the marker
        None => (Some(rest.to_string()), String::new()),
    }
}
