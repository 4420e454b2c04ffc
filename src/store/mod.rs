//! Destination store abstraction.
//!
//! Synced resources land in a *destination store*: a persisted-file backend
//! addressed by root-relative logical paths (`/actions/my-module/hello.js`).
//! The engine only needs the small contract below, so the backend can be a
//! local directory tree ([`DiskStore`]) or an in-memory map ([`MemStore`])
//! for tests and embedding.
//!
//! Logical paths always use `/` separators regardless of platform; a leading
//! `/` is accepted and ignored.

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemStore;

use std::io;

/// Persisted-file operations scoped to a logical root.
///
/// All paths are root-relative with `/` separators. Implementations must
/// guarantee read-after-write within a single logical session: a `write`
/// followed by `read_to_string` of the same path observes the write.
pub trait DestinationStore {
    /// Whether a file exists at the given logical path.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn exists(&self, path: &str) -> io::Result<bool>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not UTF-8.
    fn read_to_string(&self, path: &str) -> io::Result<String>;

    /// Read a file as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Write (upsert) a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()>;

    /// Delete a file. Returns `true` if something was deleted, `false` if
    /// the path was already absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    fn delete(&self, path: &str) -> io::Result<bool>;

    /// Whether the given logical path is a symbolic link on the backing
    /// filesystem. Backends without a filesystem return `false`.
    ///
    /// Used as a skip-guard: the engine never writes through symlinked
    /// destination roots (developer setups link these on purpose).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn is_symlink(&self, path: &str) -> io::Result<bool>;
}

/// Normalize a logical path: strip the leading `/` if present.
pub(crate) fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_single_leading_slash() {
        assert_eq!(normalize("/actions/mod/a.js"), "actions/mod/a.js");
        assert_eq!(normalize("actions/mod/a.js"), "actions/mod/a.js");
        assert_eq!(normalize("/"), "");
    }
}
