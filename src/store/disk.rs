//! Local-filesystem destination store.
//!
//! Maps logical `/`-separated paths onto a root directory. Writes are
//! atomic: content goes to a temp file, is synced to disk, then renamed
//! over the target. A failed write leaves the original file untouched.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{normalize, DestinationStore};

/// Destination store backed by a directory on local disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path to a filesystem path under the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let mut out = self.root.clone();
        for part in normalize(path).split('/').filter(|p| !p.is_empty()) {
            out.push(part);
        }
        out
    }
}

impl DestinationStore for DiskStore {
    fn exists(&self, path: &str) -> io::Result<bool> {
        Ok(self.resolve(path).exists())
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = target.with_extension("modsync.tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(bytes)?;
            writer.flush()?;
            // Sync to disk before rename
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temp_path, &target)
    }

    fn delete(&self, path: &str) -> io::Result<bool> {
        match fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn is_symlink(&self, path: &str) -> io::Result<bool> {
        match fs::symlink_metadata(self.resolve(path)) {
            Ok(meta) => Ok(meta.file_type().is_symlink()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
