//! In-memory destination store.
//!
//! Backed by a plain map; useful in unit tests and when embedding the
//! engine against a virtual filesystem. Never reports symlinks.

use std::collections::BTreeMap;
use std::io;
use std::sync::Mutex;

use super::{normalize, DestinationStore};

/// Destination store holding all files in memory.
#[derive(Debug, Default)]
pub struct MemStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All logical paths currently in the store, in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

impl DestinationStore for MemStore {
    fn exists(&self, path: &str) -> io::Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(normalize(path)))
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(normalize(path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
            })
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(normalize(path).to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, path: &str) -> io::Result<bool> {
        Ok(self.files.lock().unwrap().remove(normalize(path)).is_some())
    }

    fn is_symlink(&self, _path: &str) -> io::Result<bool> {
        Ok(false)
    }
}
