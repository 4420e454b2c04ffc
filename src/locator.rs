//! Module id to filesystem path resolution.
//!
//! The sync engine never consults a process-wide module table; callers
//! inject a [`ModuleLocator`]. The CLI builds a [`StaticLocator`] from the
//! `modules` table in `modsync.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolves a module id to the module's base directory on disk.
pub trait ModuleLocator {
    /// The base directory for `module_id`, or `None` if unknown.
    fn module_path(&self, module_id: &str) -> Option<PathBuf>;
}

/// Locator backed by an explicit id → path table.
#[derive(Debug, Default, Clone)]
pub struct StaticLocator {
    paths: BTreeMap<String, PathBuf>,
}

impl StaticLocator {
    /// Create an empty locator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module's base directory.
    pub fn insert(&mut self, module_id: impl Into<String>, path: impl Into<PathBuf>) {
        self.paths.insert(module_id.into(), path.into());
    }

    /// Registered module ids, in sorted order.
    #[must_use]
    pub fn module_ids(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }
}

impl<S: Into<String>, P: Into<PathBuf>> FromIterator<(S, P)> for StaticLocator {
    fn from_iter<I: IntoIterator<Item = (S, P)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(id, path)| (id.into(), path.into()))
                .collect(),
        }
    }
}

impl ModuleLocator for StaticLocator {
    fn module_path(&self, module_id: &str) -> Option<PathBuf> {
        self.paths.get(module_id).cloned()
    }
}

impl ModuleLocator for BTreeMap<String, PathBuf> {
    fn module_path(&self, module_id: &str) -> Option<PathBuf> {
        self.get(module_id).cloned()
    }
}

/// Locator for a single module rooted at a fixed directory.
///
/// Handy in tests and for one-off syncs of an unregistered module checkout.
#[derive(Debug, Clone)]
pub struct SingleModuleLocator {
    module_id: String,
    path: PathBuf,
}

impl SingleModuleLocator {
    /// Create a locator that knows exactly one module.
    #[must_use]
    pub fn new(module_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            module_id: module_id.into(),
            path: path.into(),
        }
    }

    /// The directory this locator points at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModuleLocator for SingleModuleLocator {
    fn module_path(&self, module_id: &str) -> Option<PathBuf> {
        (module_id == self.module_id).then(|| self.path.clone())
    }
}
