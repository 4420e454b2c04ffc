//! Per-module entry points.
//!
//! [`ResourceLoader`] is the surface the module loader calls on every
//! module-load event: run migrations first (if the module ships a
//! descriptor), then import resources. Module directories come from an
//! injected [`ModuleLocator`]; the loader holds no global state.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::locator::ModuleLocator;
use crate::migrate::{self, MigrationReport};
use crate::store::DestinationStore;
use crate::sync::{classify, DriftStatus, ResourceSync, SyncStats};

/// Relative filename of the migration descriptor inside a module.
pub const MIGRATIONS_FILE: &str = "migrations.json";

/// Drift state of one tracked destination file, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct DriftEntry {
    /// Destination path in the store.
    pub path: String,
    /// Classification, or `None` if the destination does not exist yet.
    pub status: Option<DriftStatus>,
}

/// Migration and resource import for a single module.
pub struct ResourceLoader<'a, S: DestinationStore> {
    module_id: String,
    locator: &'a dyn ModuleLocator,
    store: &'a S,
}

impl<'a, S: DestinationStore> ResourceLoader<'a, S> {
    /// Create a loader for one module.
    pub fn new(
        module_id: impl Into<String>,
        locator: &'a dyn ModuleLocator,
        store: &'a S,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            locator,
            store,
        }
    }

    /// The module's base directory, from the injected locator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleNotFound`] for an unregistered module id.
    pub fn module_dir(&self) -> Result<PathBuf> {
        self.locator
            .module_path(&self.module_id)
            .ok_or_else(|| Error::ModuleNotFound {
                id: self.module_id.clone(),
            })
    }

    /// Run the module's migration descriptor, if it ships one.
    ///
    /// Returns `Ok(None)` when the module has no `migrations.json`.
    ///
    /// # Errors
    ///
    /// Propagates parse and deletion failures; see [`migrate::run`].
    pub fn run_migrations(&self) -> Result<Option<MigrationReport>> {
        let descriptor = self.module_dir()?.join(MIGRATIONS_FILE);
        migrate::run(self.store, &descriptor)
    }

    /// Sync the module's declared resources into the destination store.
    ///
    /// # Errors
    ///
    /// Propagates mapping failures wrapped with the "error copying module
    /// resources" context.
    pub fn import_resources(&self) -> Result<SyncStats> {
        let dir = self.module_dir()?;
        let stats = ResourceSync::new(self.module_id.clone(), self.store).sync_all(&dir)?;
        Ok(stats)
    }

    /// The full module-load sequence: migrations, then resource import.
    ///
    /// # Errors
    ///
    /// A migration failure aborts before any resources are imported.
    pub fn load(&self) -> Result<(Option<MigrationReport>, SyncStats)> {
        let report = self.run_migrations()?;
        let stats = self.import_resources()?;
        Ok((report, stats))
    }

    /// Path to a named bot template inside the module.
    ///
    /// The path is returned whether or not it exists; callers that need
    /// the template to be present check for themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModuleNotFound`] for an unregistered module id.
    pub fn bot_template_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.module_dir()?.join("dist/bot-templates").join(name))
    }

    /// Classify every tracked destination file without writing anything.
    ///
    /// Walks the tracked mappings of the module's plan and reports the
    /// drift state of each source file's destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or the module directory cannot be
    /// read.
    pub fn drift_report(&self) -> Result<Vec<DriftEntry>> {
        let dir = self.module_dir()?;
        let sync = ResourceSync::new(self.module_id.clone(), self.store);
        let mut entries = Vec::new();

        for mapping in sync.plan(&dir) {
            if !mapping.tracked || !mapping.source.is_dir() {
                continue;
            }
            let mut names: Vec<String> = std::fs::read_dir(&mapping.source)?
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();

            for name in names {
                let path = format!("{}/{name}", mapping.destination.trim_end_matches('/'));
                let status = if self.store.exists(&path)? {
                    Some(classify(&self.store.read_to_string(&path)?))
                } else {
                    None
                };
                entries.push(DriftEntry { path, status });
            }
        }

        Ok(entries)
    }

    /// The module id this loader serves.
    #[must_use]
    pub fn module_id(&self) -> &str {
        &self.module_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::SingleModuleLocator;
    use crate::store::{DestinationStore, MemStore};
    use std::fs;
    use tempfile::TempDir;

    fn make_module(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_runs_migrations_then_import() {
        let module = make_module(&[
            ("dist/actions/hello.js", "Hi"),
            (
                "migrations.json",
                r#"[{"filesToDelete": ["actions/nlu/legacy.js"]}]"#,
            ),
        ]);
        let locator = SingleModuleLocator::new("nlu", module.path());
        let store = MemStore::new();
        store.write("/actions/nlu/legacy.js", b"old").unwrap();

        let loader = ResourceLoader::new("nlu", &locator, &store);
        let (report, stats) = loader.load().unwrap();

        assert_eq!(report.unwrap().deleted, 1);
        assert_eq!(stats.written, 1);
        assert!(!store.exists("/actions/nlu/legacy.js").unwrap());
        assert!(store.exists("/actions/nlu/hello.js").unwrap());
    }

    #[test]
    fn test_load_without_descriptor() {
        let module = make_module(&[("dist/actions/hello.js", "Hi")]);
        let locator = SingleModuleLocator::new("nlu", module.path());
        let store = MemStore::new();

        let (report, stats) = ResourceLoader::new("nlu", &locator, &store)
            .load()
            .unwrap();

        assert!(report.is_none());
        assert_eq!(stats.written, 1);
    }

    #[test]
    fn test_unknown_module_id() {
        let module = make_module(&[]);
        let locator = SingleModuleLocator::new("nlu", module.path());
        let store = MemStore::new();

        let err = ResourceLoader::new("other", &locator, &store)
            .import_resources()
            .unwrap_err();

        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_bot_template_path() {
        let module = make_module(&[]);
        let locator = SingleModuleLocator::new("nlu", module.path());
        let store = MemStore::new();

        let path = ResourceLoader::new("nlu", &locator, &store)
            .bot_template_path("welcome-bot")
            .unwrap();

        assert_eq!(
            path,
            module.path().join("dist/bot-templates").join("welcome-bot")
        );
    }

    #[test]
    fn test_drift_report_states() {
        let module = make_module(&[
            ("dist/actions/synced.js", "a"),
            ("dist/actions/edited.js", "b"),
            ("dist/actions/pending.js", "c"),
        ]);
        let locator = SingleModuleLocator::new("nlu", module.path());
        let store = MemStore::new();
        let loader = ResourceLoader::new("nlu", &locator, &store);

        loader.import_resources().unwrap();

        // Edit one destination, delete another
        let edited = store
            .read_to_string("/actions/nlu/edited.js")
            .unwrap()
            .replace('b', "B");
        store.write("/actions/nlu/edited.js", edited.as_bytes()).unwrap();
        store.delete("/actions/nlu/pending.js").unwrap();

        let report = loader.drift_report().unwrap();
        let by_path: std::collections::BTreeMap<_, _> = report
            .into_iter()
            .map(|e| (e.path.clone(), e.status))
            .collect();

        assert_eq!(
            by_path["/actions/nlu/synced.js"],
            Some(DriftStatus::Unmodified)
        );
        assert_eq!(
            by_path["/actions/nlu/edited.js"],
            Some(DriftStatus::Modified)
        );
        assert_eq!(by_path["/actions/nlu/pending.js"], None);
    }
}
