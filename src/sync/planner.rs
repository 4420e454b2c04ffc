//! Sync planning and execution.
//!
//! [`ResourceSync`] turns a module checkout into an ordered list of
//! [`ExportMapping`]s (the conventional actions / assets / content-types
//! locations plus one mapping per hook subdirectory), then executes each
//! mapping against the destination store:
//!
//! - symlinked destination roots are skipped entirely (developer override)
//! - unconditional mappings are recursively copied, overwriting
//! - tracked mappings go file-by-file through drift detection: new and
//!   untracked files are written and stamped with a fresh checksum marker,
//!   manually edited files are preserved, up-to-date files are not touched
//!
//! Mappings whose source directory does not exist are silently omitted.
//! Any I/O failure inside a mapping is wrapped with the fixed context
//! "error copying module resources" and propagated; there is no retry and
//! no rollback, so a failure mid-mapping leaves earlier files written.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::store::DestinationStore;
use crate::sync::drift::{classify, DriftStatus};
use crate::sync::hash::content_digest;
use crate::sync::marker;
use crate::sync::types::{ExportMapping, SyncError, SyncResult, SyncStats};

/// Drift-aware sync of one module's resources into a destination store.
pub struct ResourceSync<'a, S: DestinationStore> {
    module_id: String,
    store: &'a S,
}

impl<'a, S: DestinationStore> ResourceSync<'a, S> {
    /// Create a sync engine for one module.
    #[must_use]
    pub fn new(module_id: impl Into<String>, store: &'a S) -> Self {
        Self {
            module_id: module_id.into(),
            store,
        }
    }

    /// Build the ordered mapping list for a module checkout.
    ///
    /// Fixed prefix first (actions, assets, content-types), then one
    /// tracked mapping per subdirectory of `dist/hooks`, in name order.
    /// Sources that do not exist are still listed; they are omitted at
    /// execution time.
    #[must_use]
    pub fn plan(&self, module_dir: &Path) -> Vec<ExportMapping> {
        let id = &self.module_id;
        let mut mappings = vec![
            ExportMapping::tracked(module_dir.join("dist/actions"), format!("/actions/{id}")),
            ExportMapping::unconditional(
                module_dir.join("assets"),
                format!("/assets/modules/{id}"),
            ),
            ExportMapping::tracked(
                module_dir.join("dist/content-types"),
                format!("/content-types/{id}"),
            ),
        ];

        let hooks_dir = module_dir.join("dist/hooks");
        for hook_type in list_subdirs(&hooks_dir) {
            mappings.push(ExportMapping::tracked(
                hooks_dir.join(&hook_type),
                format!("/hooks/{hook_type}/{id}"),
            ));
        }

        mappings
    }

    /// Execute one mapping against the destination store.
    ///
    /// # Errors
    ///
    /// Any I/O failure is wrapped as [`SyncError::Copy`] with the fixed
    /// "error copying module resources" context and propagated.
    pub fn execute(&self, mapping: &ExportMapping) -> SyncResult<SyncStats> {
        self.execute_inner(mapping).map_err(|e| SyncError::Copy {
            message: e.to_string(),
        })
    }

    /// Plan and execute every mapping for a module checkout.
    ///
    /// # Errors
    ///
    /// Stops at the first failing mapping; earlier mappings stay applied.
    pub fn sync_all(&self, module_dir: &Path) -> SyncResult<SyncStats> {
        let mut stats = SyncStats::default();
        for mapping in self.plan(module_dir) {
            stats.merge(&self.execute(&mapping)?);
        }
        Ok(stats)
    }

    fn execute_inner(&self, mapping: &ExportMapping) -> io::Result<SyncStats> {
        let mut stats = SyncStats::default();

        if !mapping.source.is_dir() {
            debug!(
                source = %mapping.source.display(),
                "source directory missing, mapping omitted"
            );
            return Ok(stats);
        }

        // Symlinked destinations are an intentional developer override.
        // Their contents are never inspected or written.
        if self.store.is_symlink(&mapping.destination)? {
            debug!(destination = %mapping.destination, "destination is a symlink, skipping");
            stats.symlink_skips = 1;
            return Ok(stats);
        }

        if mapping.skip_drift_check || !mapping.tracked {
            self.copy_recursive(&mapping.source, &mapping.destination, &mut stats)?;
            return Ok(stats);
        }

        for entry_name in list_files(&mapping.source)? {
            let source_path = mapping.source.join(&entry_name);
            let dest_path = join_dest(&mapping.destination, &entry_name);

            let is_new = !self.store.exists(&dest_path)?;
            let status = if is_new {
                None
            } else {
                Some(classify(&self.store.read_to_string(&dest_path)?))
            };

            match status {
                None | Some(DriftStatus::Untracked) => {
                    self.store.write(&dest_path, &fs::read(&source_path)?)?;
                    self.stamp(&dest_path)?;
                    stats.written += 1;
                    info!(path = %dest_path, new = is_new, "wrote tracked resource");
                }
                Some(DriftStatus::Modified) => {
                    stats.preserved += 1;
                    debug!(path = %dest_path, "manual edits detected, preserving");
                }
                Some(DriftStatus::Unmodified) => {
                    stats.up_to_date += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Re-stamp a destination file with a marker over its current content.
    ///
    /// Any pre-existing marker is stripped first so the digest always
    /// covers the content alone.
    fn stamp(&self, dest_path: &str) -> io::Result<()> {
        let stored = self.store.read_to_string(dest_path)?;
        let (_, content) = marker::strip(&stored);
        let stamped = marker::attach(&content_digest(content.as_bytes()), &content);
        self.store.write(dest_path, stamped.as_bytes())
    }

    /// Unconditional recursive copy, overwriting the destination.
    fn copy_recursive(
        &self,
        source: &Path,
        destination: &str,
        stats: &mut SyncStats,
    ) -> io::Result<()> {
        let mut entries: Vec<_> = fs::read_dir(source)?.collect::<io::Result<_>>()?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.copy_recursive(&entry.path(), &join_dest(destination, &name), stats)?;
            } else if file_type.is_file() {
                self.store
                    .write(&join_dest(destination, &name), &fs::read(entry.path())?)?;
                stats.copied += 1;
            }
        }
        Ok(())
    }
}

/// Append a file name to a destination path with a `/` separator.
fn join_dest(destination: &str, name: &str) -> String {
    format!("{}/{name}", destination.trim_end_matches('/'))
}

/// Immediate file entries of a directory, in name order.
fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Immediate subdirectories of a directory, in name order. Empty if the
/// directory does not exist.
fn list_subdirs(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use std::fs;
    use tempfile::TempDir;

    /// Lay out a minimal module checkout on disk.
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
    fn test_plan_fixed_prefix_and_hooks() {
        let module = make_module(&[
            ("dist/hooks/after_bot_mount/handler.js", "x"),
            ("dist/hooks/on_server_started/boot.js", "y"),
        ]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);

        let plan = sync.plan(module.path());

        let destinations: Vec<_> = plan.iter().map(|m| m.destination.as_str()).collect();
        assert_eq!(
            destinations,
            vec![
                "/actions/nlu",
                "/assets/modules/nlu",
                "/content-types/nlu",
                "/hooks/after_bot_mount/nlu",
                "/hooks/on_server_started/nlu",
            ]
        );
        // Only the assets mapping bypasses drift detection
        assert!(plan.iter().all(|m| m.tracked != m.skip_drift_check));
        assert!(!plan[1].tracked);
    }

    #[test]
    fn test_plan_without_hooks_dir() {
        let module = make_module(&[]);
        let store = MemStore::new();
        let plan = ResourceSync::new("nlu", &store).plan(module.path());
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_new_file_adoption() {
        let module = make_module(&[("dist/actions/hello.js", "Hi")]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);

        let stats = sync.sync_all(module.path()).unwrap();

        assert_eq!(stats.written, 1);
        let stored = store.read_to_string("/actions/nlu/hello.js").unwrap();
        let expected_digest = content_digest(b"Hi");
        assert_eq!(stored, marker::attach(&expected_digest, "Hi"));
        assert_eq!(classify(&stored), DriftStatus::Unmodified);
    }

    #[test]
    fn test_second_sync_is_idempotent() {
        let module = make_module(&[("dist/actions/hello.js", "Hi")]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);

        sync.sync_all(module.path()).unwrap();
        let second = sync.sync_all(module.path()).unwrap();

        assert_eq!(second.written, 0);
        assert_eq!(second.up_to_date, 1);
    }

    #[test]
    fn test_manual_edit_preserved_byte_for_byte() {
        let module = make_module(&[("dist/actions/hello.js", "Hi")]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);
        sync.sync_all(module.path()).unwrap();

        // Edit the destination body without updating the marker
        let edited = store
            .read_to_string("/actions/nlu/hello.js")
            .unwrap()
            .replace("Hi", "Hi!");
        store.write("/actions/nlu/hello.js", edited.as_bytes()).unwrap();

        let stats = sync.sync_all(module.path()).unwrap();

        assert_eq!(stats.preserved, 1);
        assert_eq!(stats.written, 0);
        assert_eq!(
            store.read_to_string("/actions/nlu/hello.js").unwrap(),
            edited
        );
    }

    #[test]
    fn test_reverted_edit_classified_unmodified() {
        // The end-to-end drift scenario: sync, edit, sync, revert, sync
        let module = make_module(&[("dist/actions/hello.txt", "Hi")]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);
        sync.sync_all(module.path()).unwrap();

        let original = store.read_to_string("/actions/nlu/hello.txt").unwrap();
        let edited = original.replace("Hi", "Hi!");
        store
            .write("/actions/nlu/hello.txt", edited.as_bytes())
            .unwrap();

        let stats = sync.sync_all(module.path()).unwrap();
        assert_eq!(stats.preserved, 1);
        assert_eq!(
            store.read_to_string("/actions/nlu/hello.txt").unwrap(),
            edited
        );

        // Manual revert makes the marker match again
        store
            .write("/actions/nlu/hello.txt", original.as_bytes())
            .unwrap();
        let stats = sync.sync_all(module.path()).unwrap();
        assert_eq!(stats.written, 0);
        assert_eq!(stats.up_to_date, 1);
        assert_eq!(
            store.read_to_string("/actions/nlu/hello.txt").unwrap(),
            original
        );
    }

    #[test]
    fn test_untracked_destination_is_adopted() {
        let module = make_module(&[("dist/actions/hello.js", "new body")]);
        let store = MemStore::new();
        // Pre-existing destination file with no marker
        store
            .write("/actions/nlu/hello.js", b"hand-written")
            .unwrap();

        let sync = ResourceSync::new("nlu", &store);
        let stats = sync.sync_all(module.path()).unwrap();

        assert_eq!(stats.written, 1);
        let stored = store.read_to_string("/actions/nlu/hello.js").unwrap();
        assert!(stored.ends_with("new body"));
        assert_eq!(classify(&stored), DriftStatus::Unmodified);
    }

    #[test]
    fn test_assets_always_overwrite_without_markers() {
        let module = make_module(&[
            ("assets/logo.svg", "<svg v2/>"),
            ("assets/css/style.css", "body {}"),
        ]);
        let store = MemStore::new();
        // Destination holds an older asset; no drift rules apply
        store
            .write("/assets/modules/nlu/logo.svg", b"<svg v1/>")
            .unwrap();

        let sync = ResourceSync::new("nlu", &store);
        let stats = sync.sync_all(module.path()).unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(
            store.read_to_string("/assets/modules/nlu/logo.svg").unwrap(),
            "<svg v2/>"
        );
        // Recursive copy, no marker line
        assert_eq!(
            store
                .read_to_string("/assets/modules/nlu/css/style.css")
                .unwrap(),
            "body {}"
        );
    }

    #[test]
    fn test_missing_source_dir_is_silently_omitted() {
        let module = make_module(&[("dist/actions/a.js", "x")]);
        let store = MemStore::new();
        let sync = ResourceSync::new("nlu", &store);

        // assets/ and dist/content-types/ do not exist; no error
        let stats = sync.sync_all(module.path()).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(stats.copied, 0);
    }

    #[test]
    fn test_copy_failure_wraps_fixed_context() {
        let module = make_module(&[("dist/actions/a.js", "x")]);
        let store = MemStore::new();
        // A non-UTF-8 destination makes the drift read fail
        store.write("/actions/nlu/a.js", &[0xff, 0xfe, 0x00]).unwrap();

        let sync = ResourceSync::new("nlu", &store);
        let err = sync.sync_all(module.path()).unwrap_err();

        assert!(err
            .to_string()
            .starts_with("error copying module resources"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_destination_is_never_touched() {
        use crate::store::DiskStore;

        let module = make_module(&[("dist/actions/a.js", "x")]);
        let dest = TempDir::new().unwrap();
        let real = TempDir::new().unwrap();

        // /actions/nlu is a symlink into a developer's working copy
        fs::create_dir_all(dest.path().join("actions")).unwrap();
        std::os::unix::fs::symlink(real.path(), dest.path().join("actions/nlu")).unwrap();

        let store = DiskStore::new(dest.path());
        let sync = ResourceSync::new("nlu", &store);
        let stats = sync.sync_all(module.path()).unwrap();

        assert_eq!(stats.symlink_skips, 1);
        assert_eq!(stats.written, 0);
        assert_eq!(fs::read_dir(real.path()).unwrap().count(), 0);
    }
}
