//! Workspace configuration.
//!
//! The CLI reads a `modsync.json` at the workspace root:
//!
//! ```json
//! {
//!   "destination": "./data",
//!   "modules": {
//!     "nlu": "./modules/nlu",
//!     "hitl": "./modules/hitl"
//!   }
//! }
//! ```
//!
//! `destination` is the root of the destination store; `modules` maps
//! module ids to their checkout directories and seeds the locator.
//! Relative paths are resolved against the directory containing the
//! config file. Discovery walks up from the current directory; an
//! explicit `--config` path overrides it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::locator::StaticLocator;

/// Conventional config filename.
pub const CONFIG_FILE: &str = "modsync.json";

/// Parsed workspace configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root directory of the destination store.
    pub destination: PathBuf,
    /// Module id → checkout directory.
    #[serde(default)]
    pub modules: BTreeMap<String, PathBuf>,
}

impl Config {
    /// Load and resolve a config file.
    ///
    /// Relative `destination` and module paths become absolute, anchored
    /// at the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the file if it cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("cannot parse {}: {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.destination = anchor(base, &config.destination);
        for module_path in config.modules.values_mut() {
            *module_path = anchor(base, module_path);
        }

        Ok(config)
    }

    /// Resolve the effective config: explicit path if given, otherwise
    /// discovery from the current directory upward.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if nothing is found.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let cwd = std::env::current_dir()?;
                Self::resolve_discovered(&cwd)
            }
        }
    }

    /// Discover and load the config, walking up from `start`.
    fn resolve_discovered(start: &Path) -> Result<Self> {
        let path = discover_config_from(start).ok_or(Error::NotConfigured)?;
        Self::load(&path)
    }

    /// Build a locator from the modules table.
    #[must_use]
    pub fn locator(&self) -> StaticLocator {
        self.modules
            .iter()
            .map(|(id, path)| (id.clone(), path.clone()))
            .collect()
    }

    /// Registered module ids, in sorted order.
    #[must_use]
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }
}

/// Walk up from the current directory looking for `modsync.json`.
#[must_use]
pub fn discover_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_config_from(&cwd)
}

/// Walk up from `start` looking for `modsync.json`.
#[must_use]
pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
