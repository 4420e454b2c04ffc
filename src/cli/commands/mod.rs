//! Command implementations.

pub mod completions;
pub mod migrate;
pub mod status;
pub mod sync;
pub mod template;
pub mod version;

use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};

/// Resolve the effective module list for a command: the explicit module
/// id if given (validated against the config), otherwise every
/// configured module.
pub(crate) fn select_modules(config: &Config, module: Option<&str>) -> Result<Vec<String>> {
    match module {
        Some(id) => {
            if config.modules.contains_key(id) {
                Ok(vec![id.to_string()])
            } else {
                Err(Error::ModuleNotFound { id: id.to_string() })
            }
        }
        None => Ok(config
            .module_ids()
            .into_iter()
            .map(str::to_string)
            .collect()),
    }
}

/// Load the config from an explicit path or by discovery.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config> {
    Config::resolve(explicit)
}
