//! Template command implementation.
//!
//! Resolves and prints the path of a named bot template inside a module.
//! The CLI verifies the template actually exists; library callers get the
//! raw path from [`ResourceLoader::bot_template_path`] either way.

use std::path::Path;

use crate::cli::commands::load_config;
use crate::error::{Error, Result};
use crate::loader::ResourceLoader;
use crate::store::DiskStore;

/// Execute the template command.
pub fn execute(module: &str, name: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let store = DiskStore::new(&config.destination);
    let locator = config.locator();

    let loader = ResourceLoader::new(module, &locator, &store);
    let path = loader.bot_template_path(name)?;

    if !path.is_dir() && !path.is_file() {
        return Err(Error::TemplateNotFound {
            module: module.to_string(),
            name: name.to_string(),
        });
    }

    if json {
        let output = serde_json::json!({
            "module": module,
            "template": name,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
