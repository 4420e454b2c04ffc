//! Migrate command implementation.
//!
//! Runs migration descriptors only, without touching resources. Useful
//! for inspecting what a module version transition retires.

use std::path::Path;

use colored::Colorize;

use crate::cli::commands::{load_config, select_modules};
use crate::error::Result;
use crate::loader::ResourceLoader;
use crate::store::DiskStore;

/// Execute the migrate command.
pub fn execute(module: Option<&str>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let modules = select_modules(&config, module)?;
    let store = DiskStore::new(&config.destination);
    let locator = config.locator();

    let mut results = Vec::new();
    for id in &modules {
        let loader = ResourceLoader::new(id.clone(), &locator, &store);
        results.push((id.clone(), loader.run_migrations()?));
    }

    if json {
        let output = serde_json::json!({
            "success": true,
            "modules": results
                .iter()
                .map(|(id, report)| serde_json::json!({
                    "module": id,
                    "migrations": report,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for (id, report) in &results {
        match report {
            None => println!("{} {id}: no migration descriptor", "-".dimmed()),
            Some(report) if report.is_noop() => {
                println!("{} {id}: nothing to migrate", "✓".green());
            }
            Some(report) => {
                println!(
                    "{} {id}: {} file(s) deleted, {} already absent",
                    "✓".green(),
                    report.deleted,
                    report.already_absent
                );
            }
        }
    }

    Ok(())
}
