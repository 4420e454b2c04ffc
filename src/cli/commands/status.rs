//! Status command implementation (read-only drift report).
//!
//! Classifies every tracked destination file of the selected modules
//! without writing anything: which files the next sync would create,
//! which carry manual edits it would preserve, and which are up to date.

use std::path::Path;

use colored::Colorize;

use crate::cli::commands::{load_config, select_modules};
use crate::error::Result;
use crate::loader::{DriftEntry, ResourceLoader};
use crate::store::DiskStore;
use crate::sync::DriftStatus;

/// Execute the status command.
pub fn execute(module: Option<&str>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let modules = select_modules(&config, module)?;
    let store = DiskStore::new(&config.destination);
    let locator = config.locator();

    let mut reports = Vec::new();
    for id in &modules {
        let loader = ResourceLoader::new(id.clone(), &locator, &store);
        reports.push((id.clone(), loader.drift_report()?));
    }

    if json {
        let output = serde_json::json!({
            "destination": config.destination.display().to_string(),
            "modules": reports
                .iter()
                .map(|(id, entries)| serde_json::json!({
                    "module": id,
                    "files": entries,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{}", "Drift Status".bold().underline());
    for (id, entries) in &reports {
        println!();
        println!("{}", id.blue().bold());
        if entries.is_empty() {
            println!("  (no tracked resources)");
            continue;
        }
        for entry in entries {
            println!("  {} {}", status_label(entry), entry.path);
        }
    }

    Ok(())
}

fn status_label(entry: &DriftEntry) -> String {
    match entry.status {
        None => "pending   ".dimmed().to_string(),
        Some(DriftStatus::Unmodified) => "unmodified".green().to_string(),
        Some(DriftStatus::Modified) => "modified  ".yellow().to_string(),
        Some(DriftStatus::Untracked) => "untracked ".red().to_string(),
    }
}
