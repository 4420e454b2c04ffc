//! Sync command implementation.
//!
//! Runs the full module-load sequence per module: migrations first, then
//! the drift-aware resource import. Output is one summary per module,
//! human-readable or JSON.

use std::path::Path;

use colored::Colorize;

use crate::cli::commands::{load_config, select_modules};
use crate::error::Result;
use crate::loader::ResourceLoader;
use crate::store::DiskStore;
use crate::sync::SyncStats;

/// Execute the sync command.
pub fn execute(module: Option<&str>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let modules = select_modules(&config, module)?;
    let store = DiskStore::new(&config.destination);
    let locator = config.locator();

    let mut summaries = Vec::new();
    for id in &modules {
        let loader = ResourceLoader::new(id.clone(), &locator, &store);
        let (report, stats) = loader.load()?;
        summaries.push((id.clone(), report, stats));
    }

    if json {
        let output = serde_json::json!({
            "success": true,
            "destination": config.destination.display().to_string(),
            "modules": summaries
                .iter()
                .map(|(id, report, stats)| serde_json::json!({
                    "module": id,
                    "migrations": report,
                    "stats": stats,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for (id, report, stats) in &summaries {
        print_module_summary(id, stats);
        if let Some(report) = report {
            if report.deleted > 0 {
                println!("  Migrated:   {} file(s) deleted", report.deleted);
            }
        }
    }
    println!();
    println!("  Destination: {}", config.destination.display());

    Ok(())
}

fn print_module_summary(id: &str, stats: &SyncStats) {
    if stats.is_noop() {
        println!("{} {id}: up to date", "✓".green());
    } else {
        println!("{} {id}:", "✓".green());
        if stats.written > 0 {
            println!("  Written:    {}", stats.written);
        }
        if stats.copied > 0 {
            println!("  Copied:     {}", stats.copied);
        }
    }
    if stats.preserved > 0 {
        println!(
            "  {} {} file(s) with manual edits left untouched",
            "Preserved:".yellow(),
            stats.preserved
        );
    }
    if stats.symlink_skips > 0 {
        println!("  Skipped:    {} symlinked destination(s)", stats.symlink_skips);
    }
}
