//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Shells supported by the completions command.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// modsync - Drift-aware resource sync for extension modules
#[derive(Parser, Debug)]
#[command(name = "modsync", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: discover modsync.json upward from CWD)
    #[arg(long, global = true, env = "MODSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON (for scripted integration)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run migrations then import resources for one or all modules
    Sync {
        /// Module id (default: every configured module)
        module: Option<String>,
    },

    /// Run migration descriptors only
    Migrate {
        /// Module id (default: every configured module)
        module: Option<String>,
    },

    /// Report drift state of tracked destination files (read-only)
    Status {
        /// Module id (default: every configured module)
        module: Option<String>,
    },

    /// Print the path of a module's bot template
    Template {
        /// Module id
        module: String,
        /// Template name
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}
