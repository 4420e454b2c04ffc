//! modsync - Drift-aware resource sync for extension modules
//!
//! This crate reconciles source-controlled file trees owned by extension
//! modules against a mutable destination workspace. Files written by the
//! engine carry an embedded checksum marker; on later runs the marker is
//! used to tell engine-owned content apart from manual edits, which are
//! never overwritten.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Workspace configuration (`modsync.json`)
//! - [`locator`] - Module id to filesystem path resolution
//! - [`store`] - Destination store abstraction (disk, in-memory)
//! - [`sync`] - Checksum markers, drift detection, sync planning
//! - [`migrate`] - Declarative migration descriptors
//! - [`loader`] - Per-module entry points (migrate, import, templates)
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod locator;
pub mod migrate;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
