//! Drift-aware resource sync.
//!
//! This module implements the change-detection and merge policy at the
//! heart of modsync:
//!
//! - **Hashing**: SHA256 digest of file content, marker line excluded
//! - **Marker**: `//CHECKSUM:<digest>` as the literal first line of every
//!   tracked destination file
//! - **Drift**: three-way classification (unmodified / modified /
//!   untracked) of a destination file against its embedded marker
//! - **Planner**: per-module mapping list and execution against the store
//!
//! # Policy
//!
//! Per tracked file: new and untracked destinations are written and
//! stamped; manually modified destinations are preserved byte-for-byte;
//! up-to-date destinations are not rewritten. The drift-check-then-write
//! sequence is not atomic; a concurrent external edit between read and
//! write is accepted rather than locked against.
//!
//! # Example
//!
//! ```no_run
//! use modsync::store::DiskStore;
//! use modsync::sync::ResourceSync;
//! use std::path::Path;
//!
//! let store = DiskStore::new("/var/lib/bot/data");
//! let sync = ResourceSync::new("nlu", &store);
//! let stats = sync.sync_all(Path::new("/opt/modules/nlu"))?;
//! println!("{} files written", stats.written);
//! # Ok::<(), modsync::sync::SyncError>(())
//! ```

mod drift;
mod hash;
pub mod marker;
mod planner;
mod types;

pub use drift::{classify, DriftStatus};
pub use hash::content_digest;
pub use marker::{attach, strip, CHECKSUM_PREFIX};
pub use planner::ResourceSync;
pub use types::{ExportMapping, SyncError, SyncResult, SyncStats};
