//! Base file index: owns the set of base files for a workspace and keeps it fresh.
//!
//! Every refresh is a full rescan of the configured roots. The watch loop decides
//! when to refresh (startup delay, file-system changes, settings changes) and
//! coalesces bursts of events with a debounce window.
//!
//! # Examples
//!
//! ```no_run
//! use basemark_index::{BaseFileIndex, Config};
//! use clap::Parser;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::parse_from(["basemark", "--root", "/path/to/project"]);
//! cfg.initialize()?;
//!
//! let index = BaseFileIndex::new(cfg.roots.clone(), cfg.load_settings()?);
//! let snapshot = index.refresh();
//! println!("{} base files", snapshot.base_files.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod index;
mod policy;
mod scanner;
mod types;
mod watch;

// Re-export public API
pub use config::{Config, WatchOptions};
pub use index::BaseFileIndex;
pub use policy::{DEFAULT_DEBOUNCE, DEFAULT_STARTUP_DELAY, Debouncer, RefreshPolicy};
pub use types::{Snapshot, Trigger};
pub use watch::{trigger_for_event, watch};
