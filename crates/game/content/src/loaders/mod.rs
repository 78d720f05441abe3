//! Content loaders for reading game data from files.
//!
//! Loaders parse RON/TOML into `mon-core` types and run the core's
//! validation, so anything they return is ready to hand to a world session.

pub mod chart;
pub mod config;
pub mod curses;
pub mod factory;

pub use chart::{ChartLoader, MatchupOverride};
pub use config::ConfigLoader;
pub use curses::{CurseLoader, CurseSpec};
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
