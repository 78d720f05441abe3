//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod simulate;

pub use check_content::CheckContent;
pub use simulate::Simulate;

use std::path::PathBuf;

/// Content directory: `--data-dir`, then `MON_DATA_DIR`, then the bundled data.
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("MON_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
        })
}
