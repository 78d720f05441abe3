//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into validated `mon-core` values:
//! - Game configuration: cycle timing, combat and capture rules (TOML)
//! - Curse pool: names, weights, durations, effect sets (RON)
//! - Type chart overrides for balancing (RON, optional)
//!
//! Curse magnitudes live here as data, never as constants in the rules core.

pub mod content;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::Content;

#[cfg(feature = "loaders")]
pub use loaders::{
    ChartLoader, ConfigLoader, ContentFactory, CurseLoader, CurseSpec, MatchupOverride,
};
