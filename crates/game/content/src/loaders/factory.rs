//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use mon_core::{CursePool, GameConfig, TypeChart};

use crate::content::Content;
use crate::loaders::{ChartLoader, ConfigLoader, CurseLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── curses.ron
/// └── chart.ron      (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the curse pool from `curses.ron`.
    pub fn load_curses(&self) -> LoadResult<CursePool> {
        CurseLoader::load(&self.data_dir.join("curses.ron"))
    }

    /// Load the type chart, applying `chart.ron` overrides when present.
    pub fn load_chart(&self) -> LoadResult<TypeChart> {
        let path = self.data_dir.join("chart.ron");
        if path.exists() {
            ChartLoader::load(&path)
        } else {
            Ok(TypeChart::standard())
        }
    }

    /// Load everything a world session needs.
    pub fn load(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            curses: self.load_curses()?,
            chart: self.load_chart()?,
        };
        tracing::info!(
            data_dir = %self.data_dir.display(),
            curses = content.curses.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
