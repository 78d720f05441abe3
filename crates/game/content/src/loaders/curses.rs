//! Curse pool loader.

use std::path::Path;

use anyhow::Context;
use mon_core::{Curse, CurseId, CursePool, Effect, EffectSet};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One curse as written in a RON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurseSpec {
    pub id: u32,
    pub name: String,
    /// Active time; omitted to use the configured default.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub effects: Vec<Effect>,
}

fn default_weight() -> u32 {
    1
}

impl CurseSpec {
    /// Validates the effect list and builds the core curse.
    pub fn into_curse(self) -> LoadResult<Curse> {
        let effects = EffectSet::new(self.effects)
            .with_context(|| format!("Invalid effects for curse '{}'", self.name))?;
        Ok(Curse {
            id: CurseId(self.id),
            name: self.name,
            duration_ms: self.duration_ms,
            weight: self.weight,
            effects,
        })
    }
}

/// Curse catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurseCatalog {
    pub curses: Vec<CurseSpec>,
}

/// Loader for the curse pool from RON files.
pub struct CurseLoader;

impl CurseLoader {
    /// Load a curse pool from a RON file.
    pub fn load(path: &Path) -> LoadResult<CursePool> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| e.context(format!("Invalid curse catalog {}", path.display())))
    }

    /// Parse a curse pool from a RON string.
    pub fn parse(content: &str) -> LoadResult<CursePool> {
        let catalog: CurseCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse curse catalog RON: {}", e))?;

        let curses = catalog
            .curses
            .into_iter()
            .map(CurseSpec::into_curse)
            .collect::<LoadResult<Vec<_>>>()?;
        let pool = CursePool::new(curses)?;

        tracing::debug!(curses = pool.len(), "curse pool loaded");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mon_core::ModifierKey;
    use std::time::Duration;

    const CATALOG: &str = r#"
        (
            curses: [
                (
                    id: 1,
                    name: "PowerfulMons",
                    weight: 2,
                    effects: [
                        (key: wild_attack, value: multiplier(2.0)),
                        (key: wild_defense, value: multiplier(2.0)),
                    ],
                ),
                (
                    id: 3,
                    name: "NoCapture",
                    duration_ms: Some(15000),
                    effects: [(key: no_capture, value: flag(true))],
                ),
            ],
        )
    "#;

    #[test]
    fn parses_catalog() {
        let pool = CurseLoader::parse(CATALOG).expect("valid catalog");
        assert_eq!(pool.len(), 2);

        let powerful = pool.get(CurseId(1)).expect("curse 1");
        assert_eq!(powerful.weight, 2);
        assert_eq!(powerful.effects.len(), 2);

        let no_capture = pool.get(CurseId(3)).expect("curse 3");
        assert_eq!(no_capture.weight, 1);
        assert_eq!(no_capture.duration_or(Duration::ZERO), Duration::from_secs(15));
        assert!(no_capture.effects.get(ModifierKey::NoCapture).is_some());
    }

    #[test]
    fn rejects_mismatched_value_kind() {
        let bad = r#"(curses: [(
            id: 1,
            name: "Broken",
            effects: [(key: no_capture, value: multiplier(2.0))],
        )])"#;
        let err = CurseLoader::parse(bad).expect_err("flag key with multiplier");
        assert!(format!("{err:#}").contains("no_capture"));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(CurseLoader::parse("(curses: [])").is_err());
    }
}
