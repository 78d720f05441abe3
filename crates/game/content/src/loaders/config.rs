//! Game configuration loader.

use std::path::Path;

use mon_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    ///
    /// Missing tables and keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| e.context(format!("Invalid config file {}", path.display())))
    }

    /// Parse and validate config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mon_core::{BookTier, DamageFormula};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [cycle]
            rest_ms = 45000

            [combat]
            formula = "difference"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.cycle.rest_ms, 45_000);
        assert_eq!(config.cycle.warning_ms, 2_000);
        assert_eq!(config.combat.formula, DamageFormula::Difference);
        assert_eq!(config.capture.book_bonus(BookTier::Master), 2.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[cycle]\ncurse_ms = 0\n").expect_err("zero duration");
        assert!(err.to_string().contains("cycle.curse_ms"));
    }
}
