//! Type chart override loader.

use std::path::Path;

use mon_core::{Effectiveness, MonType, TypeChart};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A single matchup replacing the standard chart's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupOverride {
    pub attack: MonType,
    pub defense: MonType,
    pub effectiveness: Effectiveness,
}

/// Chart override structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartOverrides {
    #[serde(default)]
    pub overrides: Vec<MatchupOverride>,
}

/// Loader for type chart balancing overrides.
pub struct ChartLoader;

impl ChartLoader {
    /// Load overrides from a RON file and apply them to the standard chart.
    pub fn load(path: &Path) -> LoadResult<TypeChart> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TypeChart> {
        let chart: ChartOverrides = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse chart overrides RON: {}", e))?;

        Ok(TypeChart::standard().with_overrides(
            chart
                .overrides
                .into_iter()
                .map(|o| (o.attack, o.defense, o.effectiveness)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_single_matchups() {
        let chart = ChartLoader::parse(
            "(overrides: [(attack: normal, defense: ghost, effectiveness: not_very)])",
        )
        .expect("valid overrides");

        assert_eq!(chart.matchup(MonType::Normal, MonType::Ghost), Effectiveness::NotVery);
        assert_eq!(chart.matchup(MonType::Fire, MonType::Grass), Effectiveness::Super);
    }

    #[test]
    fn empty_file_is_standard_chart() {
        assert_eq!(ChartLoader::parse("()").expect("valid"), TypeChart::standard());
    }
}
