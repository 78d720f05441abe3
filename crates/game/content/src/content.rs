//! Loaded content bundle handed to a world session.

use mon_core::{CursePool, GameConfig, TypeChart};

/// Everything a world session needs from content.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub curses: CursePool,
    pub chart: TypeChart,
}

impl Content {
    /// Content with the standard type chart and default rules.
    pub fn new(curses: CursePool) -> Self {
        Self {
            config: GameConfig::default(),
            curses,
            chart: TypeChart::standard(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: TypeChart) -> Self {
        self.chart = chart;
        self
    }
}
