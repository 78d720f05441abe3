//! Game configuration and tunable balance parameters.
//!
//! Durations are stored in milliseconds so config files stay flat numbers;
//! accessors return [`Duration`].

use std::time::Duration;

use crate::entity::BookTier;
use crate::error::ConfigError;

/// Top-level rules configuration for one world.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub cycle: CycleConfig,
    pub combat: CombatRules,
    pub capture: CaptureRules,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cycle.validate()?;
        self.combat.validate()?;
        self.capture.validate()
    }
}

/// Curse cycle timing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleConfig {
    /// Quiet time between curses.
    pub rest_ms: u64,
    /// Notice given before a curse takes effect.
    pub warning_ms: u64,
    /// Active time for curses that do not set their own duration.
    pub curse_ms: u64,
}

impl CycleConfig {
    pub const DEFAULT_REST_MS: u64 = 60_000;
    pub const DEFAULT_WARNING_MS: u64 = 2_000;
    pub const DEFAULT_CURSE_MS: u64 = 30_000;

    pub const fn rest(&self) -> Duration {
        Duration::from_millis(self.rest_ms)
    }

    pub const fn warning(&self) -> Duration {
        Duration::from_millis(self.warning_ms)
    }

    pub const fn curse(&self) -> Duration {
        Duration::from_millis(self.curse_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cycle.rest_ms", self.rest_ms),
            ("cycle.warning_ms", self.warning_ms),
            ("cycle.curse_ms", self.curse_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }
        Ok(())
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            rest_ms: Self::DEFAULT_REST_MS,
            warning_ms: Self::DEFAULT_WARNING_MS,
            curse_ms: Self::DEFAULT_CURSE_MS,
        }
    }
}

/// How raw damage is derived from attack and defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageFormula {
    /// `power × attack / defense`
    #[default]
    Ratio,
    /// `(attack − defense) × power / 100`
    Difference,
}

/// Combat balance parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    pub formula: DamageFormula,
    pub critical_multiplier: f64,
    /// Base power of a counter-punch.
    pub counter_power: u32,
}

impl CombatRules {
    pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_COUNTER_POWER: u32 = 40;

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_multiplier("combat.critical_multiplier", self.critical_multiplier)
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            formula: DamageFormula::default(),
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            counter_power: Self::DEFAULT_COUNTER_POWER,
        }
    }
}

/// Capture bonus granted by each book tier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaptureRules {
    pub starter_bonus: f64,
    pub standard_bonus: f64,
    pub advanced_bonus: f64,
    pub master_bonus: f64,
}

impl CaptureRules {
    pub const fn book_bonus(&self, tier: BookTier) -> f64 {
        match tier {
            BookTier::Starter => self.starter_bonus,
            BookTier::Standard => self.standard_bonus,
            BookTier::Advanced => self.advanced_bonus,
            BookTier::Master => self.master_bonus,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_multiplier("capture.starter_bonus", self.starter_bonus)?;
        check_multiplier("capture.standard_bonus", self.standard_bonus)?;
        check_multiplier("capture.advanced_bonus", self.advanced_bonus)?;
        check_multiplier("capture.master_bonus", self.master_bonus)
    }
}

impl Default for CaptureRules {
    fn default() -> Self {
        Self {
            starter_bonus: 1.0,
            standard_bonus: 1.25,
            advanced_bonus: 1.5,
            master_bonus: 2.0,
        }
    }
}

pub(crate) fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { field, value })
    }
}

fn check_multiplier(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier { field, value })
    }
}
