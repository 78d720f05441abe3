//! Damage calculation.

use crate::config::DamageFormula;
use crate::error::InvariantViolation;
use crate::types::MonType;

/// Smallest damage any landed hit can deal.
pub const MIN_DAMAGE: u32 = 1;

/// An attack as seen by the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub name: String,
    pub move_type: MonType,
    pub base_power: u32,
}

impl Move {
    pub fn new(name: impl Into<String>, move_type: MonType, base_power: u32) -> Self {
        Self {
            name: name.into(),
            move_type,
            base_power,
        }
    }

    /// Same move with its power scaled by `factor`, rounded to nearest.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let power = (f64::from(self.base_power) * factor.max(0.0)).round();
        Self {
            name: self.name.clone(),
            move_type: self.move_type,
            base_power: power.min(f64::from(u32::MAX)) as u32,
        }
    }
}

/// Inputs to one damage computation, after modifiers are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageInput {
    pub power: u32,
    pub attack: f64,
    pub defense: f64,
    pub type_multiplier: f64,
    pub critical_multiplier: f64,
}

/// Calculate the damage of one hit.
///
/// # Formula
///
/// ```text
/// Ratio:      raw = power × attack / defense   (zero defense counts as 1)
/// Difference: raw = (attack − defense) × power / 100
///
/// damage = max(1, round(raw × type_multiplier × critical_multiplier))
/// ```
///
/// Rounding is half away from zero. Immune matchups still deal the minimum.
pub fn calculate_damage(formula: DamageFormula, input: DamageInput) -> u32 {
    let power = f64::from(input.power);
    let raw = match formula {
        DamageFormula::Ratio => {
            let defense = if input.defense > 0.0 { input.defense } else { 1.0 };
            power * input.attack / defense
        }
        DamageFormula::Difference => (input.attack - input.defense) * power / 100.0,
    };
    let scaled = raw * input.type_multiplier * input.critical_multiplier;

    if !scaled.is_finite() {
        InvariantViolation::NonFiniteDamage(scaled).report();
        return MIN_DAMAGE;
    }

    let rounded = scaled.round();
    if rounded <= f64::from(MIN_DAMAGE) {
        MIN_DAMAGE
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}
