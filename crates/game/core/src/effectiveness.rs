//! Type effectiveness lookup.
//!
//! A fixed square matrix over [`MonType`], one entry per attack × defense
//! pair. Lookups are total: every pair has an entry.

use strum::EnumCount;

use crate::types::{MonType, TypeSet};

/// Single attack-vs-defense matchup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effectiveness {
    /// 0×
    Immune,
    /// 0.5×
    NotVery,
    /// 1×
    Neutral,
    /// 2×
    Super,
}

impl Effectiveness {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Immune => 0.0,
            Self::NotVery => 0.5,
            Self::Neutral => 1.0,
            Self::Super => 2.0,
        }
    }
}

const X: Effectiveness = Effectiveness::Immune;
const H: Effectiveness = Effectiveness::NotVery;
const N: Effectiveness = Effectiveness::Neutral;
const S: Effectiveness = Effectiveness::Super;

const SIZE: usize = MonType::COUNT;

/// Rows are attacking types, columns defending types, both in
/// [`MonType`] declaration order:
/// Nor Fir Wat Gra Ele Ice Fig Poi Gro Fly Psy Bug Roc Gho Dra Dar Ste Fai
#[rustfmt::skip]
const DEFAULT_CHART: [[Effectiveness; SIZE]; SIZE] = [
    /* Normal   */ [N, N, N, N, N, N, N, N, N, N, N, N, H, X, N, N, H, N],
    /* Fire     */ [N, H, H, S, N, S, N, N, N, N, N, S, H, N, H, N, S, N],
    /* Water    */ [N, S, H, H, N, N, N, N, S, N, N, N, S, N, H, N, N, N],
    /* Grass    */ [N, H, S, H, N, N, N, H, S, H, N, H, S, N, H, N, H, N],
    /* Electric */ [N, N, S, H, H, N, N, N, X, S, N, N, N, N, H, N, N, N],
    /* Ice      */ [N, H, H, S, N, H, N, N, S, S, N, N, N, N, S, N, H, N],
    /* Fighting */ [S, N, N, N, N, S, N, H, N, H, H, H, S, X, N, S, S, H],
    /* Poison   */ [N, N, N, S, N, N, N, H, H, N, N, N, H, H, N, N, X, S],
    /* Ground   */ [N, S, N, H, S, N, N, S, N, X, N, H, S, N, N, N, S, N],
    /* Flying   */ [N, N, N, S, H, N, S, N, N, N, N, S, H, N, N, N, H, N],
    /* Psychic  */ [N, N, N, N, N, N, S, S, N, N, H, N, N, N, N, X, H, N],
    /* Bug      */ [N, H, N, S, N, N, H, H, N, H, S, N, N, H, N, S, H, H],
    /* Rock     */ [N, S, N, N, N, S, H, N, H, S, N, S, N, N, N, N, H, N],
    /* Ghost    */ [X, N, N, N, N, N, N, N, N, N, S, N, N, S, N, H, N, N],
    /* Dragon   */ [N, N, N, N, N, N, N, N, N, N, N, N, N, N, S, N, H, X],
    /* Dark     */ [N, N, N, N, N, N, H, N, N, N, S, N, N, S, N, H, N, H],
    /* Steel    */ [N, H, H, N, H, S, N, N, N, N, N, N, S, N, N, N, H, S],
    /* Fairy    */ [N, H, N, N, N, N, S, H, N, N, N, N, N, N, S, S, H, N],
];

/// Attack/defense type multiplier table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeChart {
    cells: [[Effectiveness; SIZE]; SIZE],
}

impl TypeChart {
    /// The standard chart.
    pub const fn standard() -> Self {
        Self {
            cells: DEFAULT_CHART,
        }
    }

    /// Returns a copy of this chart with one matchup replaced.
    #[must_use]
    pub fn with_override(
        mut self,
        attack: MonType,
        defense: MonType,
        value: Effectiveness,
    ) -> Self {
        self.cells[attack.index()][defense.index()] = value;
        self
    }

    /// Applies a batch of overrides, later entries winning.
    #[must_use]
    pub fn with_overrides(
        self,
        overrides: impl IntoIterator<Item = (MonType, MonType, Effectiveness)>,
    ) -> Self {
        overrides
            .into_iter()
            .fold(self, |chart, (attack, defense, value)| {
                chart.with_override(attack, defense, value)
            })
    }

    /// Matchup of one attacking type against one defending type.
    #[inline]
    pub fn matchup(&self, attack: MonType, defense: MonType) -> Effectiveness {
        self.cells[attack.index()][defense.index()]
    }

    /// Multiplier against a (possibly dual-typed) defender.
    ///
    /// Dual types multiply their per-type lookups; the product is not
    /// re-normalized, so 2× · 2× = 4× and 2× · 0× = 0×.
    pub fn effectiveness(&self, attack: MonType, defender: &TypeSet) -> f64 {
        defender
            .iter()
            .map(|defense| self.matchup(attack, defense).multiplier())
            .product()
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_type_lookups() {
        let chart = TypeChart::standard();
        let grass = TypeSet::single(MonType::Grass);
        assert_eq!(chart.effectiveness(MonType::Fire, &grass), 2.0);
        assert_eq!(chart.effectiveness(MonType::Water, &grass), 0.5);
        assert_eq!(chart.effectiveness(MonType::Normal, &grass), 1.0);
        assert_eq!(
            chart.effectiveness(MonType::Ground, &TypeSet::single(MonType::Flying)),
            0.0
        );
    }

    #[test]
    fn dual_types_multiply_without_normalizing() {
        let chart = TypeChart::standard();
        let grass_bug = TypeSet::dual(MonType::Grass, MonType::Bug);
        assert_eq!(chart.effectiveness(MonType::Fire, &grass_bug), 4.0);

        let water_ground = TypeSet::dual(MonType::Water, MonType::Ground);
        assert_eq!(chart.effectiveness(MonType::Electric, &water_ground), 0.0);

        let fire_water = TypeSet::dual(MonType::Fire, MonType::Water);
        assert_eq!(chart.effectiveness(MonType::Fire, &fire_water), 0.25);
    }

    #[test]
    fn overrides_replace_one_cell() {
        let chart = TypeChart::standard().with_override(
            MonType::Normal,
            MonType::Ghost,
            Effectiveness::Neutral,
        );
        assert_eq!(
            chart.effectiveness(MonType::Normal, &TypeSet::single(MonType::Ghost)),
            1.0
        );
        assert_eq!(
            chart.effectiveness(MonType::Normal, &TypeSet::single(MonType::Rock)),
            0.5
        );
    }
}
