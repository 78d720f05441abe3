//! Curse definitions and the weighted pool they are drawn from.

use core::fmt;
use std::collections::HashSet;
use std::time::Duration;

use crate::error::ConfigError;
use crate::modifiers::EffectSet;
use crate::rng::RngSource;

/// Identity of a curse within a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseId(pub u32);

impl fmt::Display for CurseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A timed global modifier batch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curse {
    pub id: CurseId,
    pub name: String,
    /// Active time; `None` falls back to the cycle's default.
    pub duration_ms: Option<u64>,
    /// Relative selection weight.
    pub weight: u32,
    pub effects: EffectSet,
}

impl Curse {
    pub fn new(id: CurseId, name: impl Into<String>, effects: EffectSet) -> Self {
        Self {
            id,
            name: name.into(),
            duration_ms: None,
            weight: 1,
            effects,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Active time, falling back to `default` when unset.
    pub fn duration_or(&self, default: Duration) -> Duration {
        self.duration_ms.map_or(default, Duration::from_millis)
    }
}

/// Non-empty set of curses with positive weights and unique ids.
#[derive(Clone, Debug, PartialEq)]
pub struct CursePool {
    curses: Vec<Curse>,
    total_weight: u64,
}

impl CursePool {
    pub fn new(curses: Vec<Curse>) -> Result<Self, ConfigError> {
        if curses.is_empty() {
            return Err(ConfigError::EmptyCursePool);
        }

        let mut seen = HashSet::with_capacity(curses.len());
        for curse in &curses {
            if !seen.insert(curse.id) {
                return Err(ConfigError::DuplicateCurse(curse.id));
            }
            if curse.weight == 0 {
                return Err(ConfigError::ZeroWeight(curse.id));
            }
            if curse.effects.is_empty() {
                return Err(ConfigError::EmptyCurse(curse.id));
            }
            if curse.duration_ms == Some(0) {
                return Err(ConfigError::ZeroDuration {
                    field: "curse.duration_ms",
                });
            }
        }

        let total_weight = curses.iter().map(|curse| u64::from(curse.weight)).sum();
        Ok(Self {
            curses,
            total_weight,
        })
    }

    pub fn get(&self, id: CurseId) -> Option<&Curse> {
        self.curses.iter().find(|curse| curse.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Curse> {
        self.curses.iter()
    }

    pub fn len(&self) -> usize {
        self.curses.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.curses.is_empty()
    }

    /// Weighted draw using one roll. Equal weights give a uniform draw.
    pub fn select(&self, rng: &mut impl RngSource) -> &Curse {
        let mut ticket = rng.below(self.total_weight);
        for curse in &self.curses {
            let weight = u64::from(curse.weight);
            if ticket < weight {
                return curse;
            }
            ticket -= weight;
        }
        // `below` returns values under the total weight
        &self.curses[self.curses.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{Effect, ModifierKey};
    use crate::rng::{PcgRng, ScriptedRng};

    fn curse(id: u32, weight: u32) -> Curse {
        let effects = EffectSet::new([Effect::flag(ModifierKey::NoCapture)]).expect("valid");
        Curse::new(CurseId(id), format!("curse-{id}"), effects).with_weight(weight)
    }

    #[test]
    fn construction_validates_pool() {
        assert_eq!(CursePool::new(vec![]), Err(ConfigError::EmptyCursePool));
        assert_eq!(
            CursePool::new(vec![curse(1, 1), curse(1, 2)]),
            Err(ConfigError::DuplicateCurse(CurseId(1)))
        );
        assert_eq!(
            CursePool::new(vec![curse(1, 0)]),
            Err(ConfigError::ZeroWeight(CurseId(1)))
        );
        let hollow = Curse::new(CurseId(4), "hollow", EffectSet::empty());
        assert_eq!(
            CursePool::new(vec![hollow]),
            Err(ConfigError::EmptyCurse(CurseId(4)))
        );
    }

    #[test]
    fn weighted_selection_follows_roll() {
        let pool = CursePool::new(vec![curse(1, 1), curse(2, 3)]).expect("valid pool");
        // below(4): 0.1 -> 0, 0.3 -> 1, 0.9 -> 3
        let mut rng = ScriptedRng::from_units(&[0.1, 0.3, 0.9]);
        assert_eq!(pool.select(&mut rng).id, CurseId(1));
        assert_eq!(pool.select(&mut rng).id, CurseId(2));
        assert_eq!(pool.select(&mut rng).id, CurseId(2));
    }

    #[test]
    fn every_curse_is_reachable() {
        let pool = CursePool::new(vec![curse(1, 1), curse(2, 1), curse(3, 1)]).expect("valid");
        let mut rng = PcgRng::new(5);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(pool.select(&mut rng).id);
        }
        assert_eq!(seen.len(), 3);
    }
}
