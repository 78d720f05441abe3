//! Effect sets: the (modifier, value) batches a curse or override applies.

use std::collections::BTreeMap;

use crate::error::ConfigError;

use super::key::{ModifierKey, ModifierValue};

/// One (modifier, value) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub key: ModifierKey,
    pub value: ModifierValue,
}

impl Effect {
    pub const fn multiplier(key: ModifierKey, factor: f64) -> Self {
        Self {
            key,
            value: ModifierValue::Multiplier(factor),
        }
    }

    pub const fn flag(key: ModifierKey) -> Self {
        Self {
            key,
            value: ModifierValue::Flag(true),
        }
    }
}

/// Validated batch of effects, at most one value per key.
///
/// Repeated keys in the input are merged (multipliers multiply, flags OR).
/// Multipliers must be finite and non-negative, and each value must match
/// its key's kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Effect>", into = "Vec<Effect>"))]
pub struct EffectSet {
    entries: BTreeMap<ModifierKey, ModifierValue>,
}

impl EffectSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(effects: impl IntoIterator<Item = Effect>) -> Result<Self, ConfigError> {
        let mut entries: BTreeMap<ModifierKey, ModifierValue> = BTreeMap::new();

        for Effect { key, value } in effects {
            let expected = key.value_kind();
            if value.kind() != expected {
                return Err(ConfigError::ValueKindMismatch {
                    key,
                    expected: expected.as_str(),
                });
            }
            if let ModifierValue::Multiplier(factor) = value
                && !(factor.is_finite() && factor >= 0.0)
            {
                return Err(ConfigError::InvalidMultiplier {
                    field: key.into(),
                    value: factor,
                });
            }

            let merged = match entries.get(&key) {
                // Same kind is guaranteed by the check above.
                Some(existing) => existing.combine(value).unwrap_or(value),
                None => value,
            };
            entries.insert(key, merged);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: ModifierKey) -> Option<ModifierValue> {
        self.entries.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModifierKey, ModifierValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Effect>> for EffectSet {
    type Error = ConfigError;

    fn try_from(effects: Vec<Effect>) -> Result<Self, Self::Error> {
        Self::new(effects)
    }
}

impl From<EffectSet> for Vec<Effect> {
    fn from(set: EffectSet) -> Self {
        set.iter()
            .map(|(key, value)| Effect { key, value })
            .collect()
    }
}
