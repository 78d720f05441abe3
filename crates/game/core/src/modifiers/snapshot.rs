//! Immutable view of every active modifier.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::entity::Side;

use super::effect::EffectSet;
use super::key::{ModifierKey, ModifierSource, ModifierValue, StatKind};

/// Registry contents at one point in time.
///
/// Each key keeps its contributions per source. Reads fold them: multipliers
/// multiply across sources (1.0 when none), flags OR (false when none).
/// Keys with no contributions are never stored, so applying then reverting
/// a source yields a value equal to the one before, entry for entry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSnapshot {
    entries: BTreeMap<ModifierKey, BTreeMap<ModifierSource, ModifierValue>>,
}

impl ModifierSnapshot {
    /// A snapshot with no active modifiers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Combined multiplier for `key`. 1.0 when nothing contributes.
    pub fn multiplier(&self, key: ModifierKey) -> f64 {
        self.entries
            .get(&key)
            .map(|by_source| {
                by_source
                    .values()
                    .filter_map(|value| match value {
                        ModifierValue::Multiplier(factor) => Some(*factor),
                        ModifierValue::Flag(_) => None,
                    })
                    .product()
            })
            .unwrap_or(1.0)
    }

    /// Combined flag for `key`. False when nothing contributes.
    pub fn flag(&self, key: ModifierKey) -> bool {
        self.entries.get(&key).is_some_and(|by_source| {
            by_source
                .values()
                .any(|value| matches!(value, ModifierValue::Flag(true)))
        })
    }

    /// Multiplier scaling `stat` for combatants on `side`.
    pub fn stat_multiplier(&self, side: Side, stat: StatKind) -> f64 {
        self.multiplier(ModifierKey::for_stat(side, stat))
    }

    pub fn capture_disabled(&self) -> bool {
        self.flag(ModifierKey::NoCapture)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (key, source) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn has_source(&self, source: ModifierSource) -> bool {
        self.source_entries(source) > 0
    }

    /// Number of keys `source` contributes to.
    pub fn source_entries(&self, source: ModifierSource) -> usize {
        self.entries
            .values()
            .filter(|by_source| by_source.contains_key(&source))
            .count()
    }

    /// Distinct sources with at least one entry, in order.
    pub fn sources(&self) -> Vec<ModifierSource> {
        let mut sources: Vec<ModifierSource> = self
            .entries
            .values()
            .flat_map(|by_source| by_source.keys().copied())
            .collect();
        sources.sort_unstable();
        sources.dedup();
        sources
    }

    /// Next snapshot with `effects` merged in under `source`.
    ///
    /// The caller guarantees `source` is not already present.
    pub(crate) fn with_applied(&self, source: ModifierSource, effects: &EffectSet) -> Self {
        let mut next = self.clone();
        for (key, value) in effects.iter() {
            next.entries.entry(key).or_default().insert(source, value);
        }
        next
    }

    /// Next snapshot with every entry of `source` removed, plus the count
    /// of removed entries.
    pub(crate) fn with_reverted(&self, source: ModifierSource) -> (Self, usize) {
        let mut next = self.clone();
        let mut removed = 0;
        next.entries.retain(|_, by_source| {
            if by_source.remove(&source).is_some() {
                removed += 1;
            }
            !by_source.is_empty()
        });
        (next, removed)
    }

    /// Canonical byte encoding: entries in key then source order.
    ///
    /// Multipliers are encoded by their IEEE-754 bits, so two snapshots
    /// encode identically exactly when they hold identical entries.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * 14);
        for (key, by_source) in &self.entries {
            for (source, value) in by_source {
                bytes.push(*key as u8);
                match source {
                    ModifierSource::Curse(id) => {
                        bytes.push(0);
                        bytes.extend_from_slice(&id.0.to_le_bytes());
                    }
                    ModifierSource::Override(id) => {
                        bytes.push(1);
                        bytes.extend_from_slice(&id.to_le_bytes());
                    }
                }
                match value {
                    ModifierValue::Multiplier(factor) => {
                        bytes.push(0);
                        bytes.extend_from_slice(&factor.to_bits().to_le_bytes());
                    }
                    ModifierValue::Flag(flag) => {
                        bytes.push(1);
                        bytes.push(u8::from(*flag));
                    }
                }
            }
        }
        bytes
    }

    /// SHA-256 over [`canonical_bytes`](Self::canonical_bytes).
    pub fn fingerprint(&self) -> [u8; 32] {
        Sha256::digest(self.canonical_bytes()).into()
    }
}
