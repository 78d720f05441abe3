//! Combat stat blocks.

use core::fmt;

use bitflags::bitflags;

use crate::config::check_probability;
use crate::error::ConfigError;
use crate::modifiers::{ModifierSnapshot, StatKind};
use crate::types::TypeSet;

/// Stable identity of a Mon or player avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side a combatant fights for. Decides which curse stat modifiers
/// apply to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Wild,
}

bitflags! {
    /// Counter-attack capabilities.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CombatFlags: u8 {
        /// May punch back after surviving a hit.
        const COUNTER_PUNCH = 1 << 0;
        /// May vaporize the player after surviving a hit.
        const VAPORIZE = 1 << 1;
    }
}

/// Current and maximum health. `current <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Creates a meter, clamping `current` into `[0, max]`.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Fraction of health remaining in `[0, 1]`. A zero-max meter reads 0.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.max)
        }
    }

    /// Health after taking `damage`, clamped at 0.
    #[must_use]
    pub const fn damaged(self, damage: u32) -> Self {
        Self {
            current: self.current.saturating_sub(damage),
            max: self.max,
        }
    }
}

/// Base combat stats before modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub const fn new(attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }

    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}

/// A creature (or the player's avatar) as seen by combat.
///
/// Stat blocks come from the Mon-data collaborator. Chances are
/// probabilities in `[0, 1]`, checked by [`validate`](Self::validate).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub side: Side,
    pub types: TypeSet,
    pub health: Health,
    pub stats: BaseStats,
    pub critical_chance: f64,
    /// Chance of a counter-punch after surviving a hit.
    pub counter_chance: f64,
    /// Chance of vaporizing the player after surviving a hit.
    pub vaporize_chance: f64,
    pub flags: CombatFlags,
}

impl Combatant {
    /// A combatant at full health with no crit or counter ability.
    pub fn new(
        id: CombatantId,
        side: Side,
        types: impl Into<TypeSet>,
        max_health: u32,
        stats: BaseStats,
    ) -> Self {
        Self {
            id,
            side,
            types: types.into(),
            health: Health::full(max_health),
            stats,
            critical_chance: 0.0,
            counter_chance: 0.0,
            vaporize_chance: 0.0,
            flags: CombatFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_health(mut self, current: u32) -> Self {
        self.health = Health::new(current, self.health.max());
        self
    }

    #[must_use]
    pub fn with_critical_chance(mut self, chance: f64) -> Self {
        self.critical_chance = chance;
        self
    }

    /// Enables counter-punching with the given chance.
    #[must_use]
    pub fn with_counter_punch(mut self, chance: f64) -> Self {
        self.flags |= CombatFlags::COUNTER_PUNCH;
        self.counter_chance = chance;
        self
    }

    /// Enables vaporizing with the given chance.
    #[must_use]
    pub fn with_vaporize(mut self, chance: f64) -> Self {
        self.flags |= CombatFlags::VAPORIZE;
        self.vaporize_chance = chance;
        self
    }

    pub const fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("combatant.critical_chance", self.critical_chance)?;
        check_probability("combatant.counter_chance", self.counter_chance)?;
        check_probability("combatant.vaporize_chance", self.vaporize_chance)
    }

    pub fn can_counter(&self) -> bool {
        self.flags
            .intersects(CombatFlags::COUNTER_PUNCH | CombatFlags::VAPORIZE)
    }

    /// Base stat scaled by the active multiplier for this combatant's side.
    pub fn effective(&self, stat: StatKind, modifiers: &ModifierSnapshot) -> f64 {
        f64::from(self.stats.get(stat)) * modifiers.stat_multiplier(self.side, stat)
    }

    pub fn effective_attack(&self, modifiers: &ModifierSnapshot) -> f64 {
        self.effective(StatKind::Attack, modifiers)
    }

    pub fn effective_defense(&self, modifiers: &ModifierSnapshot) -> f64 {
        self.effective(StatKind::Defense, modifiers)
    }

    pub fn effective_speed(&self, modifiers: &ModifierSnapshot) -> f64 {
        self.effective(StatKind::Speed, modifiers)
    }

    /// Reduces health by `damage`, clamped at 0.
    pub fn apply_damage(&mut self, damage: u32) {
        self.health = self.health.damaged(damage);
    }
}
