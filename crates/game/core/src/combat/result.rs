//! Combat result types.

use crate::entity::Combatant;

/// What the defender did after surviving a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterOutcome {
    #[default]
    None,
    /// Damage dealt back to the attacker.
    CounterPunch(u32),
    /// Instant elimination of the attacker.
    Vaporize,
}

/// Result of resolving one attack.
///
/// The resolver never mutates combatants; callers apply the result with
/// [`apply`](Self::apply) or on their own authoritative copies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    /// Damage dealt to the defender. Always at least 1.
    pub damage: u32,
    pub was_critical: bool,
    /// Effectiveness of the move against the defender's types.
    pub type_multiplier: f64,
    pub defender_defeated: bool,
    pub counter: CounterOutcome,
}

impl CombatResult {
    /// Applies damage to the defender and any counter to the attacker.
    pub fn apply(&self, attacker: &mut Combatant, defender: &mut Combatant) {
        defender.apply_damage(self.damage);
        match self.counter {
            CounterOutcome::None => {}
            CounterOutcome::CounterPunch(damage) => attacker.apply_damage(damage),
            CounterOutcome::Vaporize => attacker.apply_damage(attacker.health.current()),
        }
    }

    /// True when the attacker is knocked out by the counter.
    pub fn attacker_eliminated(&self, attacker: &Combatant) -> bool {
        match self.counter {
            CounterOutcome::None => false,
            CounterOutcome::CounterPunch(damage) => damage >= attacker.health.current(),
            CounterOutcome::Vaporize => true,
        }
    }
}
