//! Combat resolution.
//!
//! Pure functions of their inputs: a [`CombatResolver`] reads a modifier
//! snapshot and an explicit RNG and returns a [`CombatResult`]. Applying the
//! result to combatants is the caller's job.
//!
//! - `calculate_damage`: raw damage, type and crit multipliers, floor of 1
//! - `CombatResolver::resolve`: crit roll, damage, counter decision
//! - `CombatResult::apply`: health updates, clamped at 0

pub mod damage;
pub mod resolver;
pub mod result;

pub use damage::{DamageInput, MIN_DAMAGE, Move, calculate_damage};
pub use resolver::CombatResolver;
pub use result::{CombatResult, CounterOutcome};
