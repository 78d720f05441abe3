//! Value types supplied by collaborators: combatants, capture targets, books.
//!
//! Resolvers only read these. Health changes are applied by the caller
//! after resolution.

mod book;
mod combatant;

pub use book::{Book, BookCapabilities, BookError, BookTier, CaptureTarget};
pub use combatant::{BaseStats, CombatFlags, Combatant, CombatantId, Health, Side};
