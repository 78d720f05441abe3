//! Timed curse cycle.
//!
//! A [`CurseScheduler`] owns the world's [`ModifierRegistry`](crate::modifiers::ModifierRegistry)
//! and is its only writer. It rests, announces a curse drawn from the
//! [`CursePool`], applies the curse's effect set, and reverts it when the
//! curse expires.

mod event;
mod pool;
mod scheduler;

pub use event::{CurseRef, CurseStateChangeEvent, CyclePhase, TransitionCause};
pub use pool::{Curse, CurseId, CursePool};
pub use scheduler::{CurseScheduler, CycleState};
