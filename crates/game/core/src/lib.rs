//! Deterministic game rules shared by world sessions and offline tools.
//!
//! `mon-core` defines the canonical rules (type effectiveness, combat,
//! capture, the curse cycle) as pure APIs over explicit inputs. There are
//! no globals: the [`ModifierRegistry`] is owned by a [`CurseScheduler`] and
//! readers receive snapshots; every roll draws from an [`RngSource`] passed
//! in by the caller.
pub mod action;
pub mod capture;
pub mod combat;
pub mod config;
pub mod curse;
pub mod effectiveness;
pub mod entity;
pub mod error;
pub mod modifiers;
pub mod rng;
pub mod types;

pub use action::{PlayerAction, Punch, RollContext};
pub use capture::{
    CaptureOutcome, RejectReason, attempt_capture, capture_probability, check_preconditions,
};
pub use combat::{CombatResolver, CombatResult, CounterOutcome, MIN_DAMAGE, Move};
pub use config::{CaptureRules, CombatRules, CycleConfig, DamageFormula, GameConfig};
pub use curse::{
    Curse, CurseId, CursePool, CurseRef, CurseScheduler, CurseStateChangeEvent, CyclePhase,
    CycleState, TransitionCause,
};
pub use effectiveness::{Effectiveness, TypeChart};
pub use entity::{
    BaseStats, Book, BookCapabilities, BookError, BookTier, CaptureTarget, CombatFlags, Combatant,
    CombatantId, Health, Side,
};
pub use error::{
    ConfigError, ErrorSeverity, GameError, InvariantViolation, RegistryError, SchedulerError,
};
pub use modifiers::{
    Effect, EffectSet, ModifierKey, ModifierRegistry, ModifierSnapshot, ModifierSource,
    ModifierValue, RegistryReader, StatKind,
};
pub use rng::{PcgRng, RngSource, ScriptedRng, compute_seed};
pub use types::{MonType, TypeSet};
