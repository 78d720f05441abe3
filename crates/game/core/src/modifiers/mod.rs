//! Global modifier registry.
//!
//! # Architecture
//!
//! - [`EffectSet`]: validated batch of (modifier, value) pairs
//! - [`ModifierSnapshot`]: immutable value read by combat and capture
//! - [`ModifierRegistry`]: the single writer, owned by the curse scheduler
//! - [`RegistryReader`]: cloneable read handle for resolution calls
//!
//! `apply(source, effects)` and `revert(source)` are inverses: entries are
//! tracked per contributing source, so reverting removes exactly what was
//! applied and nothing else.

mod effect;
mod key;
mod registry;
mod snapshot;

pub use effect::{Effect, EffectSet};
pub use key::{ModifierKey, ModifierSource, ModifierValue, StatKind, ValueKind};
pub use registry::{ModifierRegistry, RegistryReader};
pub use snapshot::ModifierSnapshot;
