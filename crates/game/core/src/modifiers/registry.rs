//! Shared, single-writer modifier registry.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::RegistryError;

use super::effect::EffectSet;
use super::key::ModifierSource;
use super::snapshot::ModifierSnapshot;

type SharedSnapshot = Arc<RwLock<Arc<ModifierSnapshot>>>;

/// Per-world table of active modifiers.
///
/// The registry value itself is the write capability: it is not `Clone`,
/// and every mutation takes `&mut self`, so one owner (the curse scheduler)
/// is the only writer. Readers hold [`RegistryReader`] handles.
///
/// Writers build the next snapshot off-lock and publish it with a pointer
/// swap. A reader therefore sees either the whole batch or none of it, and
/// keeps its snapshot for as long as it needs without blocking the writer.
#[derive(Debug)]
pub struct ModifierRegistry {
    current: SharedSnapshot,
    revision: u64,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::from_snapshot(ModifierSnapshot::empty())
    }

    pub fn from_snapshot(snapshot: ModifierSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            revision: 0,
        }
    }

    /// Cloneable read handle onto this registry.
    pub fn reader(&self) -> RegistryReader {
        RegistryReader {
            current: Arc::clone(&self.current),
        }
    }

    pub fn snapshot(&self) -> Arc<ModifierSnapshot> {
        load(&self.current)
    }

    /// Number of successful writes so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Merges `effects` under `source` as one atomic batch.
    ///
    /// An empty batch is refused: it would leave no trace for
    /// [`revert`](Self::revert) to remove.
    pub fn apply(
        &mut self,
        source: ModifierSource,
        effects: &EffectSet,
    ) -> Result<(), RegistryError> {
        if effects.is_empty() {
            return Err(RegistryError::EmptyEffects(source));
        }
        let current = self.snapshot();
        if current.has_source(source) {
            return Err(RegistryError::AlreadyApplied(source));
        }

        let next = current.with_applied(source, effects);
        self.publish(next);
        debug!(%source, entries = effects.len(), revision = self.revision, "modifiers applied");
        Ok(())
    }

    /// Removes exactly the entries contributed by `source`.
    ///
    /// Returns the number of removed entries.
    pub fn revert(&mut self, source: ModifierSource) -> Result<usize, RegistryError> {
        let current = self.snapshot();
        if !current.has_source(source) {
            return Err(RegistryError::NotApplied(source));
        }

        let (next, removed) = current.with_reverted(source);
        self.publish(next);
        debug!(%source, removed, revision = self.revision, "modifiers reverted");
        Ok(removed)
    }

    fn publish(&mut self, next: ModifierSnapshot) {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(next);
        self.revision += 1;
    }
}

impl Default for ModifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle onto a [`ModifierRegistry`].
///
/// Cheap to clone and safe to share across threads. Each
/// [`snapshot`](Self::snapshot) call returns the latest published state.
#[derive(Clone, Debug)]
pub struct RegistryReader {
    current: SharedSnapshot,
}

impl RegistryReader {
    pub fn snapshot(&self) -> Arc<ModifierSnapshot> {
        load(&self.current)
    }
}

fn load(current: &SharedSnapshot) -> Arc<ModifierSnapshot> {
    // The lock only guards a pointer swap; a poisoned guard still holds a
    // complete snapshot.
    let slot = current.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&*slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curse::CurseId;
    use crate::modifiers::{Effect, ModifierKey};

    fn weakened_player() -> EffectSet {
        EffectSet::new([Effect::multiplier(ModifierKey::PlayerAttack, 0.5)]).expect("valid")
    }

    #[test]
    fn apply_then_revert_restores_fingerprint() {
        let mut registry = ModifierRegistry::new();
        let before = registry.snapshot().fingerprint();
        let source = ModifierSource::Curse(CurseId(2));

        registry.apply(source, &weakened_player()).expect("apply");
        assert_ne!(registry.snapshot().fingerprint(), before);

        assert_eq!(registry.revert(source), Ok(1));
        assert_eq!(registry.snapshot().fingerprint(), before);
        assert_eq!(registry.revision(), 2);
    }

    #[test]
    fn readers_keep_their_snapshot_across_writes() {
        let mut registry = ModifierRegistry::new();
        let reader = registry.reader();
        let held = reader.snapshot();

        registry
            .apply(ModifierSource::Curse(CurseId(2)), &weakened_player())
            .expect("apply");

        assert_eq!(held.multiplier(ModifierKey::PlayerAttack), 1.0);
        assert_eq!(reader.snapshot().multiplier(ModifierKey::PlayerAttack), 0.5);
    }

    #[test]
    fn double_apply_and_stray_revert_are_refused() {
        let mut registry = ModifierRegistry::new();
        let source = ModifierSource::Override(1);

        registry.apply(source, &weakened_player()).expect("apply");
        assert_eq!(
            registry.apply(source, &weakened_player()),
            Err(RegistryError::AlreadyApplied(source))
        );

        let other = ModifierSource::Override(2);
        assert_eq!(registry.revert(other), Err(RegistryError::NotApplied(other)));
        assert_eq!(registry.revision(), 1);
    }

    #[test]
    fn empty_batch_is_refused_and_leaves_no_trace() {
        let mut registry = ModifierRegistry::new();
        let source = ModifierSource::Override(5);

        assert_eq!(
            registry.apply(source, &EffectSet::empty()),
            Err(RegistryError::EmptyEffects(source))
        );
        assert_eq!(registry.revision(), 0);
        assert!(registry.snapshot().is_empty());

        registry.apply(source, &weakened_player()).expect("apply");
        assert_eq!(registry.revert(source), Ok(1));
    }

    #[test]
    fn concurrent_readers_see_whole_batches() {
        let mut registry = ModifierRegistry::new();
        let effects = EffectSet::new([
            Effect::multiplier(ModifierKey::WildAttack, 2.0),
            Effect::multiplier(ModifierKey::WildDefense, 2.0),
        ])
        .expect("valid");

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let reader = registry.reader();
                std::thread::spawn(move || {
                    for _ in 0..2_000 {
                        let snapshot = reader.snapshot();
                        assert_eq!(
                            snapshot.multiplier(ModifierKey::WildAttack),
                            snapshot.multiplier(ModifierKey::WildDefense)
                        );
                    }
                })
            })
            .collect();

        let source = ModifierSource::Curse(CurseId(7));
        for _ in 0..500 {
            registry.apply(source, &effects).expect("apply");
            registry.revert(source).expect("revert");
        }

        for reader in readers {
            reader.join().expect("reader thread");
        }
    }
}
