//! Logical-clock curse cycle: Rest → Warning → Active → Rest.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::CycleConfig;
use crate::error::{InvariantViolation, SchedulerError};
use crate::modifiers::{
    EffectSet, ModifierRegistry, ModifierSnapshot, ModifierSource, RegistryReader,
};
use crate::rng::RngSource;

use super::event::{CurseRef, CurseStateChangeEvent, CyclePhase, TransitionCause};
use super::pool::{Curse, CurseId, CursePool};

/// Where the cycle currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleState {
    pub phase: CyclePhase,
    pub remaining: Duration,
    /// Curse announced during Warning.
    pub pending: Option<CurseId>,
    /// Curse whose effects are in the registry. Only set while Active.
    pub active: Option<CurseId>,
    /// Completed Active phases.
    pub completed_curses: u64,
}

impl CycleState {
    fn resting(remaining: Duration) -> Self {
        Self {
            phase: CyclePhase::Rest,
            remaining,
            pending: None,
            active: None,
            completed_curses: 0,
        }
    }
}

/// Single writer of a world's [`ModifierRegistry`].
///
/// Advances on discrete [`tick`](Self::tick) calls. Each tick subtracts the
/// elapsed time from the current phase, saturating at zero; a phase that
/// reaches zero transitions within that tick and any surplus time is
/// dropped, so at most one transition happens per tick.
///
/// Natural expiry, [`force_curse`](Self::force_curse),
/// [`cancel`](Self::cancel) and [`shutdown`](Self::shutdown) all go through
/// the same activate/deactivate pair, so no path can strand a modifier.
#[derive(Debug)]
pub struct CurseScheduler {
    config: CycleConfig,
    pool: CursePool,
    registry: ModifierRegistry,
    state: CycleState,
    shut_down: bool,
}

impl CurseScheduler {
    pub fn new(config: CycleConfig, pool: CursePool) -> Self {
        Self::with_registry(config, pool, ModifierRegistry::new())
    }

    /// Starts a cycle on top of an existing registry.
    pub fn with_registry(config: CycleConfig, pool: CursePool, registry: ModifierRegistry) -> Self {
        let state = CycleState::resting(config.rest());
        debug!(rest = ?config.rest(), curses = pool.len(), "curse cycle started");
        Self {
            config,
            pool,
            registry,
            state,
            shut_down: false,
        }
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn pool(&self) -> &CursePool {
        &self.pool
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn reader(&self) -> RegistryReader {
        self.registry.reader()
    }

    pub fn snapshot(&self) -> Arc<ModifierSnapshot> {
        self.registry.snapshot()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// The curse whose effects are currently applied.
    pub fn active_curse(&self) -> Option<&Curse> {
        self.state.active.and_then(|id| self.pool.get(id))
    }

    /// Advances the cycle by `delta`.
    ///
    /// Returns the transition event, if this tick caused one.
    pub fn tick(
        &mut self,
        delta: Duration,
        rng: &mut impl RngSource,
    ) -> Result<Option<CurseStateChangeEvent>, SchedulerError> {
        self.ensure_running()?;

        self.state.remaining = self.state.remaining.saturating_sub(delta);
        if !self.state.remaining.is_zero() {
            return Ok(None);
        }

        let event = match self.state.phase {
            CyclePhase::Rest => {
                let id = self.pool.select(rng).id;
                self.enter_warning(id)
            }
            CyclePhase::Warning => match self.state.pending {
                Some(id) => self.activate(id, TransitionCause::Expired)?,
                None => self.enter_rest(None, TransitionCause::Expired),
            },
            CyclePhase::Active => self.deactivate(TransitionCause::Expired)?,
        };
        Ok(Some(event))
    }

    /// Activates `id` immediately, skipping Rest and Warning.
    ///
    /// An already active curse is reverted first, so the returned events
    /// are (optionally) a Rest transition followed by the Active one.
    pub fn force_curse(
        &mut self,
        id: CurseId,
    ) -> Result<Vec<CurseStateChangeEvent>, SchedulerError> {
        self.ensure_running()?;
        if self.pool.get(id).is_none() {
            return Err(SchedulerError::UnknownCurse(id));
        }

        let mut events = Vec::with_capacity(2);
        if self.state.active.is_some() {
            events.push(self.deactivate(TransitionCause::Forced)?);
        }
        self.state.pending = None;
        events.push(self.activate(id, TransitionCause::Forced)?);
        Ok(events)
    }

    /// Ends the active curse, or drops the pending one, and starts a fresh
    /// Rest. Does nothing while already resting.
    pub fn cancel(&mut self) -> Result<Option<CurseStateChangeEvent>, SchedulerError> {
        self.ensure_running()?;
        match self.state.phase {
            CyclePhase::Rest => Ok(None),
            CyclePhase::Warning => Ok(Some(self.enter_rest(None, TransitionCause::Cancelled))),
            CyclePhase::Active => self.deactivate(TransitionCause::Cancelled).map(Some),
        }
    }

    /// Applies an operator override alongside any curse.
    pub fn apply_override(&mut self, id: u32, effects: &EffectSet) -> Result<(), SchedulerError> {
        self.ensure_running()?;
        self.registry.apply(ModifierSource::Override(id), effects)?;
        info!(override_id = id, entries = effects.len(), "override applied");
        Ok(())
    }

    /// Removes an operator override. Curse entries are untouched.
    pub fn clear_override(&mut self, id: u32) -> Result<(), SchedulerError> {
        self.ensure_running()?;
        let source = ModifierSource::Override(id);
        self.registry.revert(source)?;
        self.verify_reverted(source);
        info!(override_id = id, "override cleared");
        Ok(())
    }

    /// Reverts any active curse and stops the cycle for good.
    ///
    /// Returns the final Rest transition when a curse was active or pending.
    pub fn shutdown(&mut self) -> Result<Option<CurseStateChangeEvent>, SchedulerError> {
        if self.shut_down {
            return Ok(None);
        }
        let event = match self.state.phase {
            CyclePhase::Rest => None,
            CyclePhase::Warning => Some(self.enter_rest(None, TransitionCause::Shutdown)),
            CyclePhase::Active => Some(self.deactivate(TransitionCause::Shutdown)?),
        };
        self.shut_down = true;
        info!(completed = self.state.completed_curses, "curse cycle shut down");
        Ok(event)
    }

    fn ensure_running(&self) -> Result<(), SchedulerError> {
        if self.shut_down {
            Err(SchedulerError::ShutDown)
        } else {
            Ok(())
        }
    }

    fn curse_ref(&self, id: CurseId) -> Option<CurseRef> {
        self.pool.get(id).map(CurseRef::from)
    }

    fn enter_warning(&mut self, id: CurseId) -> CurseStateChangeEvent {
        self.state.phase = CyclePhase::Warning;
        self.state.remaining = self.config.warning();
        self.state.pending = Some(id);
        debug!(curse = %id, remaining = ?self.state.remaining, "curse warning");
        self.event(self.curse_ref(id), TransitionCause::Expired)
    }

    /// Applies the curse's effect set as one batch and enters Active.
    fn activate(
        &mut self,
        id: CurseId,
        cause: TransitionCause,
    ) -> Result<CurseStateChangeEvent, SchedulerError> {
        let curse = self.pool.get(id).ok_or(SchedulerError::UnknownCurse(id))?;
        let duration = curse.duration_or(self.config.curse());

        self.registry.apply(ModifierSource::Curse(id), &curse.effects)?;
        info!(curse = %curse.name, id = %id, ?duration, %cause, "curse activated");

        let curse_ref = CurseRef::from(curse);
        self.state.phase = CyclePhase::Active;
        self.state.remaining = duration;
        self.state.pending = None;
        self.state.active = Some(id);
        Ok(self.event(Some(curse_ref), cause))
    }

    /// Reverts exactly the active curse's entries and enters Rest.
    fn deactivate(
        &mut self,
        cause: TransitionCause,
    ) -> Result<CurseStateChangeEvent, SchedulerError> {
        let Some(id) = self.state.active else {
            return Ok(self.enter_rest(None, cause));
        };

        let source = ModifierSource::Curse(id);
        let removed = self.registry.revert(source)?;
        self.verify_reverted(source);
        info!(id = %id, removed, %cause, "curse reverted");

        self.state.completed_curses += 1;
        let curse_ref = self.curse_ref(id);
        Ok(self.enter_rest(curse_ref, cause))
    }

    fn enter_rest(
        &mut self,
        ended: Option<CurseRef>,
        cause: TransitionCause,
    ) -> CurseStateChangeEvent {
        self.state.phase = CyclePhase::Rest;
        self.state.remaining = self.config.rest();
        self.state.pending = None;
        self.state.active = None;
        self.event(ended, cause)
    }

    /// Guards the reversal invariant: no entry of `source` may survive.
    fn verify_reverted(&mut self, source: ModifierSource) {
        let residual = self.registry.snapshot().source_entries(source);
        if residual == 0 {
            return;
        }
        InvariantViolation::ResidualModifiers {
            origin: source,
            count: residual,
        }
        .report();
        // Release builds purge whatever is left.
        let _ = self.registry.revert(source);
    }

    fn event(&self, curse: Option<CurseRef>, cause: TransitionCause) -> CurseStateChangeEvent {
        CurseStateChangeEvent {
            phase: self.state.phase,
            curse,
            remaining: self.state.remaining,
            cause,
        }
    }
}
