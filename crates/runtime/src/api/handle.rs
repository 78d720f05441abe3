//! Cloneable façade for interacting with a world session.
//!
//! [`WorldHandle`] resolves player actions synchronously against the latest
//! modifier snapshot and offers async helpers for driving the curse cycle
//! through the clock worker.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use mon_core::{
    CaptureOutcome, CombatResolver, CombatResult, CombatRules, CurseId, CurseStateChangeEvent,
    CycleState, EffectSet, ModifierSnapshot, PcgRng, PlayerAction, RegistryReader, SchedulerError,
    TypeChart, attempt_capture,
};

use super::errors::{Result, RuntimeError};
use crate::events::{CaptureEvent, CombatEvent, Event, EventBus, Topic};
use crate::workers::Command;

/// Result of one player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Combat(CombatResult),
    Capture(CaptureOutcome),
}

/// A resolved action with the nonce its rolls were seeded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub nonce: u64,
    pub outcome: ActionOutcome,
}

/// Rules shared by every handle of one world.
#[derive(Debug)]
pub(crate) struct Rules {
    pub(crate) chart: TypeChart,
    pub(crate) combat: CombatRules,
    pub(crate) world_seed: u64,
}

/// Client-facing handle to interact with a world
#[derive(Clone)]
pub struct WorldHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    registry: RegistryReader,
    rules: Arc<Rules>,
    next_nonce: Arc<AtomicU64>,
}

impl WorldHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        registry: RegistryReader,
        rules: Rules,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            registry,
            rules: Arc::new(rules),
            next_nonce: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolve a player action and publish its outcome.
    ///
    /// Takes one registry snapshot for the whole resolution, so a curse
    /// activating concurrently is seen entirely or not at all. Rolls are
    /// seeded from the world seed, the action's nonce, the actor and the
    /// roll context, so [`replay`](Self::replay) reproduces them.
    ///
    /// Actions whose stat blocks carry chances outside `[0, 1]` are refused
    /// before a nonce is spent.
    pub fn resolve(&self, action: PlayerAction) -> Result<ActionReport> {
        action.validate().map_err(RuntimeError::InvalidAction)?;

        let nonce = self.next_nonce.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.registry.snapshot();
        let outcome = self.replay(nonce, &action, &snapshot);

        let (actor, subject) = action.participants();
        self.event_bus.publish(match &outcome {
            ActionOutcome::Combat(result) => Event::Combat(CombatEvent {
                nonce,
                attacker: actor,
                defender: subject,
                result: result.clone(),
            }),
            ActionOutcome::Capture(outcome) => Event::Capture(CaptureEvent {
                nonce,
                player: actor,
                target: subject,
                outcome: *outcome,
            }),
        });

        Ok(ActionReport { nonce, outcome })
    }

    /// Re-resolve an action at a given nonce against an explicit snapshot.
    ///
    /// Publishes nothing. Identical inputs reproduce the original outcome.
    pub fn replay(
        &self,
        nonce: u64,
        action: &PlayerAction,
        snapshot: &ModifierSnapshot,
    ) -> ActionOutcome {
        let mut rng = self.rng_for(nonce, action);

        match action {
            PlayerAction::Punch {
                attacker,
                defender,
                mv,
                punch,
            } => {
                let resolver = CombatResolver::new(&self.rules.chart, &self.rules.combat);
                ActionOutcome::Combat(resolver.resolve(
                    attacker,
                    defender,
                    &punch.scaled_move(mv),
                    snapshot,
                    &mut rng,
                ))
            }
            PlayerAction::Capture { target, book, .. } => {
                ActionOutcome::Capture(attempt_capture(target, book, snapshot, &mut rng))
            }
        }
    }

    fn rng_for(&self, nonce: u64, action: &PlayerAction) -> PcgRng {
        PcgRng::for_action(
            self.rules.world_seed,
            nonce,
            action.actor().0,
            action.roll_context().as_u32(),
        )
    }

    /// The modifiers currently in effect.
    pub fn snapshot(&self) -> Arc<ModifierSnapshot> {
        self.registry.snapshot()
    }

    pub fn world_seed(&self) -> u64 {
        self.rules.world_seed
    }

    /// Advance the curse cycle's logical clock.
    pub async fn advance(&self, delta: Duration) -> Result<Option<CurseStateChangeEvent>> {
        self.request(|reply| Command::Advance { delta, reply }).await
    }

    /// Activate a specific curse now, reverting any active one first.
    pub async fn force_curse(&self, id: CurseId) -> Result<Vec<CurseStateChangeEvent>> {
        self.request(|reply| Command::ForceCurse { id, reply }).await
    }

    /// End the active or pending curse and restart the rest period.
    pub async fn cancel_curse(&self) -> Result<Option<CurseStateChangeEvent>> {
        self.request(|reply| Command::CancelCurse { reply }).await
    }

    /// Apply an operator override alongside any curse.
    pub async fn apply_override(&self, id: u32, effects: EffectSet) -> Result<()> {
        self.request(|reply| Command::ApplyOverride { id, effects, reply })
            .await
    }

    /// Remove an operator override.
    pub async fn clear_override(&self, id: u32) -> Result<()> {
        self.request(|reply| Command::ClearOverride { id, reply }).await
    }

    /// Query the current cycle state (read-only snapshot)
    pub async fn cycle_state(&self) -> Result<CycleState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryCycle { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub(crate) async fn shutdown(&self) -> Result<Option<CurseStateChangeEvent>> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<std::result::Result<T, SchedulerError>>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        Ok(reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)??)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Curse` - Curse cycle transitions
    /// - `Topic::Combat` - Resolved punches
    /// - `Topic::Capture` - Resolved capture attempts
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
