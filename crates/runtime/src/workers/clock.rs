//! Clock worker that owns the world's [`CurseScheduler`].
//!
//! The worker is the only writer of the modifier registry. It advances the
//! curse cycle on `Advance` commands and, when configured, on a real-time
//! interval, publishing every transition to the EventBus. Interval ticks
//! advance the cycle by the wall-clock time since the previous tick.

use std::future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use mon_core::{
    CurseId, CurseScheduler, CurseStateChangeEvent, CycleState, EffectSet, PcgRng, SchedulerError,
};

use crate::events::{Event, EventBus};

type Reply<T> = oneshot::Sender<Result<T, SchedulerError>>;

/// Commands that can be sent to the clock worker
pub enum Command {
    /// Advance the logical clock by `delta`.
    Advance {
        delta: Duration,
        reply: Reply<Option<CurseStateChangeEvent>>,
    },
    /// Activate a specific curse now.
    ForceCurse {
        id: CurseId,
        reply: Reply<Vec<CurseStateChangeEvent>>,
    },
    /// End the active or pending curse.
    CancelCurse {
        reply: Reply<Option<CurseStateChangeEvent>>,
    },
    /// Apply an operator override next to any curse.
    ApplyOverride {
        id: u32,
        effects: EffectSet,
        reply: Reply<()>,
    },
    /// Remove an operator override.
    ClearOverride { id: u32, reply: Reply<()> },
    /// Query the current cycle state (read-only).
    QueryCycle { reply: oneshot::Sender<CycleState> },
    /// Revert everything and stop the worker.
    Shutdown {
        reply: Reply<Option<CurseStateChangeEvent>>,
    },
}

/// Background task that drives the curse cycle.
pub struct ClockWorker {
    scheduler: CurseScheduler,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Option<Duration>,
}

impl ClockWorker {
    pub fn new(
        scheduler: CurseScheduler,
        rng: PcgRng,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
    ) -> Self {
        info!(
            curses = scheduler.pool().len(),
            ?tick_interval,
            "ClockWorker initialized"
        );

        Self {
            scheduler,
            rng,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop.
    ///
    /// Exits on `Shutdown` or when every handle is dropped; either way the
    /// active curse is reverted first.
    pub async fn run(mut self) {
        let mut last_tick = Instant::now();
        let mut interval = self.tick_interval.map(|period| {
            let mut interval = tokio::time::interval_at(last_tick + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd).is_break() {
                            break;
                        }
                    }
                    None => break,
                },
                () = next_tick(&mut interval) => {
                    // Feed wall-clock time, so a stalled worker catches up
                    // on its next tick.
                    let now = Instant::now();
                    let elapsed = now.saturating_duration_since(last_tick);
                    last_tick = now;
                    if let Err(err) = self.advance(elapsed) {
                        warn!(%err, "interval tick failed");
                        break;
                    }
                }
            }
        }

        if !self.scheduler.is_shut_down()
            && let Err(err) = self.shutdown()
        {
            warn!(%err, "curse cycle did not shut down cleanly");
        }
        info!("ClockWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Advance { delta, reply } => {
                let result = self.advance(delta);
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::ForceCurse { id, reply } => {
                let result = self.scheduler.force_curse(id);
                if let Ok(events) = &result {
                    events.iter().cloned().for_each(|event| self.publish(event));
                }
                if reply.send(result).is_err() {
                    debug!("ForceCurse reply channel closed (caller dropped)");
                }
            }
            Command::CancelCurse { reply } => {
                let result = self.scheduler.cancel();
                if let Ok(Some(event)) = &result {
                    self.publish(event.clone());
                }
                if reply.send(result).is_err() {
                    debug!("CancelCurse reply channel closed (caller dropped)");
                }
            }
            Command::ApplyOverride { id, effects, reply } => {
                let result = self.scheduler.apply_override(id, &effects);
                if reply.send(result).is_err() {
                    debug!("ApplyOverride reply channel closed (caller dropped)");
                }
            }
            Command::ClearOverride { id, reply } => {
                let result = self.scheduler.clear_override(id);
                if reply.send(result).is_err() {
                    debug!("ClearOverride reply channel closed (caller dropped)");
                }
            }
            Command::QueryCycle { reply } => {
                if reply.send(self.scheduler.state().clone()).is_err() {
                    debug!("QueryCycle reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                let result = self.shutdown();
                if reply.send(result).is_err() {
                    debug!("Shutdown reply channel closed (caller dropped)");
                }
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn advance(
        &mut self,
        delta: Duration,
    ) -> Result<Option<CurseStateChangeEvent>, SchedulerError> {
        let event = self.scheduler.tick(delta, &mut self.rng)?;
        if let Some(event) = &event {
            self.publish(event.clone());
        }
        Ok(event)
    }

    fn shutdown(&mut self) -> Result<Option<CurseStateChangeEvent>, SchedulerError> {
        let event = self.scheduler.shutdown()?;
        if let Some(event) = &event {
            self.publish(event.clone());
        }
        Ok(event)
    }

    fn publish(&self, event: CurseStateChangeEvent) {
        debug!(phase = %event.phase, cause = %event.cause, "curse transition");
        self.event_bus.publish(Event::Curse(event));
    }
}

/// Resolves on the next interval tick, or never without an interval.
async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending::<()>().await,
    }
}
