//! World session orchestrator.
//!
//! A [`World`] owns the clock worker for one shared game world, wires up
//! the command channel and event bus, and hands out [`WorldHandle`]s.
//! Independent worlds share nothing.

use std::env;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use mon_content::Content;
use mon_core::{CurseScheduler, CurseStateChangeEvent, PcgRng, RollContext, compute_seed};

use crate::api::{Result, Rules, RuntimeError, WorldHandle};
use crate::events::EventBus;
use crate::workers::{ClockWorker, Command};

/// Session configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    /// Root of every per-action seed.
    pub world_seed: u64,
    /// Real-time tick period. `None` leaves the clock to explicit
    /// [`WorldHandle::advance`] calls.
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_seed: 0,
            tick_interval: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl WorldConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `MON_WORLD_SEED` (a fresh random seed when unset)
    /// - `MON_TICK_MS` (0 or unset: manual clock)
    /// - `MON_EVENT_BUFFER`
    /// - `MON_COMMAND_BUFFER`
    pub fn from_env() -> Self {
        let mut config = Self {
            world_seed: read_env::<u64>("MON_WORLD_SEED").unwrap_or_else(rand::random),
            ..Self::default()
        };

        if let Some(ms) = read_env::<u64>("MON_TICK_MS") {
            config.tick_interval = (ms > 0).then(|| Duration::from_millis(ms));
        }

        if let Some(capacity) = read_env::<usize>("MON_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("MON_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    #[must_use]
    pub fn with_seed(mut self, world_seed: u64) -> Self {
        self.world_seed = world_seed;
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, period: Duration) -> Self {
        self.tick_interval = Some(period);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// One running game world.
///
/// Design: World owns the clock worker and coordinates shutdown.
/// [`WorldHandle`] provides a cloneable façade for clients.
pub struct World {
    handle: WorldHandle,
    clock_worker_handle: JoinHandle<()>,
}

impl World {
    /// Validate content and spawn the clock worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: WorldConfig, content: Content) -> Result<Self> {
        content
            .config
            .validate()
            .map_err(RuntimeError::InvalidConfig)?;

        let scheduler = CurseScheduler::new(content.config.cycle.clone(), content.curses);
        let registry = scheduler.reader();
        let curse_rng = PcgRng::new(compute_seed(
            config.world_seed,
            0,
            0,
            RollContext::CurseSelection.as_u32(),
        ));

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let handle = WorldHandle::new(
            command_tx,
            event_bus.clone(),
            registry,
            Rules {
                chart: content.chart,
                combat: content.config.combat,
                world_seed: config.world_seed,
            },
        );

        let clock_worker = ClockWorker::new(
            scheduler,
            curse_rng,
            command_rx,
            event_bus,
            config.tick_interval,
        );
        let clock_worker_handle = tokio::spawn(async move {
            clock_worker.run().await;
        });

        info!(
            world_seed = config.world_seed,
            tick_interval = ?config.tick_interval,
            "world started"
        );

        Ok(Self {
            handle,
            clock_worker_handle,
        })
    }

    /// Get a cloneable handle to this world
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> WorldHandle {
        self.handle.clone()
    }

    /// Revert any active curse and stop the clock worker.
    ///
    /// Returns the final curse transition, if one was needed.
    pub async fn shutdown(self) -> Result<Option<CurseStateChangeEvent>> {
        let event = self.handle.shutdown().await?;
        drop(self.handle);

        self.clock_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!("world stopped");
        Ok(event)
    }
}
