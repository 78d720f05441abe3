//! Headless world session
//!
//! Starts a world on the manual clock, steps it forward, and has a scripted
//! player punch and capture wild Mons along the way. After each step the
//! events it published are printed topic by topic (curse, combat, capture),
//! so two runs with the same seed print the same log.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};

use mon_content::{Content, ContentFactory};
use mon_core::{
    BaseStats, Book, BookTier, CaptureTarget, Combatant, CombatantId, CounterOutcome, MonType,
    Move, PlayerAction, Punch, Side,
};
use mon_runtime::{ActionOutcome, Event, Topic, World, WorldConfig, WorldHandle};

const PLAYER: CombatantId = CombatantId(1);

/// Run a headless world session and print its events
#[derive(Parser)]
pub struct Simulate {
    /// Content directory (defaults to MON_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// World seed (defaults to MON_WORLD_SEED, then a random seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated session length in milliseconds
    #[arg(long, default_value_t = 180_000)]
    duration_ms: u64,

    /// Clock step in milliseconds
    #[arg(long, default_value_t = 1_000)]
    step_ms: u64,

    /// Throw a punch every N steps (0 disables combat)
    #[arg(long, default_value_t = 3)]
    punch_every: u64,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let data_dir = super::resolve_data_dir(self.data_dir.clone());
        let content = ContentFactory::new(&data_dir).load()?;

        let mut config = WorldConfig::from_env();
        config.tick_interval = None;
        if let Some(seed) = self.seed {
            config.world_seed = seed;
        }

        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?
            .block_on(self.run(config, content))
    }

    async fn run(self, config: WorldConfig, content: Content) -> Result<()> {
        let step = Duration::from_millis(self.step_ms.max(1));
        let steps = self.duration_ms / step.as_millis() as u64;
        let capture_rules = content.config.capture.clone();

        if !self.json {
            println!(
                "{} seed {} | {} steps of {}ms",
                style("Simulating").bold(),
                config.world_seed,
                steps,
                step.as_millis()
            );
        }

        let world = World::start(config, content)?;
        let handle = world.handle();
        let mut receivers = Topic::ALL.map(|topic| handle.subscribe(topic));

        let mut player = spawn_player();
        let mut wild_count = 0;
        let mut wild = spawn_wild(&mut wild_count);
        let mut book = Book::new(BookTier::Standard, 6, &capture_rules);
        let jab = Move::new("jab", MonType::Fighting, 40);

        for index in 1..=steps {
            handle.advance(step).await?;

            if self.punch_every > 0 && index % self.punch_every == 0 {
                let report = handle.resolve(PlayerAction::Punch {
                    attacker: player.clone(),
                    defender: wild.clone(),
                    mv: jab.clone(),
                    punch: Punch::new([0.0, 0.0, 1.0], force_for(index)),
                })?;
                if let ActionOutcome::Combat(result) = &report.outcome {
                    result.apply(&mut player, &mut wild);
                    if result.attacker_eliminated(&player) {
                        player = spawn_player();
                    }
                }

                if wild.health.is_depleted() {
                    let target = CaptureTarget::from_combatant(&wild, 1, BookTier::Starter, 0.4);
                    if !book.fits(target.size) {
                        book = Book::new(BookTier::Standard, 6, &capture_rules);
                    }
                    let report = handle.resolve(PlayerAction::Capture {
                        player: PLAYER,
                        target: target.clone(),
                        book: book.clone(),
                    })?;
                    if let ActionOutcome::Capture(outcome) = report.outcome
                        && outcome.is_captured()
                    {
                        book.store(target.size)?;
                    }
                    wild = spawn_wild(&mut wild_count);
                }
            }

            for rx in &mut receivers {
                drain(rx, self.json)?;
            }
        }

        if let Some(event) = world.shutdown().await? {
            print_event(&Event::Curse(event), self.json)?;
        }
        Ok(())
    }
}

fn spawn_player() -> Combatant {
    Combatant::new(
        PLAYER,
        Side::Player,
        MonType::Fighting,
        120,
        BaseStats::new(30, 20, 15),
    )
    .with_critical_chance(0.1)
}

fn spawn_wild(count: &mut u32) -> Combatant {
    *count += 1;
    let kind = [MonType::Normal, MonType::Rock, MonType::Psychic][*count as usize % 3];
    Combatant::new(
        CombatantId(100 + *count),
        Side::Wild,
        kind,
        60,
        BaseStats::new(18, 12, 10),
    )
    .with_counter_punch(0.2)
    .with_vaporize(0.02)
}

/// Deterministic force pattern standing in for motion input.
fn force_for(index: u64) -> f32 {
    [0.3, 0.6, 1.0, 0.8][(index % 4) as usize]
}

fn drain(rx: &mut broadcast::Receiver<Event>, json: bool) -> Result<()> {
    loop {
        match rx.try_recv() {
            Ok(event) => print_event(&event, json)?,
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event receiver lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
        }
    }
}

fn print_event(event: &Event, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        Event::Curse(change) => {
            let curse = change
                .curse
                .as_ref()
                .map_or_else(|| "-".to_string(), |curse| curse.name.clone());
            println!(
                "{} {:<7} {:<16} {:>6}ms ({})",
                style("curse  ").magenta(),
                change.phase,
                curse,
                change.remaining.as_millis(),
                change.cause
            );
        }
        Event::Combat(combat) => {
            let result = &combat.result;
            let counter = match result.counter {
                CounterOutcome::None => String::new(),
                CounterOutcome::CounterPunch(damage) => format!(" countered for {damage}"),
                CounterOutcome::Vaporize => " VAPORIZED".to_string(),
            };
            println!(
                "{} #{:<4} {} -> {}: {} dmg{}{}{}",
                style("combat ").yellow(),
                combat.nonce,
                combat.attacker.0,
                combat.defender.0,
                result.damage,
                if result.was_critical { " (crit)" } else { "" },
                if result.defender_defeated { " KO" } else { "" },
                counter
            );
        }
        Event::Capture(capture) => {
            println!(
                "{} #{:<4} {} -> {}: {:?}",
                style("capture").cyan(),
                capture.nonce,
                capture.player.0,
                capture.target.0,
                capture.outcome
            );
        }
    }
    Ok(())
}
