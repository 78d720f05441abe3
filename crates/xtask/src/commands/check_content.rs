//! Validate a content directory
//!
//! Loads every data file, validates the rules, and applies then reverts each
//! curse on a scratch registry to confirm it leaves nothing behind.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use mon_content::ContentFactory;
use mon_core::{Curse, ModifierRegistry, ModifierSource};

/// Validate a content directory
#[derive(Parser)]
pub struct CheckContent {
    /// Content directory (defaults to MON_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = super::resolve_data_dir(self.data_dir);
        let content = ContentFactory::new(&data_dir).load()?;
        content
            .config
            .validate()
            .context("Invalid game configuration")?;

        println!(
            "{} {}",
            style("Content").bold(),
            style(data_dir.display()).dim()
        );
        let cycle = &content.config.cycle;
        println!(
            "  cycle: rest {}ms, warning {}ms, curse {}ms",
            cycle.rest_ms, cycle.warning_ms, cycle.curse_ms
        );
        println!(
            "  combat: {:?} formula, crit ×{}, counter power {}",
            content.config.combat.formula,
            content.config.combat.critical_multiplier,
            content.config.combat.counter_power
        );
        println!();

        let mut failures = 0;
        for curse in content.curses.iter() {
            let duration = curse
                .duration_ms
                .map_or_else(|| "default".to_string(), |ms| format!("{ms}ms"));
            match dry_run(curse) {
                Ok(()) => println!(
                    "  {} {} {} (weight {}, {}, {} effects)",
                    style("ok").green(),
                    curse.id,
                    curse.name,
                    curse.weight,
                    duration,
                    curse.effects.len()
                ),
                Err(err) => {
                    failures += 1;
                    println!(
                        "  {} {} {}: {err:#}",
                        style("FAIL").red().bold(),
                        curse.id,
                        curse.name
                    );
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} curse(s) did not revert cleanly");
        }
        println!();
        println!(
            "{} {} curses checked",
            style("✓").green().bold(),
            content.curses.len()
        );
        Ok(())
    }
}

fn dry_run(curse: &Curse) -> Result<()> {
    let mut registry = ModifierRegistry::new();
    let source = ModifierSource::Curse(curse.id);
    let before = registry.snapshot().fingerprint();

    registry.apply(source, &curse.effects)?;
    registry.revert(source)?;

    if registry.snapshot().fingerprint() != before {
        anyhow::bail!("registry fingerprint changed after revert");
    }
    Ok(())
}
