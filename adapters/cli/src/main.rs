#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Wave Defence levels headlessly.

mod config;
mod headless;
mod level_file;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wave_defence_core::Event;
use wave_defence_rendering::{FrameControl, FrameInput, Presentation, RenderingBackend};
use wave_defence_simulation::{Outcome, Simulation};
use wave_defence_system_waves::parse_waves;
use wave_defence_world::query;

use crate::{config::GameConfig, headless::HeadlessBackend, level_file::LevelFile};

const WELCOME_BANNER: &str = "Welcome to Wave Defence.";

#[derive(Parser, Debug)]
#[command(name = "wave-defence")]
#[command(about = "Runs a Wave Defence level with scripted tower placements")]
struct Args {
    /// Game configuration file
    #[arg(long, default_value = "assets/config.toml")]
    config: PathBuf,

    /// Level description file
    #[arg(long, default_value = "assets/levels/meadow.toml")]
    level: PathBuf,

    /// Wave schedule file
    #[arg(long, default_value = "assets/waves/campaign.txt")]
    waves: PathBuf,
}

/// Running totals reported once the level ends.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    spawned: u32,
    defeated: u32,
    leaked: u32,
    towers: u32,
    rejected: u32,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemySpawned { .. } => self.spawned += 1,
                Event::EnemyDefeated { .. } => self.defeated += 1,
                Event::EnemyReachedGoal { enemy, damage, .. } => {
                    self.leaked += 1;
                    tracing::debug!(enemy = enemy.get(), damage, "enemy reached the goal");
                }
                Event::TowerPlaced {
                    tower,
                    kind,
                    position,
                    cost,
                } => {
                    self.towers += 1;
                    tracing::info!(
                        tower = tower.get(),
                        kind = kind.title(),
                        x = position.x,
                        y = position.y,
                        cost,
                        "tower built"
                    );
                }
                Event::PlacementRejected { kind, reason } => {
                    self.rejected += 1;
                    tracing::warn!(kind = kind.title(), ?reason, "tower placement rejected");
                }
                Event::PlaySound { cue } => {
                    tracing::debug!(cue = cue.name(), "sound cue");
                }
                _ => {}
            }
        }
    }
}

/// Entry point for the Wave Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = GameConfig::load(&args.config)?;
    let level_file = LevelFile::load(&args.level)?;
    let level = level_file.to_level()?;
    let wave_text = fs::read_to_string(&args.waves)
        .with_context(|| format!("failed to read wave file at {}", args.waves.display()))?;
    let waves = parse_waves(&wave_text)
        .with_context(|| format!("invalid wave file at {}", args.waves.display()))?;

    let tile_length = level.grid().tile_length();
    let mut events = Vec::new();
    let mut simulation = Simulation::new(level, waves, config.simulation_config(), &mut events)
        .with_context(|| format!("failed to start level `{}`", level_file.name))?;
    println!("{WELCOME_BANNER}");

    let mut tally = Tally::default();
    tally.record(&events);

    let script = config.placements.iter().flat_map(|placement| {
        let cursor = Some(placement.cursor(tile_length));
        [
            (
                placement.tick,
                FrameInput {
                    cursor,
                    select_tower: Some(placement.kind),
                    ..FrameInput::default()
                },
            ),
            (
                placement.tick,
                FrameInput {
                    cursor,
                    left_click: true,
                    ..FrameInput::default()
                },
            ),
        ]
    });
    let backend = HeadlessBackend::new(config.tick_interval(), config.max_ticks).with_script(script);
    let presentation = Presentation::new(level_file.name.clone(), simulation.render());

    let mut outcome = None;
    backend.run(presentation, |dt, input, scene| {
        events.clear();
        outcome = simulation.process_input(input, &mut events);
        if outcome.is_none() {
            simulation.tick(dt, &mut events);
            outcome = simulation.outcome();
        }
        tally.record(&events);
        *scene = simulation.render();

        if outcome.is_some() {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    })?;

    let Some(outcome) = outcome else {
        bail!(
            "level `{}` produced no outcome within {} ticks",
            level_file.name,
            config.max_ticks
        );
    };

    let world = simulation.world();
    if tally.towers < config.placements.len() as u32 {
        tracing::warn!(
            scripted = config.placements.len(),
            built = tally.towers,
            "some scripted towers were not built"
        );
    }
    tracing::info!(
        ?outcome,
        spawned = tally.spawned,
        defeated = tally.defeated,
        leaked = tally.leaked,
        rejected = tally.rejected,
        goal_health = query::goal_health(world).get(),
        credits = query::credits(world),
        elapsed_ms = query::elapsed(world).as_millis() as u64,
        "level finished"
    );

    let label = match outcome {
        Outcome::Quit => "quit",
        Outcome::Defeat => "defeat",
        Outcome::Victory => "victory",
    };
    println!(
        "outcome: {label} (wave {}, goal health {}, towers {}, enemies defeated {})",
        query::current_wave(world),
        query::goal_health(world).get(),
        tally.towers,
        tally.defeated
    );

    Ok(())
}
