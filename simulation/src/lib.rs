#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestrates the world and the pure systems once per fixed time step.
//!
//! Hosts create a [`Simulation`] per level, call [`Simulation::tick`] on every
//! update interval, forward player input through
//! [`Simulation::process_input`] and ask for a [`Scene`] whenever a frame is
//! drawn.

use std::time::Duration;

use glam::Vec2;
use wave_defence_core::{Command, Event, SoundCue, TowerTarget};
use wave_defence_rendering::{Color, Drawable, FrameInput, Hud, RangeIndicator, Scene, SpriteKey};
use wave_defence_system_builder::{Builder, BuilderInput};
use wave_defence_system_tower_combat::TowerCombat;
use wave_defence_system_tower_targeting::{TargetPolicy, TowerTargeting};
use wave_defence_system_waves::{Wave, WaveScheduler};
use wave_defence_world::{self as world, query, Level, LevelError, World, WorldConfig};

/// Tunables applied when a simulation is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Settings forwarded to the world.
    pub world: WorldConfig,
    /// Rule towers use to pick among several enemies in range.
    pub targeting: TargetPolicy,
}

/// Reason a level ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player asked to leave the level.
    Quit,
    /// The goal ran out of health.
    Defeat,
    /// Every wave finished and no enemy is left alive.
    Victory,
}

/// World plus the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    scheduler: WaveScheduler,
    targeting: TowerTargeting,
    combat: TowerCombat,
    builder: Builder,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Builds the world for `level` and queues the intro cue into `out`.
    ///
    /// # Errors
    ///
    /// Returns the [`LevelError`] raised while validating the level.
    pub fn new(
        level: Level,
        waves: Vec<Wave>,
        config: SimulationConfig,
        out: &mut Vec<Event>,
    ) -> Result<Self, LevelError> {
        let world = World::new(level, config.world)?;
        let scheduler = WaveScheduler::new(waves);
        tracing::info!(
            waves = scheduler.wave_count(),
            targeting = ?config.targeting,
            "simulation ready"
        );
        out.push(Event::PlaySound {
            cue: SoundCue::Intro,
        });

        Ok(Self {
            world,
            scheduler,
            targeting: TowerTargeting::new(config.targeting),
            combat: TowerCombat::new(),
            builder: Builder::new(),
            targets: Vec::new(),
            commands: Vec::new(),
        })
    }

    /// Advances the simulation by `dt`, appending every emitted event to `out`.
    ///
    /// A zero step leaves the simulation untouched. Once the goal is destroyed
    /// the simulation stays frozen.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        if dt.is_zero() || query::is_goal_destroyed(&self.world) {
            return;
        }

        let first = out.len();
        world::apply(&mut self.world, Command::Tick { dt }, out);

        self.scheduler.handle(&out[first..], &mut self.commands);
        self.flush_commands(out);

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        let tile_length = query::tile_grid(&self.world).tile_length();
        self.targeting
            .handle(&towers, &enemies, tile_length, &mut self.targets);
        self.combat
            .handle(&towers, &self.targets, tile_length, &mut self.commands);
        self.flush_commands(out);

        world::apply(&mut self.world, Command::AdvanceEnemies { dt }, out);
        world::apply(&mut self.world, Command::AdvanceProjectiles { dt }, out);
    }

    /// Applies one frame of player input and reports whether the level ended.
    pub fn process_input(&mut self, input: FrameInput, out: &mut Vec<Event>) -> Option<Outcome> {
        if input.escape {
            tracing::info!("player left the level");
            return Some(Outcome::Quit);
        }

        self.builder.move_cursor(input.cursor, &mut self.commands);
        self.flush_commands(out);

        let builder_input = BuilderInput {
            select: input.select_tower,
            confirm: input.left_click,
            cancel: input.right_click,
        };
        self.builder.handle(
            query::placement_preview(&self.world),
            builder_input,
            &mut self.commands,
        );
        self.flush_commands(out);

        self.outcome()
    }

    /// Reports how the level ended, if it did.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if query::is_goal_destroyed(&self.world) {
            return Some(Outcome::Defeat);
        }
        if self.scheduler.is_finished() && query::enemy_count(&self.world) == 0 {
            return Some(Outcome::Victory);
        }
        None
    }

    /// Describes everything a host needs to draw the current frame.
    #[must_use]
    pub fn render(&self) -> Scene {
        let grid = query::tile_grid(&self.world);
        let tile_length = grid.tile_length();

        let tiles = grid
            .cells()
            .map(|(cell, kind)| Drawable::new(SpriteKey::Tile(kind), grid.to_world(cell)))
            .collect();
        let enemies = query::enemy_view(&self.world)
            .iter()
            .map(|enemy| {
                let health = enemy.health.get() as f32 / enemy.kind.max_health().get() as f32;
                Drawable::new(SpriteKey::Enemy(enemy.kind), enemy.position)
                    .tinted(Color::RED.lighten(health))
            })
            .collect();
        let towers = query::tower_view(&self.world)
            .iter()
            .map(|tower| Drawable::new(SpriteKey::Tower(tower.kind), tower.position))
            .collect();
        let projectiles = query::projectiles(&self.world)
            .iter()
            .map(|projectile| {
                Drawable::new(SpriteKey::Projectile(projectile.kind), projectile.position)
                    .scaled(projectile.scale)
            })
            .collect();

        let (preview, range) = match query::placement_preview(&self.world) {
            Some(preview) => {
                let tint = if preview.is_placeable() {
                    Color::WHITE
                } else {
                    Color::RED
                };
                let center: Vec2 = preview.snapped.unwrap_or(preview.position);
                (
                    Some(Drawable::new(SpriteKey::Tower(preview.kind), center).tinted(tint)),
                    Some(RangeIndicator {
                        center,
                        radius: preview.kind.range_in_tiles() * tile_length,
                        tint: tint.with_alpha(0.4),
                    }),
                )
            }
            None => (None, None),
        };

        Scene {
            tile_length,
            tiles,
            enemies,
            towers,
            projectiles,
            preview,
            range,
            hud: Hud {
                goal_health: query::goal_health(&self.world).get(),
                credits: query::credits(&self.world),
                wave: query::current_wave(&self.world),
            },
        }
    }

    /// Read-only access to the world for hosts and tests.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the wave scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    fn flush_commands(&mut self, out: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out);
        }
    }
}
