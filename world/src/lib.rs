#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wave Defence.

mod combat;
mod enemies;
mod grid;
mod navigation;
mod projectiles;
mod towers;

use std::time::Duration;

use glam::Vec2;
use wave_defence_core::{
    CellCoord, Command, EnemyId, EnemyKind, Event, Health, SoundCue, TowerKind,
};

pub use grid::{Level, LevelError, TileGrid};
pub use navigation::DirectionField;

use enemies::EnemyPool;
use projectiles::ProjectilePool;
use towers::TowerRegistry;

/// Tunables applied when a world is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Health the goal starts with.
    pub goal_health: u32,
    /// Credits the player starts with.
    pub starting_credits: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            goal_health: 100,
            starting_credits: 150,
        }
    }
}

/// Tower currently following the cursor.
#[derive(Clone, Copy, Debug)]
struct Placement {
    kind: TowerKind,
    position: Vec2,
}

/// Represents the authoritative Wave Defence world state.
#[derive(Debug)]
pub struct World {
    grid: TileGrid,
    spawn: CellCoord,
    goal: CellCoord,
    field: DirectionField,
    enemies: EnemyPool,
    projectiles: ProjectilePool,
    towers: TowerRegistry,
    placement: Option<Placement>,
    cursor: Vec2,
    goal_health: Health,
    goal_destroyed: bool,
    credits: u32,
    wave: u32,
    elapsed: Duration,
}

impl World {
    /// Creates a world for `level`, deriving its direction field.
    pub fn new(level: Level, config: WorldConfig) -> Result<Self, LevelError> {
        let (grid, spawn, goal) = level.into_parts();
        let field = DirectionField::build(&grid, spawn, goal)?;
        tracing::info!(
            columns = grid.columns(),
            rows = grid.rows(),
            path_cells = field.len(),
            "level loaded"
        );

        Ok(Self {
            grid,
            spawn,
            goal,
            field,
            enemies: EnemyPool::new(),
            projectiles: ProjectilePool::new(),
            towers: TowerRegistry::new(),
            placement: None,
            cursor: Vec2::ZERO,
            goal_health: Health::new(config.goal_health),
            goal_destroyed: config.goal_health == 0,
            credits: config.starting_credits,
            wave: 0,
            elapsed: Duration::ZERO,
        })
    }

    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let tile_length = self.grid.tile_length();
        let goal_bounds = self.grid.tile_bounds(self.goal);
        let mut arrivals: Vec<(EnemyId, EnemyKind)> = Vec::new();

        for enemy in self.enemies.iter_mut() {
            enemy.advance(&self.grid, &self.field, dt);
            if enemy.bounds(tile_length).overlaps(&goal_bounds) {
                arrivals.push((enemy.id, enemy.kind));
            }
        }

        if arrivals.is_empty() {
            return;
        }

        self.enemies
            .retain(|enemy| !arrivals.iter().any(|(id, _)| *id == enemy.id));

        for (enemy, kind) in arrivals {
            let damage = kind.goal_damage();
            out_events.push(Event::EnemyReachedGoal {
                enemy,
                kind,
                damage,
            });
            self.damage_goal(damage, out_events);
        }
    }

    fn damage_goal(&mut self, damage: u32, out_events: &mut Vec<Event>) {
        self.goal_health = self.goal_health.damaged(damage);
        out_events.push(Event::GoalDamaged {
            remaining: self.goal_health,
        });

        if self.goal_health.is_depleted() && !self.goal_destroyed {
            self.goal_destroyed = true;
            tracing::info!(wave = self.wave, "goal destroyed");
            out_events.push(Event::GoalDestroyed);
            out_events.push(Event::PlaySound {
                cue: SoundCue::GameOver,
            });
        }
    }

    fn confirm_placement(&mut self, out_events: &mut Vec<Event>) {
        let Some(placement) = self.placement else {
            return;
        };

        match towers::validate_placement(
            &self.grid,
            &self.towers,
            self.credits,
            placement.kind,
            placement.position,
        ) {
            Ok(position) => {
                let cost = placement.kind.cost();
                self.credits -= cost;
                let tower = self.towers.insert(placement.kind, position);
                self.placement = None;
                tracing::debug!(tower = tower.get(), kind = ?placement.kind, "tower placed");
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind: placement.kind,
                    position,
                    cost,
                });
            }
            Err(reason) => {
                tracing::debug!(kind = ?placement.kind, ?reason, "placement rejected");
                out_events.push(Event::PlacementRejected {
                    kind: placement.kind,
                    reason,
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.elapsed = world.elapsed.saturating_add(dt);
            for tower in world.towers.iter_mut() {
                tower.cooldown = tower.cooldown.saturating_sub(dt);
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SpawnEnemy { kind } => {
            let position = world.grid.to_world(world.spawn);
            let enemy = world.enemies.spawn(kind, position);
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                position,
            });
        }
        Command::StartWave { wave } => {
            world.wave = wave;
            tracing::info!(wave, "wave started");
            out_events.push(Event::WaveStarted { wave });
        }
        Command::FinishWave { wave } => {
            for tower in world.towers.iter_mut() {
                tower.cooldown = Duration::ZERO;
            }
            tracing::info!(wave, "wave finished");
            out_events.push(Event::WaveFinished { wave });
        }
        Command::FireProjectile {
            tower,
            projectile: kind,
            origin,
            velocity,
        } => {
            let Some(state) = world.towers.get_mut(tower) else {
                tracing::debug!(tower = tower.get(), "fire request for unknown tower");
                return;
            };
            if !state.is_ready() {
                return;
            }

            let projectile = world.projectiles.launch(kind, origin, velocity);
            state.cooldown = state.kind.fire_cooldown();
            out_events.push(Event::ProjectileLaunched {
                projectile,
                tower,
                kind,
            });
        }
        Command::AdvanceEnemies { dt } => world.advance_enemies(dt, out_events),
        Command::AdvanceProjectiles { dt } => {
            let earned = combat::resolve_projectiles(
                &mut world.projectiles,
                &mut world.enemies,
                &world.grid,
                dt,
                out_events,
            );
            world.credits = world.credits.saturating_add(earned);
        }
        Command::BeginPlacement { kind } => {
            world.placement = Some(Placement {
                kind,
                position: world.cursor,
            });
            out_events.push(Event::PlacementStarted { kind });
        }
        Command::MovePlacement { cursor } => {
            world.cursor = cursor;
            if let Some(placement) = world.placement.as_mut() {
                placement.position = cursor;
            }
        }
        Command::ConfirmPlacement => world.confirm_placement(out_events),
        Command::CancelPlacement => {
            if let Some(placement) = world.placement.take() {
                out_events.push(Event::PlacementCancelled {
                    kind: placement.kind,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{towers, DirectionField, TileGrid, World};
    use wave_defence_core::{
        CellCoord, EnemyView, Health, PlacementPreview, ProjectileSnapshot, TowerView,
    };

    /// Provides read-only access to the world's tile grid definition.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Provides read-only access to the direction field guiding enemies.
    #[must_use]
    pub fn direction_field(world: &World) -> &DirectionField {
        &world.field
    }

    /// Cell where enemies enter the maze.
    #[must_use]
    pub fn spawn(world: &World) -> CellCoord {
        world.spawn
    }

    /// Cell enemies attempt to reach.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.goal
    }

    /// Health the goal has left.
    #[must_use]
    pub fn goal_health(world: &World) -> Health {
        world.goal_health
    }

    /// Reports whether the goal ran out of health.
    #[must_use]
    pub fn is_goal_destroyed(world: &World) -> bool {
        world.goal_destroyed
    }

    /// Credits available for building towers.
    #[must_use]
    pub fn credits(world: &World) -> u32 {
        world.credits
    }

    /// One-based number of the most recently started wave, zero before the first.
    #[must_use]
    pub fn current_wave(world: &World) -> u32 {
        world.wave
    }

    /// Simulated time accumulated by tick commands.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of every placed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Snapshots of every projectile in flight, oldest first.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Describes the tower following the cursor, if any.
    #[must_use]
    pub fn placement_preview(world: &World) -> Option<PlacementPreview> {
        let placement = world.placement?;
        let validation = towers::validate_placement(
            &world.grid,
            &world.towers,
            world.credits,
            placement.kind,
            placement.position,
        );
        Some(PlacementPreview {
            kind: placement.kind,
            position: placement.position,
            snapped: world.grid.to_grid(placement.position).map(|cell| world.grid.to_world(cell)),
            rejection: validation.err(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_defence_core::{PlacementError, ProjectileKind, TowerId};

    fn corridor(config: WorldConfig) -> World {
        let level = Level::from_rows(&["S.....G", "......."], 10.0).expect("corridor level");
        World::new(level, config).expect("corridor world")
    }

    #[test]
    fn fresh_world_reports_configured_totals() {
        let world = corridor(WorldConfig::default());
        assert_eq!(query::goal_health(&world), Health::new(100));
        assert_eq!(query::credits(&world), 150);
        assert_eq!(query::current_wave(&world), 0);
    }

    #[test]
    fn unreachable_goal_prevents_world_creation() {
        let level = Level::from_rows(&["S.#G"], 10.0).expect("parses");
        let error = World::new(level, WorldConfig::default()).expect_err("goal is walled off");
        assert!(matches!(error, LevelError::Unreachable { .. }));
    }

    #[test]
    fn enemies_spawn_on_the_spawn_tile_centre() {
        let mut world = corridor(WorldConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                kind: EnemyKind::Goblin,
            },
            &mut events,
        );

        let enemies = query::enemy_view(&world).into_vec();
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].position, Vec2::new(5.0, 5.0));
        assert_eq!(
            events,
            vec![Event::EnemySpawned {
                enemy: enemies[0].id,
                kind: EnemyKind::Goblin,
                position: Vec2::new(5.0, 5.0),
            }]
        );
    }

    #[test]
    fn goal_contact_removes_enemy_and_destroys_goal_once() {
        let mut world = corridor(WorldConfig {
            goal_health: 30,
            starting_credits: 0,
        });
        let mut events = Vec::new();
        for _ in 0..2 {
            apply(
                &mut world,
                Command::SpawnEnemy {
                    kind: EnemyKind::Troll,
                },
                &mut events,
            );
        }
        events.clear();

        for _ in 0..30 {
            apply(
                &mut world,
                Command::AdvanceEnemies {
                    dt: Duration::from_millis(500),
                },
                &mut events,
            );
        }

        assert_eq!(query::enemy_count(&world), 0);
        assert!(query::goal_health(&world).is_depleted());
        assert!(query::is_goal_destroyed(&world));
        let destroyed = events
            .iter()
            .filter(|event| matches!(event, Event::GoalDestroyed))
            .count();
        assert_eq!(destroyed, 1);
        let arrivals = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyReachedGoal { .. }))
            .count();
        assert_eq!(arrivals, 2);
        assert!(events.contains(&Event::PlaySound {
            cue: SoundCue::GameOver,
        }));
    }

    #[test]
    fn placement_flow_spends_credits_and_rejects_overlap() {
        let mut world = corridor(WorldConfig::default());
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlacement {
                cursor: Vec2::new(33.0, 14.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::BeginPlacement {
                kind: TowerKind::Bolt,
            },
            &mut events,
        );
        let preview = query::placement_preview(&world).expect("preview exists");
        assert!(preview.is_placeable());
        assert_eq!(preview.snapped, Some(Vec2::new(35.0, 15.0)));

        apply(&mut world, Command::ConfirmPlacement, &mut events);
        assert_eq!(query::credits(&world), 100);
        assert!(query::placement_preview(&world).is_none());
        assert!(events.contains(&Event::TowerPlaced {
            tower: TowerId::new(0),
            kind: TowerKind::Bolt,
            position: Vec2::new(35.0, 15.0),
            cost: 50,
        }));

        events.clear();
        apply(
            &mut world,
            Command::BeginPlacement {
                kind: TowerKind::Bolt,
            },
            &mut events,
        );
        apply(&mut world, Command::ConfirmPlacement, &mut events);
        assert_eq!(query::tower_view(&world).len(), 1);
        assert_eq!(
            events,
            vec![
                Event::PlacementStarted {
                    kind: TowerKind::Bolt,
                },
                Event::PlacementRejected {
                    kind: TowerKind::Bolt,
                    reason: PlacementError::Occupied,
                },
            ]
        );

        apply(&mut world, Command::CancelPlacement, &mut events);
        assert!(query::placement_preview(&world).is_none());
        assert_eq!(
            events.last(),
            Some(&Event::PlacementCancelled {
                kind: TowerKind::Bolt,
            })
        );
    }

    #[test]
    fn firing_starts_cooldown_and_wave_finish_resets_it() {
        let mut world = corridor(WorldConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlacement {
                cursor: Vec2::new(15.0, 15.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::BeginPlacement {
                kind: TowerKind::Bolt,
            },
            &mut events,
        );
        apply(&mut world, Command::ConfirmPlacement, &mut events);
        events.clear();

        let fire = |tower| Command::FireProjectile {
            tower,
            projectile: ProjectileKind::Bolt,
            origin: Vec2::new(15.0, 15.0),
            velocity: Vec2::new(80.0, 0.0),
        };
        apply(&mut world, fire(TowerId::new(7)), &mut events);
        apply(&mut world, fire(TowerId::new(0)), &mut events);
        apply(&mut world, fire(TowerId::new(0)), &mut events);

        let projectiles = query::projectiles(&world);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].position, Vec2::new(15.0, 15.0));
        assert_eq!(projectiles[0].velocity, Vec2::new(80.0, 0.0));
        let launched = events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileLaunched { .. }))
            .count();
        assert_eq!(launched, 1);

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(500),
            },
            &mut events,
        );
        let cooldown = query::tower_view(&world).into_vec()[0].cooldown;
        assert_eq!(cooldown, Duration::from_millis(1_500));

        apply(&mut world, Command::FinishWave { wave: 1 }, &mut events);
        assert!(query::tower_view(&world).into_vec()[0].is_ready());
    }
}
