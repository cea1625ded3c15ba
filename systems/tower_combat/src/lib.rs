#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns tower targets into kind-specific launch orders.
//!
//! Every tower kind maps to a fire variant through [`fire_variant`]. A variant
//! decides what a shot looks like (a travelling bolt, a stationary bubble) and
//! hands the result to a [`ProjectileSink`]. Inside [`TowerCombat::handle`] the
//! sink records each launch as a `Command::FireProjectile` for the world to
//! apply, so variants never touch world state directly.

use glam::Vec2;
use wave_defence_core::{
    Command, ProjectileKind, TowerId, TowerKind, TowerSnapshot, TowerTarget, TowerView,
};

/// Capability to put a projectile into flight.
///
/// A fire variant borrows it for a single shot and never stores it.
pub trait ProjectileSink {
    /// Launches a projectile of `kind` from `origin` with `velocity` in world
    /// units per second.
    fn launch(&mut self, kind: ProjectileKind, origin: Vec2, velocity: Vec2);
}

/// Kind-specific fire action: tower, aim vector, tile length and launch sink.
pub type FireVariant = fn(&TowerSnapshot, Vec2, f32, &mut dyn ProjectileSink);

/// Looks up the fire variant for a tower kind.
#[must_use]
pub fn fire_variant(kind: TowerKind) -> FireVariant {
    match kind {
        TowerKind::Bolt => fire_bolt,
        TowerKind::Bubble => fire_bubble,
    }
}

fn fire_bolt(tower: &TowerSnapshot, aim: Vec2, tile_length: f32, sink: &mut dyn ProjectileSink) {
    let kind = tower.kind.projectile();
    let velocity = aim.normalize_or_zero() * kind.speed_in_tiles() * tile_length;
    sink.launch(kind, tower.position, velocity);
}

// Bubbles ignore the aim and grow in place.
fn fire_bubble(
    tower: &TowerSnapshot,
    _aim: Vec2,
    _tile_length: f32,
    sink: &mut dyn ProjectileSink,
) {
    sink.launch(tower.kind.projectile(), tower.position, Vec2::ZERO);
}

/// Sink that turns launches into world commands on behalf of one tower.
struct LaunchOrders<'a> {
    tower: TowerId,
    out: &'a mut Vec<Command>,
}

impl ProjectileSink for LaunchOrders<'_> {
    fn launch(&mut self, kind: ProjectileKind, origin: Vec2, velocity: Vec2) {
        self.out.push(Command::FireProjectile {
            tower: self.tower,
            projectile: kind,
            origin,
            velocity,
        });
    }
}

/// Tower combat system that fires every targeted tower still ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates the combat system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the fire variant of each targeted, ready tower.
    ///
    /// Targets naming an unknown or cooling tower are skipped. The world
    /// applies the resulting commands and restarts each firing tower's
    /// cooldown.
    pub fn handle(
        &self,
        towers: &TowerView,
        tower_targets: &[TowerTarget],
        tile_length: f32,
        out: &mut Vec<Command>,
    ) {
        for target in tower_targets {
            let Some(tower) = towers.iter().find(|tower| tower.id == target.tower) else {
                continue;
            };
            if !tower.is_ready() {
                continue;
            }

            let mut orders = LaunchOrders {
                tower: tower.id,
                out: &mut *out,
            };
            fire_variant(tower.kind)(tower, target.aim, tile_length, &mut orders);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wave_defence_core::EnemyId;

    #[derive(Default)]
    struct Recorded(Vec<(ProjectileKind, Vec2, Vec2)>);

    impl ProjectileSink for Recorded {
        fn launch(&mut self, kind: ProjectileKind, origin: Vec2, velocity: Vec2) {
            self.0.push((kind, origin, velocity));
        }
    }

    #[test]
    fn variants_follow_the_tower_kind() {
        let mut sink = Recorded::default();
        let bolt = tower(0, TowerKind::Bolt, Duration::ZERO);
        let bubble = tower(1, TowerKind::Bubble, Duration::ZERO);

        fire_variant(bolt.kind)(&bolt, Vec2::new(0.0, 2.0), 30.0, &mut sink);
        fire_variant(bubble.kind)(&bubble, Vec2::new(0.0, 2.0), 30.0, &mut sink);

        assert_eq!(
            sink.0,
            vec![
                (
                    ProjectileKind::Bolt,
                    Vec2::new(15.0, 15.0),
                    Vec2::new(0.0, 240.0)
                ),
                (ProjectileKind::Bubble, Vec2::new(45.0, 15.0), Vec2::ZERO),
            ]
        );
    }

    #[test]
    fn zero_aim_launches_a_resting_bolt() {
        let mut sink = Recorded::default();
        let bolt = tower(0, TowerKind::Bolt, Duration::ZERO);

        fire_variant(bolt.kind)(&bolt, Vec2::ZERO, 30.0, &mut sink);

        assert_eq!(sink.0[0].2, Vec2::ZERO);
    }

    #[test]
    fn only_ready_known_towers_receive_orders() {
        let system = TowerCombat::new();
        let towers = TowerView::from_snapshots(vec![
            tower(8, TowerKind::Bubble, Duration::ZERO),
            tower(3, TowerKind::Bolt, Duration::from_millis(250)),
            tower(5, TowerKind::Bolt, Duration::ZERO),
        ]);
        let targets = vec![target(3), target(5), target(8), target(42)];
        let mut out = Vec::new();

        system.handle(&towers, &targets, 10.0, &mut out);

        assert_eq!(
            out,
            vec![
                Command::FireProjectile {
                    tower: TowerId::new(5),
                    projectile: ProjectileKind::Bolt,
                    origin: Vec2::new(165.0, 15.0),
                    velocity: Vec2::new(80.0, 0.0),
                },
                Command::FireProjectile {
                    tower: TowerId::new(8),
                    projectile: ProjectileKind::Bubble,
                    origin: Vec2::new(255.0, 15.0),
                    velocity: Vec2::ZERO,
                },
            ],
        );
    }

    #[test]
    fn existing_commands_are_kept() {
        let system = TowerCombat::new();
        let towers = TowerView::from_snapshots(vec![tower(0, TowerKind::Bolt, Duration::ZERO)]);
        let mut out = vec![Command::ConfirmPlacement];

        system.handle(&towers, &[target(0)], 10.0, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Command::ConfirmPlacement);
    }

    fn tower(id: u32, kind: TowerKind, cooldown: Duration) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            position: Vec2::new(15.0 + 30.0 * id as f32, 15.0),
            cooldown,
        }
    }

    fn target(tower: u32) -> TowerTarget {
        TowerTarget {
            tower: TowerId::new(tower),
            enemy: EnemyId::new(0),
            aim: Vec2::X,
        }
    }
}
