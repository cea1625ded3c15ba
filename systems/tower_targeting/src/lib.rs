#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks targets for ready towers from world snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use wave_defence_core::{EnemySnapshot, EnemyView, TowerSnapshot, TowerTarget, TowerView};

/// Rule used to choose between several enemies within range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPolicy {
    /// The oldest enemy in range.
    #[default]
    First,
    /// The enemy closest to the tower, oldest first on ties.
    Nearest,
}

/// Tower targeting system assigning one enemy to every ready tower.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    policy: TargetPolicy,
}

impl TowerTargeting {
    /// Creates a targeting system that applies `policy`.
    #[must_use]
    pub const fn new(policy: TargetPolicy) -> Self {
        Self { policy }
    }

    /// Policy applied when several enemies are in range.
    #[must_use]
    pub const fn policy(&self) -> TargetPolicy {
        self.policy
    }

    /// Computes targets for every ready tower.
    ///
    /// The output buffer is cleared first. Towers still cooling down and
    /// towers without an enemy in range receive no assignment and simply try
    /// again on a later tick.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        tile_length: f32,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        for tower in towers.iter().filter(|tower| tower.is_ready()) {
            let range = tower.kind.range_in_tiles() * tile_length;
            let Some(enemy) = self.select(tower, enemies, range * range) else {
                continue;
            };

            out.push(TowerTarget {
                tower: tower.id,
                enemy: enemy.id,
                aim: lead_aim(tower.position, enemy),
            });
        }
    }

    fn select<'a>(
        &self,
        tower: &TowerSnapshot,
        enemies: &'a EnemyView,
        range_sq: f32,
    ) -> Option<&'a EnemySnapshot> {
        let mut in_range = enemies
            .iter()
            .map(|enemy| (enemy.position.distance_squared(tower.position), enemy))
            .filter(|(distance_sq, _)| *distance_sq <= range_sq);

        match self.policy {
            TargetPolicy::First => in_range.next().map(|(_, enemy)| enemy),
            TargetPolicy::Nearest => in_range
                .min_by(|left, right| left.0.total_cmp(&right.0))
                .map(|(_, enemy)| enemy),
        }
    }
}

/// Direction from the tower toward where the enemy will be one second on.
fn lead_aim(tower: Vec2, enemy: &EnemySnapshot) -> Vec2 {
    (enemy.position - tower + enemy.velocity).normalize_or_zero()
}
