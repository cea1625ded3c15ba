//! Projectile-versus-enemy collision and damage resolution.

use std::time::Duration;

use wave_defence_core::{EnemyId, Event, ExpiryReason, ProjectileId, SoundCue};

use crate::{enemies::EnemyPool, grid::TileGrid, projectiles::ProjectilePool};

/// Advances every projectile and applies the damage of the ones that land.
///
/// Projectiles are processed oldest first and each one strikes at most the
/// first live enemy it overlaps, in population order. An impact wins over
/// leaving the play area, which wins over dissipating. Spent projectiles and
/// defeated enemies are swept after the pass. Returns the credits earned from
/// defeated enemies.
pub(crate) fn resolve_projectiles(
    projectiles: &mut ProjectilePool,
    enemies: &mut EnemyPool,
    grid: &TileGrid,
    dt: Duration,
    out_events: &mut Vec<Event>,
) -> u32 {
    let tile_length = grid.tile_length();
    let play_area = grid.play_area();
    let mut spent: Vec<ProjectileId> = Vec::new();
    let mut defeated: Vec<EnemyId> = Vec::new();
    let mut earned = 0_u32;

    for projectile in projectiles.iter_mut() {
        projectile.advance(dt);
        let bounds = projectile.bounds(tile_length);

        let target = enemies.iter_mut().find(|enemy| {
            !enemy.health.is_depleted() && enemy.bounds(tile_length).overlaps(&bounds)
        });

        let reason = if let Some(enemy) = target {
            enemy.health = enemy.health.damaged(projectile.kind.damage());
            out_events.push(Event::EnemyDamaged {
                enemy: enemy.id,
                projectile: projectile.id,
                remaining: enemy.health,
            });
            if let Some(cue) = projectile.kind.impact_cue() {
                out_events.push(Event::PlaySound { cue });
            }
            if enemy.health.is_depleted() {
                let reward = enemy.kind.reward();
                earned = earned.saturating_add(reward);
                defeated.push(enemy.id);
                tracing::debug!(enemy = enemy.id.get(), kind = ?enemy.kind, "enemy defeated");
                out_events.push(Event::EnemyDefeated {
                    enemy: enemy.id,
                    kind: enemy.kind,
                    reward,
                });
                out_events.push(Event::PlaySound {
                    cue: SoundCue::EnemyDefeated,
                });
            }
            Some(ExpiryReason::Impact)
        } else if !play_area.contains_point(projectile.position) {
            Some(ExpiryReason::OutOfBounds)
        } else if projectile.is_dissipated() {
            Some(ExpiryReason::Dissipated)
        } else {
            None
        };

        if let Some(reason) = reason {
            spent.push(projectile.id);
            out_events.push(Event::ProjectileRemoved {
                projectile: projectile.id,
                reason,
            });
        }
    }

    if !spent.is_empty() {
        projectiles.retain(|projectile| !spent.contains(&projectile.id));
    }
    if !defeated.is_empty() {
        enemies.retain(|enemy| !defeated.contains(&enemy.id));
    }

    earned
}
