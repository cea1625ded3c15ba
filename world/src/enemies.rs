//! Enemy pool and per-tick movement along the direction field.

use std::time::Duration;

use glam::Vec2;
use wave_defence_core::{
    Bounds, EnemyId, EnemyKind, EnemySnapshot, Health, ENEMY_FOOTPRINT_TILES,
};

use crate::{grid::TileGrid, navigation::DirectionField};

/// Live enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) health: Health,
}

impl Enemy {
    /// Moves the enemy for `dt` along the direction of the cell it occupies.
    ///
    /// The occupied cell is the one whose centre the enemy most recently
    /// reached, so turns happen on tile centres. On a turn the distance already
    /// travelled past the centre carries over into the new heading. Outside
    /// the field the previous velocity is kept.
    pub(crate) fn advance(&mut self, grid: &TileGrid, field: &DirectionField, dt: Duration) {
        let tile_length = grid.tile_length();
        let heading = self.velocity.normalize_or_zero();
        let trailing_edge = self.position - heading * (tile_length * 0.5);

        if let Some(cell) = grid.to_grid(trailing_edge) {
            if let Some(direction) = field.direction(cell) {
                let unit = direction.unit();
                if unit != heading {
                    let centre = grid.to_world(cell);
                    let overshoot = (self.position - centre).dot(heading).max(0.0);
                    self.position = centre + unit * overshoot;
                }
                self.velocity = unit * self.kind.speed_in_tiles() * tile_length;
            }
        }

        self.position += self.velocity * dt.as_secs_f32();
    }

    pub(crate) fn bounds(&self, tile_length: f32) -> Bounds {
        Bounds::square(self.position, ENEMY_FOOTPRINT_TILES * tile_length)
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            velocity: self.velocity,
            health: self.health,
        }
    }
}

/// Enemies in population order plus identifier allocation.
#[derive(Debug)]
pub(crate) struct EnemyPool {
    entries: Vec<Enemy>,
    next_enemy_id: EnemyId,
}

impl EnemyPool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    pub(crate) fn spawn(&mut self, kind: EnemyKind, position: Vec2) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        self.entries.push(Enemy {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            health: kind.max_health(),
        });
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.entries.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every enemy rejected by `keep`, preserving relative order.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Enemy) -> bool) {
        self.entries.retain(|enemy| keep(enemy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Level;
    use wave_defence_core::CellCoord;

    fn corner_level() -> Level {
        Level::from_rows(&["S.#", "#.#", "#G#"], 10.0).expect("corner level")
    }

    #[test]
    fn enemy_turns_on_tile_centres() {
        let level = corner_level();
        let field = DirectionField::build(level.grid(), level.spawn(), level.goal())
            .expect("corner field");
        let mut pool = EnemyPool::new();
        let id = pool.spawn(EnemyKind::Goblin, level.grid().to_world(level.spawn()));
        assert_eq!(id, EnemyId::new(0));

        // A goblin walks one 10-unit tile per second.
        for _ in 0..13 {
            pool.iter_mut()
                .for_each(|enemy| enemy.advance(level.grid(), &field, Duration::from_millis(100)));
        }

        let enemy = pool.iter().next().expect("enemy alive");
        let corner = level.grid().to_world(CellCoord::new(1, 0));
        assert!((enemy.position.x - corner.x).abs() < 1e-3);
        assert!((enemy.position.y - (corner.y + 3.0)).abs() < 1e-3);
        assert!(enemy.velocity.x.abs() < 1e-6);
        assert!(enemy.velocity.y > 0.0);
    }

    #[test]
    fn enemy_off_the_field_keeps_its_velocity() {
        let level = corner_level();
        let field = DirectionField::build(level.grid(), level.spawn(), level.goal())
            .expect("corner field");
        let mut pool = EnemyPool::new();
        let _ = pool.spawn(EnemyKind::Orc, Vec2::new(-50.0, 5.0));
        pool.iter_mut().for_each(|enemy| {
            enemy.velocity = Vec2::new(2.0, 0.0);
            enemy.advance(level.grid(), &field, Duration::from_secs(1));
        });

        let enemy = pool.iter().next().expect("enemy alive");
        assert_eq!(enemy.position, Vec2::new(-48.0, 5.0));
        assert_eq!(enemy.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn identifiers_follow_spawn_order() {
        let mut pool = EnemyPool::new();
        let first = pool.spawn(EnemyKind::Goblin, Vec2::ZERO);
        let second = pool.spawn(EnemyKind::Troll, Vec2::ZERO);
        assert!(first < second);

        pool.retain(|enemy| enemy.id != first);
        assert_eq!(pool.len(), 1);
        let third = pool.spawn(EnemyKind::Orc, Vec2::ZERO);
        assert_eq!(third, EnemyId::new(2));
        assert_eq!(pool.iter().next().map(|enemy| enemy.health), Some(Health::new(20)));
    }
}
