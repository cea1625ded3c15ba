//! Projectile pool with growth and dissipation.

use std::time::Duration;

use glam::Vec2;
use wave_defence_core::{Bounds, ProjectileId, ProjectileKind, ProjectileSnapshot};

/// Projectile in flight.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) kind: ProjectileKind,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) scale: f32,
}

impl Projectile {
    /// Integrates position and growth over `dt`.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();
        self.position += self.velocity * seconds;
        self.scale += self.kind.growth_per_second() * seconds;
    }

    pub(crate) fn bounds(&self, tile_length: f32) -> Bounds {
        let side = 2.0 * self.kind.radius_in_tiles() * tile_length * self.scale;
        Bounds::square(self.position, side)
    }

    /// Kind-specific death predicate.
    pub(crate) fn is_dissipated(&self) -> bool {
        self.kind
            .max_scale()
            .map_or(false, |max_scale| self.scale >= max_scale)
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            velocity: self.velocity,
            scale: self.scale,
        }
    }
}

/// Projectiles in launch order plus identifier allocation.
#[derive(Debug)]
pub(crate) struct ProjectilePool {
    entries: Vec<Projectile>,
    next_projectile_id: ProjectileId,
}

impl ProjectilePool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.entries.iter_mut()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Projectile) -> bool) {
        self.entries.retain(|projectile| keep(projectile));
    }

    /// Puts a projectile of `kind` into flight from `position` with
    /// `velocity` in world units per second.
    pub(crate) fn launch(
        &mut self,
        kind: ProjectileKind,
        position: Vec2,
        velocity: Vec2,
    ) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        self.entries.push(Projectile {
            id,
            kind,
            position,
            velocity,
            scale: kind.initial_scale(),
        });
        id
    }
}
