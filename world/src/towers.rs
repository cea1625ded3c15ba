//! Authoritative tower state and placement rules.

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use wave_defence_core::{
    Bounds, PlacementError, TowerId, TowerKind, TowerSnapshot, TOWER_FOOTPRINT_TILES,
};

use crate::grid::TileGrid;

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Tile-centre position the tower was snapped to.
    pub(crate) position: Vec2,
    /// Time left before the tower may fire again.
    pub(crate) cooldown: Duration,
}

impl TowerState {
    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    pub(crate) fn bounds(&self, tile_length: f32) -> Bounds {
        footprint(self.position, tile_length)
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            cooldown: self.cooldown,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a ready tower at `position` and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, position: Vec2) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                position,
                cooldown: Duration::ZERO,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }

    /// Reports whether `bounds` overlaps any placed tower.
    pub(crate) fn overlaps(&self, bounds: &Bounds, tile_length: f32) -> bool {
        self.iter()
            .any(|tower| tower.bounds(tile_length).overlaps(bounds))
    }
}

/// Square footprint of a tower centred on `position`.
pub(crate) fn footprint(position: Vec2, tile_length: f32) -> Bounds {
    Bounds::square(position, TOWER_FOOTPRINT_TILES * tile_length)
}

/// Checks whether a tower of `kind` may be placed under `cursor`.
///
/// Both the raw cursor footprint and the snapped tile-centre footprint must
/// stay inside the play area and clear of walls and towers. Returns the
/// snapped position on success.
pub(crate) fn validate_placement(
    grid: &TileGrid,
    towers: &TowerRegistry,
    credits: u32,
    kind: TowerKind,
    cursor: Vec2,
) -> Result<Vec2, PlacementError> {
    let cell = grid.to_grid(cursor).ok_or(PlacementError::OutOfBounds)?;
    let snapped = grid.to_world(cell);
    let tile_length = grid.tile_length();
    let play_area = grid.play_area();

    for candidate in [cursor, snapped] {
        let bounds = footprint(candidate, tile_length);
        if !play_area.contains(&bounds) {
            return Err(PlacementError::OutOfBounds);
        }
        if grid.overlaps_wall(&bounds) {
            return Err(PlacementError::BlockedByWall);
        }
        if towers.overlaps(&bounds, tile_length) {
            return Err(PlacementError::Occupied);
        }
    }

    if credits < kind.cost() {
        return Err(PlacementError::InsufficientCredits);
    }

    Ok(snapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Level;

    fn open_level() -> Level {
        Level::from_rows(&["S....", ".....", "..#..", "....G"], 30.0).expect("open level")
    }

    #[test]
    fn registry_starts_empty_and_allocates_in_order() {
        let mut registry = TowerRegistry::new();
        assert_eq!(registry.iter().count(), 0);
        let first = registry.insert(TowerKind::Bolt, Vec2::new(15.0, 15.0));
        let second = registry.insert(TowerKind::Bubble, Vec2::new(45.0, 15.0));
        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
        assert!(registry.iter().all(TowerState::is_ready));
    }

    #[test]
    fn placement_snaps_to_tile_centre() {
        let level = open_level();
        let registry = TowerRegistry::new();
        let snapped = validate_placement(
            level.grid(),
            &registry,
            100,
            TowerKind::Bolt,
            Vec2::new(40.0, 50.0),
        );
        assert_eq!(snapped, Ok(Vec2::new(45.0, 45.0)));
    }

    #[test]
    fn placement_rejections_name_their_cause() {
        let level = open_level();
        let grid = level.grid();
        let mut registry = TowerRegistry::new();
        let _ = registry.insert(TowerKind::Bolt, Vec2::new(15.0, 15.0));

        let check = |registry: &TowerRegistry, credits, cursor| {
            validate_placement(grid, registry, credits, TowerKind::Bubble, cursor)
        };

        assert_eq!(
            check(&registry, 500, Vec2::new(-5.0, 15.0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            check(&registry, 500, Vec2::new(2.0, 45.0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            check(&registry, 500, Vec2::new(75.0, 75.0)),
            Err(PlacementError::BlockedByWall)
        );
        assert_eq!(
            check(&registry, 500, Vec2::new(20.0, 20.0)),
            Err(PlacementError::Occupied)
        );
        assert_eq!(
            check(&registry, 79, Vec2::new(135.0, 15.0)),
            Err(PlacementError::InsufficientCredits)
        );
        assert_eq!(
            check(&registry, 80, Vec2::new(135.0, 15.0)),
            Ok(Vec2::new(135.0, 15.0))
        );
    }

    #[test]
    fn neighbouring_towers_do_not_collide() {
        let level = open_level();
        let mut registry = TowerRegistry::new();
        let _ = registry.insert(TowerKind::Bolt, Vec2::new(15.0, 15.0));
        assert_eq!(
            validate_placement(
                level.grid(),
                &registry,
                100,
                TowerKind::Bolt,
                Vec2::new(45.0, 15.0)
            ),
            Ok(Vec2::new(45.0, 15.0))
        );
    }
}
