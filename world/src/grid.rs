//! Static tile grid and level description loaded once per session.

use glam::Vec2;
use thiserror::Error;
use wave_defence_core::{Bounds, CellCoord, TileKind};

/// Reasons a level cannot be turned into a world.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LevelError {
    /// The layout contains no tiles.
    #[error("level layout contains no tiles")]
    EmptyGrid,
    /// The tile side length is zero, negative or not finite.
    #[error("tile length must be a positive finite number, got {tile_length}")]
    InvalidTileLength {
        /// Rejected tile length.
        tile_length: f32,
    },
    /// The tile buffer does not match the declared dimensions.
    #[error("expected {expected} tiles but found {found}")]
    TileCountMismatch {
        /// Number of tiles implied by the dimensions.
        expected: usize,
        /// Number of tiles provided.
        found: usize,
    },
    /// A layout row differs in width from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A layout character is not a known tile code.
    #[error("unknown tile code {code:?} at column {column}, row {row}")]
    UnknownTileCode {
        /// Unrecognised character.
        code: char,
        /// Column of the character.
        column: u32,
        /// Row of the character.
        row: u32,
    },
    /// The layout carries no spawn marker.
    #[error("level has no spawn marker")]
    MissingSpawn,
    /// The layout carries more than one spawn marker.
    #[error("level has more than one spawn marker")]
    DuplicateSpawn,
    /// The layout carries no goal marker.
    #[error("level has no goal marker")]
    MissingGoal,
    /// The layout carries more than one goal marker.
    #[error("level has more than one goal marker")]
    DuplicateGoal,
    /// A marker lies outside the grid.
    #[error("marker {cell:?} lies outside the grid")]
    MarkerOutOfBounds {
        /// Offending marker cell.
        cell: CellCoord,
    },
    /// The spawn marker does not sit on a path tile.
    #[error("spawn {cell:?} is not a path tile")]
    SpawnNotOnPath {
        /// Spawn cell.
        cell: CellCoord,
    },
    /// The goal marker does not sit on a goal tile.
    #[error("goal {cell:?} is not a goal tile")]
    GoalNotMarked {
        /// Goal cell.
        cell: CellCoord,
    },
    /// The spawn has no passable neighbour to walk toward.
    #[error("spawn {cell:?} is enclosed by walls")]
    SpawnEnclosed {
        /// Spawn cell.
        cell: CellCoord,
    },
    /// The turn-left walk did not reach the goal within its step bound.
    #[error("goal is unreachable from the spawn within {steps} steps")]
    Unreachable {
        /// Step bound that was exhausted.
        steps: usize,
    },
}

/// Describes the discrete tile layout of the world.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Creates a grid from row-major tiles.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        tiles: Vec<TileKind>,
    ) -> Result<Self, LevelError> {
        if columns == 0 || rows == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(LevelError::InvalidTileLength { tile_length });
        }
        let expected = columns as usize * rows as usize;
        if tiles.len() != expected {
            return Err(LevelError::TileCountMismatch {
                expected,
                found: tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            tiles,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Box covering the whole play area.
    #[must_use]
    pub fn play_area(&self) -> Bounds {
        Bounds::from_corners(Vec2::ZERO, Vec2::new(self.width(), self.height()))
    }

    /// Kind of the tile stored at `cell`, if the cell lies in the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileKind> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Reports whether `cell` holds a wall. Cells outside the grid are walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.tile(cell).map_or(true, |kind| !kind.is_passable())
    }

    /// Maps a world position to the cell containing it.
    #[must_use]
    pub fn to_grid(&self, position: Vec2) -> Option<CellCoord> {
        let column = (position.x / self.tile_length).floor();
        let row = (position.y / self.tile_length).floor();
        if !(column >= 0.0 && row >= 0.0) {
            return None;
        }
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }
        Some(CellCoord::new(column as u32, row as u32))
    }

    /// Centre of `cell` in world units.
    #[must_use]
    pub fn to_world(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.tile_length,
            (cell.row() as f32 + 0.5) * self.tile_length,
        )
    }

    /// Box covering `cell`.
    #[must_use]
    pub fn tile_bounds(&self, cell: CellCoord) -> Bounds {
        Bounds::square(self.to_world(cell), self.tile_length)
    }

    /// Reports whether `bounds` overlaps the interior of any wall tile.
    #[must_use]
    pub fn overlaps_wall(&self, bounds: &Bounds) -> bool {
        let min = bounds.min() / self.tile_length;
        let max = bounds.max() / self.tile_length;
        let first_column = min.x.floor().max(0.0) as u32;
        let first_row = min.y.floor().max(0.0) as u32;
        let last_column = (max.x.floor().max(0.0) as u32).min(self.columns - 1);
        let last_row = (max.y.floor().max(0.0) as u32).min(self.rows - 1);

        (first_row..=last_row).any(|row| {
            (first_column..=last_column).any(|column| {
                let cell = CellCoord::new(column, row);
                self.is_wall(cell) && self.tile_bounds(cell).overlaps(bounds)
            })
        })
    }

    /// Iterator over every cell and its tile kind in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, TileKind)> + '_ {
        let columns = self.columns;
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *kind)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        Some(cell.row() as usize * self.columns as usize + cell.column() as usize)
    }
}

/// Validated level geometry: a tile grid plus its spawn and goal markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    grid: TileGrid,
    spawn: CellCoord,
    goal: CellCoord,
}

impl Level {
    /// Creates a level, checking that the markers fit the grid.
    pub fn new(grid: TileGrid, spawn: CellCoord, goal: CellCoord) -> Result<Self, LevelError> {
        for cell in [spawn, goal] {
            if grid.tile(cell).is_none() {
                return Err(LevelError::MarkerOutOfBounds { cell });
            }
        }
        if grid.tile(spawn) != Some(TileKind::Path) {
            return Err(LevelError::SpawnNotOnPath { cell: spawn });
        }
        if grid.tile(goal) != Some(TileKind::Goal) {
            return Err(LevelError::GoalNotMarked { cell: goal });
        }

        Ok(Self { grid, spawn, goal })
    }

    /// Parses a level from text rows of tile codes.
    ///
    /// `#` is a wall, `.` a path tile, `S` the spawn (a path tile) and `G` the
    /// goal.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_length: f32) -> Result<Self, LevelError> {
        let Some(first) = rows.first() else {
            return Err(LevelError::EmptyGrid);
        };
        let columns = first.as_ref().chars().count() as u32;
        let mut tiles = Vec::with_capacity(columns as usize * rows.len());
        let mut spawn = None;
        let mut goal = None;

        for (row_index, row) in rows.iter().enumerate() {
            let row_index = row_index as u32;
            let row = row.as_ref();
            let found = row.chars().count() as u32;
            if found != columns {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected: columns,
                    found,
                });
            }

            for (column, code) in row.chars().enumerate() {
                let cell = CellCoord::new(column as u32, row_index);
                let kind = match code {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Path,
                    'S' => {
                        if spawn.replace(cell).is_some() {
                            return Err(LevelError::DuplicateSpawn);
                        }
                        TileKind::Path
                    }
                    'G' => {
                        if goal.replace(cell).is_some() {
                            return Err(LevelError::DuplicateGoal);
                        }
                        TileKind::Goal
                    }
                    other => {
                        return Err(LevelError::UnknownTileCode {
                            code: other,
                            column: cell.column(),
                            row: cell.row(),
                        })
                    }
                };
                tiles.push(kind);
            }
        }

        let spawn = spawn.ok_or(LevelError::MissingSpawn)?;
        let goal = goal.ok_or(LevelError::MissingGoal)?;
        let grid = TileGrid::new(columns, rows.len() as u32, tile_length, tiles)?;
        Self::new(grid, spawn, goal)
    }

    /// Tile grid of the level.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Cell where enemies enter the maze.
    #[must_use]
    pub const fn spawn(&self) -> CellCoord {
        self.spawn
    }

    /// Cell enemies attempt to reach.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    pub(crate) fn into_parts(self) -> (TileGrid, CellCoord, CellCoord) {
        (self.grid, self.spawn, self.goal)
    }
}
