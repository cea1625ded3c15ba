//! Static direction field derived from the level geometry.

use wave_defence_core::{CellCoord, Direction};

use crate::grid::{LevelError, TileGrid};

const INITIAL_HEADINGS: [Direction; 4] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
];

/// Per-cell step direction guiding enemies from the spawn to the goal.
///
/// The field is produced by walking the maze once: the walker keeps its
/// heading while it can, otherwise turns left, then right, and reverses only
/// at a dead end. Each visited cell records the heading the walker left it
/// with, so a cell crossed twice keeps its final heading. Cells the walk never
/// touched have no direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionField {
    columns: u32,
    rows: u32,
    directions: Vec<Option<Direction>>,
}

impl DirectionField {
    /// Walks the grid from `spawn` until it reaches `goal`.
    pub fn build(
        grid: &TileGrid,
        spawn: CellCoord,
        goal: CellCoord,
    ) -> Result<Self, LevelError> {
        let columns = grid.columns();
        let rows = grid.rows();
        let mut field = Self {
            columns,
            rows,
            directions: vec![None; grid.cell_count()],
        };

        let passable = |cell: CellCoord, direction: Direction| {
            cell.neighbor(direction, columns, rows)
                .filter(|next| !grid.is_wall(*next))
        };

        let Some(mut heading) = INITIAL_HEADINGS
            .into_iter()
            .find(|direction| passable(spawn, *direction).is_some())
        else {
            return Err(LevelError::SpawnEnclosed { cell: spawn });
        };

        let steps = grid.cell_count().saturating_mul(4);
        let mut cell = spawn;
        for _ in 0..steps {
            if cell == goal {
                field.set(goal, heading);
                return Ok(field);
            }

            let candidates = [
                heading,
                heading.turn_left(),
                heading.turn_right(),
                heading.reverse(),
            ];
            let Some((next_heading, next_cell)) = candidates
                .into_iter()
                .find_map(|direction| passable(cell, direction).map(|next| (direction, next)))
            else {
                return Err(LevelError::SpawnEnclosed { cell: spawn });
            };

            field.set(cell, next_heading);
            heading = next_heading;
            cell = next_cell;
        }

        Err(LevelError::Unreachable { steps })
    }

    /// Step direction recorded for `cell`, if the walk crossed it.
    #[must_use]
    pub fn direction(&self, cell: CellCoord) -> Option<Direction> {
        self.index(cell).and_then(|index| self.directions[index])
    }

    /// Number of cells that carry a direction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directions.iter().flatten().count()
    }

    /// Reports whether no cell carries a direction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, cell: CellCoord, direction: Direction) {
        if let Some(index) = self.index(cell) {
            self.directions[index] = Some(direction);
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        Some(cell.row() as usize * self.columns as usize + cell.column() as usize)
    }
}
