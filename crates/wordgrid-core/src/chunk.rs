//! Chunk and cell coordinates for the unbounded letter grid.
//!
//! The world is split into square chunks of [`CHUNK_SIZE`] × [`CHUNK_SIZE`]
//! cells. Coordinates are signed in both axes because the world grows in
//! every direction from chunk `(0, 0)`; the cell → chunk mapping therefore
//! uses floor division so that cell `-1` belongs to chunk `-1`.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::direction::Direction;

/// Size of each chunk in both dimensions (10x10 cells per chunk).
pub const CHUNK_SIZE: i32 = 10;

/// Number of cells owned by one chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Global coordinate of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub gx: i32,
    pub gy: i32,
}

impl CellCoord {
    pub const fn new(gx: i32, gy: i32) -> Self {
        Self { gx, gy }
    }

    /// The coordinate `steps` cells away along `direction`.
    pub fn step(&self, direction: Direction, steps: i32) -> Self {
        Self {
            gx: self.gx + direction.dx * steps,
            gy: self.gy + direction.dy * steps,
        }
    }

    /// The chunk this cell belongs to.
    pub fn chunk(&self) -> ChunkCoord {
        ChunkCoord::from_cell(*self)
    }
}

/// Coordinate of a chunk in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// Create a ChunkCoord from a cell's global coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgrid_core::{CellCoord, ChunkCoord};
    ///
    /// assert_eq!(ChunkCoord::from_cell(CellCoord::new(17, 33)), ChunkCoord::new(1, 3));
    /// assert_eq!(ChunkCoord::from_cell(CellCoord::new(-1, 0)), ChunkCoord::new(-1, 0));
    /// ```
    pub fn from_cell(cell: CellCoord) -> Self {
        Self {
            cx: cell.gx.div_euclid(CHUNK_SIZE),
            cy: cell.gy.div_euclid(CHUNK_SIZE),
        }
    }

    /// The adjacent chunk in the given direction.
    pub fn neighbor(&self, direction: Direction) -> Self {
        Self {
            cx: self.cx + direction.dx,
            cy: self.cy + direction.dy,
        }
    }

    /// The cardinal direction leading from `self` to `other`, if they share an edge.
    pub fn direction_to(&self, other: ChunkCoord) -> Option<Direction> {
        let direction = Direction::from_step(other.cx - self.cx, other.cy - self.cy)?;
        direction.is_cardinal().then_some(direction)
    }

    /// Global coordinate of the cell at the given local position.
    pub fn cell_at(&self, local_x: i32, local_y: i32) -> CellCoord {
        to_global_coords(*self, local_x, local_y)
    }
}

/// Convert global coordinates to local coordinates within a chunk.
///
/// # Returns
///
/// A tuple of (local_x, local_y), each in `0..CHUNK_SIZE`.
pub fn to_local_coords(cell: CellCoord) -> (i32, i32) {
    (cell.gx.rem_euclid(CHUNK_SIZE), cell.gy.rem_euclid(CHUNK_SIZE))
}

/// Convert chunk coordinate and local coordinates to global coordinates.
pub fn to_global_coords(chunk: ChunkCoord, local_x: i32, local_y: i32) -> CellCoord {
    CellCoord {
        gx: chunk.cx * CHUNK_SIZE + local_x,
        gy: chunk.cy * CHUNK_SIZE + local_y,
    }
}

/// Row-major index of a local position.
pub fn local_index(local_x: i32, local_y: i32) -> usize {
    (local_y * CHUNK_SIZE + local_x) as usize
}

/// Whether a local position lies inside the chunk bounds.
pub fn in_local_bounds(local_x: i32, local_y: i32) -> bool {
    (0..CHUNK_SIZE).contains(&local_x) && (0..CHUNK_SIZE).contains(&local_y)
}

/// A fully populated chunk of cells.
///
/// Cells are stored in row-major local order. Letters never change after
/// construction; only the found/used flags do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    cells: Vec<Cell>,
}

impl Chunk {
    /// Build a chunk from exactly [`CHUNK_AREA`] cells, or `None` for any other count.
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        (cells.len() == CHUNK_AREA).then_some(Self { cells })
    }

    /// Build a fresh chunk from generated letters.
    pub fn from_letters(letters: &[char; CHUNK_AREA]) -> Self {
        Self {
            cells: letters.iter().map(|&letter| Cell::new(letter)).collect(),
        }
    }

    /// Get a reference to the cell at the given local coordinates.
    pub fn get(&self, local_x: i32, local_y: i32) -> Option<&Cell> {
        if !in_local_bounds(local_x, local_y) {
            return None;
        }
        self.cells.get(local_index(local_x, local_y))
    }

    pub(crate) fn get_mut(&mut self, local_x: i32, local_y: i32) -> Option<&mut Cell> {
        if !in_local_bounds(local_x, local_y) {
            return None;
        }
        self.cells.get_mut(local_index(local_x, local_y))
    }

    /// Cells in row-major local order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The chunk's letters as rows of text, for logs and debugging.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(CHUNK_SIZE as usize)
            .map(|row| row.iter().map(Cell::letter).collect())
            .collect()
    }
}
