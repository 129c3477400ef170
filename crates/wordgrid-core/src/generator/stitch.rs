//! Continuing a word from an existing neighbour into the chunk being built.
//!
//! The neighbour's cells are fixed. The generator reads a short run of 1-3
//! letters that ends on the neighbour's shared edge and looks it up as a
//! prefix (the word runs from the neighbour into the new chunk) or, on a coin
//! flip, as a reversed suffix (the word starts in the new chunk and runs back
//! into the neighbour). Only the new chunk's grid is ever written.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{CellSource, GridGenerator, LocalGrid, NeighborHint, Placement, PlacementKind};
use crate::chunk::{to_local_coords, CellCoord, ChunkCoord, CHUNK_SIZE};
use crate::direction::Direction;
use crate::lexicon::FragmentKind;

impl<'a> GridGenerator<'a> {
    /// Stitch one word from `hint.origin` into `target`, if any fits.
    pub(crate) fn stitch<S, R>(
        &self,
        grid: &mut LocalGrid,
        target: ChunkCoord,
        hint: NeighborHint,
        source: &S,
        rng: &mut R,
    ) -> Option<Placement>
    where
        S: CellSource + ?Sized,
        R: Rng + ?Sized,
    {
        let kind = if rng.gen_bool(0.5) {
            FragmentKind::Prefix
        } else {
            FragmentKind::Suffix
        };
        self.stitch_with_kind(grid, target, hint, kind, source, rng)
    }

    pub(crate) fn stitch_with_kind<S, R>(
        &self,
        grid: &mut LocalGrid,
        target: ChunkCoord,
        hint: NeighborHint,
        kind: FragmentKind,
        source: &S,
        rng: &mut R,
    ) -> Option<Placement>
    where
        S: CellSource + ?Sized,
        R: Rng + ?Sized,
    {
        // One draw per call decides whether single letters may be stitched.
        let mut fragment_lengths = vec![3, 2];
        if rng.gen_bool(self.config.single_letter_stitch_chance) {
            fragment_lengths.push(1);
        }

        let mut edge = shared_edge(hint.origin, hint.direction);
        edge.shuffle(rng);

        for edge_cell in edge {
            let mut directions = hint.direction.with_diagonals();
            directions.shuffle(rng);

            for direction in directions {
                let mut lengths = fragment_lengths.clone();
                lengths.shuffle(rng);

                for len in lengths {
                    let Some(fragment) =
                        read_fragment(source, hint.origin, edge_cell, direction, len, kind)
                    else {
                        continue;
                    };

                    let mut candidates: Vec<&String> =
                        self.lexicon.candidates(kind, &fragment).iter().collect();
                    if candidates.is_empty() {
                        continue;
                    }
                    candidates.shuffle(rng);

                    for word in candidates {
                        let (start, step) = match kind {
                            FragmentKind::Prefix => {
                                (edge_cell.step(direction, 1 - len as i32), direction)
                            }
                            FragmentKind::Suffix => (
                                edge_cell.step(direction, (word.len() - len) as i32),
                                direction.reversed(),
                            ),
                        };

                        let placed = try_place_cross_chunk(
                            grid,
                            target,
                            hint.origin,
                            source,
                            word,
                            start,
                            step,
                        );
                        if placed {
                            return Some(Placement {
                                word: word.clone(),
                                start,
                                direction: step,
                                kind: PlacementKind::Stitched,
                            });
                        }
                    }
                }
            }
        }

        tracing::trace!(cx = target.cx, cy = target.cy, "No stitchable word found");
        None
    }
}

/// Cells of `origin` on the edge facing the neighbour in `direction`.
fn shared_edge(origin: ChunkCoord, direction: Direction) -> Vec<CellCoord> {
    let last = CHUNK_SIZE - 1;
    (0..CHUNK_SIZE)
        .map(|i| match (direction.dx, direction.dy) {
            (1, _) => origin.cell_at(last, i),
            (-1, _) => origin.cell_at(0, i),
            (_, 1) => origin.cell_at(i, last),
            _ => origin.cell_at(i, 0),
        })
        .collect()
}

/// Read the `len` letters ending at `edge_cell` along `direction`.
///
/// Every cell must belong to `origin`, exist, and not be used. In suffix
/// mode the letters are returned reversed, since the word runs against
/// `direction`.
fn read_fragment<S: CellSource + ?Sized>(
    source: &S,
    origin: ChunkCoord,
    edge_cell: CellCoord,
    direction: Direction,
    len: usize,
    kind: FragmentKind,
) -> Option<String> {
    let mut letters = Vec::with_capacity(len);
    for back in (0..len as i32).rev() {
        let coord = edge_cell.step(direction, -back);
        if coord.chunk() != origin {
            return None;
        }
        let cell = source.cell(coord)?;
        if cell.is_used() {
            return None;
        }
        letters.push(cell.letter());
    }
    if kind == FragmentKind::Suffix {
        letters.reverse();
    }
    Some(letters.into_iter().collect())
}

/// Validate and write a word whose path spans `origin` and `target`.
///
/// Cells in `origin` must already hold the exact letter; cells in `target`
/// must be unset or matching; a cell anywhere else rejects the attempt.
/// Only `grid` (the target chunk) is written, and only after the whole path
/// has been validated.
pub fn try_place_cross_chunk<S: CellSource + ?Sized>(
    grid: &mut LocalGrid,
    target: ChunkCoord,
    origin: ChunkCoord,
    source: &S,
    word: &str,
    start: CellCoord,
    step: Direction,
) -> bool {
    let path: Vec<(CellCoord, char)> = word
        .chars()
        .enumerate()
        .map(|(i, letter)| (start.step(step, i as i32), letter))
        .collect();

    for &(coord, letter) in &path {
        let chunk = coord.chunk();
        if chunk == origin {
            match source.cell(coord) {
                Some(cell) if cell.letter() == letter => {}
                _ => return false,
            }
        } else if chunk == target {
            let (lx, ly) = to_local_coords(coord);
            if let Some(existing) = grid.get(lx, ly) {
                if existing != letter {
                    return false;
                }
            }
        } else {
            return false;
        }
    }

    for (coord, letter) in path {
        if coord.chunk() == target {
            let (lx, ly) = to_local_coords(coord);
            grid.set(lx, ly, letter);
        }
    }
    true
}
