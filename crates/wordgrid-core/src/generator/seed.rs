//! Seeding word fragments against the chunk edges.
//!
//! A seed is a 2- or 3-letter prefix or suffix written into unset cells so
//! that its last cell sits on the chunk boundary and the run points outward.
//! When a neighbour is later generated from this chunk, stitching reads the
//! same run back off the edge and can extend it into a full word.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{GridGenerator, LocalGrid};
use crate::chunk::{in_local_bounds, CHUNK_SIZE};
use crate::direction::Direction;
use crate::lexicon::FragmentKind;

/// A fragment written near the chunk boundary (local coordinates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSeed {
    pub fragment: String,
    pub kind: FragmentKind,
    /// Local x of the innermost letter.
    pub x: i32,
    /// Local y of the innermost letter.
    pub y: i32,
    /// Outward direction the letters are written in.
    pub direction: Direction,
}

impl<'a> GridGenerator<'a> {
    pub(crate) fn seed_edges<R: Rng + ?Sized>(
        &self,
        grid: &mut LocalGrid,
        rng: &mut R,
    ) -> Vec<EdgeSeed> {
        let mut seeds = Vec::new();
        for _ in 0..self.config.edge_seeds {
            let kind = if rng.gen_bool(0.5) {
                FragmentKind::Prefix
            } else {
                FragmentKind::Suffix
            };
            let len = if rng.gen_bool(0.5) { 2 } else { 3 };

            let Some(fragment) = self
                .lexicon
                .fragments(kind, len)
                .and_then(|index| index.random_fragment(rng))
            else {
                continue;
            };

            if let Some(seed) = seed_fragment(grid, fragment, kind, rng) {
                tracing::debug!(fragment = %seed.fragment, ?kind, "Seeded edge fragment");
                seeds.push(seed);
            }
        }
        seeds
    }
}

/// Boundary cells paired with the direction pointing out of the chunk.
fn boundary_cells() -> Vec<(i32, i32, Direction)> {
    let last = CHUNK_SIZE - 1;
    let mut cells = Vec::with_capacity(4 * CHUNK_SIZE as usize);
    for i in 0..CHUNK_SIZE {
        cells.push((i, 0, Direction::UP));
        cells.push((i, last, Direction::DOWN));
        cells.push((0, i, Direction::LEFT));
        cells.push((last, i, Direction::RIGHT));
    }
    cells
}

/// Write `fragment` so that it ends on the boundary, pointing outward.
///
/// Prefixes are written in reading order; suffixes reversed, so that reading
/// the run outward and reversing it yields the suffix.
fn seed_fragment<R: Rng + ?Sized>(
    grid: &mut LocalGrid,
    fragment: &str,
    kind: FragmentKind,
    rng: &mut R,
) -> Option<EdgeSeed> {
    let letters: Vec<char> = match kind {
        FragmentKind::Prefix => fragment.chars().collect(),
        FragmentKind::Suffix => fragment.chars().rev().collect(),
    };
    let reach = letters.len() as i32 - 1;

    let mut positions = boundary_cells();
    positions.shuffle(rng);

    for (end_x, end_y, outward) in positions {
        let mut directions = outward.with_diagonals();
        directions.shuffle(rng);

        for direction in directions {
            let x = end_x - direction.dx * reach;
            let y = end_y - direction.dy * reach;
            let fits = (0..=reach).all(|i| {
                let (lx, ly) = (x + direction.dx * i, y + direction.dy * i);
                in_local_bounds(lx, ly) && grid.is_empty_at(lx, ly)
            });
            if !fits {
                continue;
            }

            grid.write(&letters, x, y, direction);
            return Some(EdgeSeed {
                fragment: fragment.to_string(),
                kind,
                x,
                y,
                direction,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn on_boundary(x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == CHUNK_SIZE - 1 || y == CHUNK_SIZE - 1
    }

    #[test]
    fn test_boundary_cells_cover_every_edge() {
        let cells = boundary_cells();
        assert_eq!(cells.len(), 40);
        assert!(cells.iter().all(|&(x, y, _)| on_boundary(x, y)));
        assert!(cells.contains(&(9, 4, Direction::RIGHT)));
        assert!(cells.contains(&(3, 0, Direction::UP)));
    }

    #[test]
    fn test_prefix_seed_ends_on_boundary() {
        let mut grid = LocalGrid::new();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let seed = seed_fragment(&mut grid, "HOU", FragmentKind::Prefix, &mut rng).unwrap();

        let end_x = seed.x + seed.direction.dx * 2;
        let end_y = seed.y + seed.direction.dy * 2;
        assert!(on_boundary(end_x, end_y));
        assert!(!in_local_bounds(end_x + seed.direction.dx, end_y + seed.direction.dy));

        let read: String = (0..3)
            .filter_map(|i| {
                grid.get(seed.x + seed.direction.dx * i, seed.y + seed.direction.dy * i)
            })
            .collect();
        assert_eq!(read, "HOU");
    }

    #[test]
    fn test_suffix_seed_is_written_reversed() {
        let mut grid = LocalGrid::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let seed = seed_fragment(&mut grid, "ES", FragmentKind::Suffix, &mut rng).unwrap();

        assert_eq!(grid.get(seed.x, seed.y), Some('S'));
        assert_eq!(
            grid.get(seed.x + seed.direction.dx, seed.y + seed.direction.dy),
            Some('E')
        );
    }

    #[test]
    fn test_seed_only_uses_empty_cells() {
        let mut grid = LocalGrid::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                if x != 5 && y != 5 {
                    grid.set(x, y, 'Z');
                }
            }
        }
        // Only the cross through the middle is free; (5,0)/(5,1) and the like qualify.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let seed = seed_fragment(&mut grid, "AB", FragmentKind::Prefix, &mut rng).unwrap();
        assert!(seed.direction.is_cardinal());
        assert_eq!(grid.filled(), 100 - 19 + 2);

        let mut full = LocalGrid::new();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                full.set(x, y, 'Z');
            }
        }
        assert!(seed_fragment(&mut full, "AB", FragmentKind::Prefix, &mut rng).is_none());
    }

    #[test]
    fn test_seed_edges_uses_lexicon_fragments() {
        let lexicon = Lexicon::new(Some(vec!["HOUSE".to_string()]), None);
        let generator = GridGenerator::new(&lexicon);
        let mut grid = LocalGrid::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let seeds = generator.seed_edges(&mut grid, &mut rng);
        assert_eq!(seeds.len(), 2);
        for seed in &seeds {
            let expected = match (seed.kind, seed.fragment.len()) {
                (FragmentKind::Prefix, 2) => "HO",
                (FragmentKind::Prefix, 3) => "HOU",
                (FragmentKind::Suffix, 2) => "SE",
                (FragmentKind::Suffix, 3) => "USE",
                _ => unreachable!(),
            };
            assert_eq!(seed.fragment, expected);
        }
    }
}
