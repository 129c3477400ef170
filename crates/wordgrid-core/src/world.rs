use std::collections::HashMap;

use rand::Rng;

use crate::cell::Cell;
use crate::chunk::{to_local_coords, CellCoord, Chunk, ChunkCoord};
use crate::direction::Direction;
use crate::error::WordGridError;
use crate::generator::{CellSource, GeneratedChunk, GridGenerator, NeighborHint};

/// The sparse, unbounded map of generated chunks.
///
/// Chunks are only ever added whole. Once inserted, a chunk's letters are
/// fixed; the only mutation is [`WorldMap::mark_found`].
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Last chunk created, used to re-centre the camera after a reload.
    most_recent: Option<ChunkCoord>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Get the cell at the given global coordinate.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        let (lx, ly) = to_local_coords(coord);
        self.chunks.get(&coord.chunk())?.get(lx, ly)
    }

    /// Number of occupied chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Occupied chunk coordinates in a stable (sorted) order.
    pub fn occupied(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn most_recent_chunk(&self) -> Option<ChunkCoord> {
        self.most_recent
    }

    /// Unoccupied axis-aligned neighbours of `coord`, with the step leading to each.
    pub fn free_neighbors(&self, coord: ChunkCoord) -> Vec<(ChunkCoord, Direction)> {
        Direction::CARDINAL
            .iter()
            .map(|&direction| (coord.neighbor(direction), direction))
            .filter(|(neighbor, _)| !self.is_occupied(*neighbor))
            .collect()
    }

    /// Generate and insert the chunk at `coord`.
    ///
    /// Does nothing and returns `None` if the chunk already exists. A hint
    /// whose origin is missing or does not share an edge with `coord` in the
    /// stated direction is ignored, and the chunk is generated without
    /// stitching.
    pub fn create_chunk<R: Rng + ?Sized>(
        &mut self,
        coord: ChunkCoord,
        hint: Option<NeighborHint>,
        generator: &GridGenerator<'_>,
        rng: &mut R,
    ) -> Option<GeneratedChunk> {
        if self.is_occupied(coord) {
            return None;
        }

        let hint = hint.filter(|hint| {
            let usable = self.is_occupied(hint.origin)
                && hint.origin.direction_to(coord) == Some(hint.direction);
            if !usable {
                tracing::debug!(
                    ?hint,
                    cx = coord.cx,
                    cy = coord.cy,
                    "Ignoring unusable neighbor hint"
                );
            }
            usable
        });

        let generated = generator.generate(coord, hint, self, rng);
        self.chunks.insert(coord, Chunk::from_letters(&generated.letters));
        self.most_recent = Some(coord);

        tracing::info!(
            cx = coord.cx,
            cy = coord.cy,
            words = generated.placements.len(),
            "Created chunk"
        );
        Some(generated)
    }

    /// Mark the given cells as found and used. Irreversible.
    ///
    /// Returns how many of the coordinates referred to existing cells.
    pub fn mark_found(&mut self, cells: &[CellCoord]) -> usize {
        let mut marked = 0;
        for &coord in cells {
            let (lx, ly) = to_local_coords(coord);
            if let Some(cell) = self
                .chunks
                .get_mut(&coord.chunk())
                .and_then(|chunk| chunk.get_mut(lx, ly))
            {
                cell.mark_found();
                marked += 1;
            }
        }
        marked
    }

    /// Iterate over all chunks.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &Chunk)> {
        self.chunks.iter().map(|(coord, chunk)| (*coord, chunk))
    }

    /// Insert a chunk read back from a snapshot.
    pub(crate) fn insert_restored(
        &mut self,
        coord: ChunkCoord,
        chunk: Chunk,
    ) -> Result<(), WordGridError> {
        if self.chunks.insert(coord, chunk).is_some() {
            return Err(WordGridError::DuplicateChunk {
                cx: coord.cx,
                cy: coord.cy,
            });
        }
        Ok(())
    }

    pub(crate) fn set_most_recent(&mut self, coord: ChunkCoord) {
        self.most_recent = Some(coord);
    }
}

impl CellSource for WorldMap {
    fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        WorldMap::cell(self, coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::CHUNK_SIZE;
    use crate::lexicon::Lexicon;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lexicon() -> Lexicon {
        let words = ["HOUSE", "HORSE", "MOUSE", "GARDEN", "PLANET", "STONE", "TABLE"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        Lexicon::new(Some(words), None)
    }

    #[test]
    fn test_create_chunk_populates_all_cells() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut world = WorldMap::new();

        assert!(world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng).is_some());
        assert!(world.is_occupied(ChunkCoord::new(0, 0)));
        assert_eq!(world.most_recent_chunk(), Some(ChunkCoord::new(0, 0)));

        for gx in 0..CHUNK_SIZE {
            for gy in 0..CHUNK_SIZE {
                let cell = world.cell(CellCoord::new(gx, gy)).unwrap();
                assert!(cell.letter().is_ascii_uppercase());
                assert!(!cell.is_found());
            }
        }
        assert!(world.cell(CellCoord::new(10, 0)).is_none());
        assert!(world.cell(CellCoord::new(-1, 0)).is_none());
    }

    #[test]
    fn test_create_chunk_is_noop_when_occupied() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut world = WorldMap::new();

        world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng);
        let before = world.chunk(ChunkCoord::new(0, 0)).cloned();
        world.create_chunk(ChunkCoord::new(1, 0), None, &generator, &mut rng);

        assert!(world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng).is_none());
        assert_eq!(world.chunk(ChunkCoord::new(0, 0)).cloned(), before);
        assert_eq!(world.len(), 2);
        assert_eq!(world.most_recent_chunk(), Some(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn test_stitching_never_mutates_neighbor() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);

        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut world = WorldMap::new();
            let origin = ChunkCoord::new(0, 0);
            world.create_chunk(origin, None, &generator, &mut rng);
            let before = world.chunk(origin).cloned();

            for direction in Direction::CARDINAL {
                let hint = NeighborHint { origin, direction };
                let target = origin.neighbor(direction);
                let generated = world
                    .create_chunk(target, Some(hint), &generator, &mut rng)
                    .unwrap();

                for placement in &generated.placements {
                    let read: String = placement
                        .cells()
                        .map(|c| world.cell(c).map(Cell::letter).unwrap_or('?'))
                        .collect();
                    assert_eq!(read, placement.word);
                }
            }
            assert_eq!(world.chunk(origin).cloned(), before);
        }
    }

    #[test]
    fn test_unusable_hint_is_ignored() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut world = WorldMap::new();

        let hint = NeighborHint {
            origin: ChunkCoord::new(5, 5),
            direction: Direction::RIGHT,
        };
        let generated = world
            .create_chunk(ChunkCoord::new(0, 0), Some(hint), &generator, &mut rng)
            .unwrap();
        assert!(generated
            .placements
            .iter()
            .all(|p| p.kind != crate::generator::PlacementKind::Stitched));
    }

    #[test]
    fn test_diagonal_hint_is_ignored() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut world = WorldMap::new();
            world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng);

            let hint = NeighborHint {
                origin: ChunkCoord::new(0, 0),
                direction: Direction::DOWN_RIGHT,
            };
            let generated = world
                .create_chunk(ChunkCoord::new(1, 1), Some(hint), &generator, &mut rng)
                .unwrap();
            assert!(
                generated
                    .placements
                    .iter()
                    .all(|p| p.kind != crate::generator::PlacementKind::Stitched),
                "seed {} stitched from a corner neighbour",
                seed
            );
        }
    }

    /// The chunk side an edge seed points out of, if its last cell is on that side.
    fn seed_side(seed: &crate::generator::EdgeSeed) -> Option<Direction> {
        let reach = seed.fragment.len() as i32 - 1;
        let end_x = seed.x + seed.direction.dx * reach;
        let end_y = seed.y + seed.direction.dy * reach;
        let last = CHUNK_SIZE - 1;
        Direction::CARDINAL.into_iter().find(|side| match (side.dx, side.dy) {
            (1, _) => seed.direction.dx == 1 && end_x == last,
            (-1, _) => seed.direction.dx == -1 && end_x == 0,
            (_, 1) => seed.direction.dy == 1 && end_y == last,
            _ => seed.direction.dy == -1 && end_y == 0,
        })
    }

    #[test]
    fn test_edge_seed_is_continued_by_neighbor() {
        use crate::generator::{GeneratorConfig, PlacementKind};

        let lexicon = Lexicon::new(Some(vec!["HOUSE".to_string()]), None);
        let config = GeneratorConfig {
            single_letter_stitch_chance: 0.0,
            ..GeneratorConfig::default()
        };
        let generator = GridGenerator::with_config(&lexicon, config);
        let origin = ChunkCoord::new(0, 0);

        let mut continued = 0;
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut world = WorldMap::new();
            let first = world.create_chunk(origin, None, &generator, &mut rng).unwrap();

            for edge_seed in &first.seeds {
                let Some(side) = seed_side(edge_seed) else {
                    continue;
                };
                let target = origin.neighbor(side);
                if world.is_occupied(target) {
                    continue;
                }
                let hint = NeighborHint {
                    origin,
                    direction: side,
                };
                let generated = world
                    .create_chunk(target, Some(hint), &generator, &mut rng)
                    .unwrap();

                let seed_cells: Vec<CellCoord> = (0..edge_seed.fragment.len() as i32)
                    .map(|i| {
                        origin.cell_at(
                            edge_seed.x + edge_seed.direction.dx * i,
                            edge_seed.y + edge_seed.direction.dy * i,
                        )
                    })
                    .collect();
                let through_seed = generated.placements.iter().any(|p| {
                    p.kind == PlacementKind::Stitched
                        && seed_cells.iter().all(|c| p.cells().any(|pc| pc == *c))
                });
                if through_seed {
                    continued += 1;
                }
            }
        }
        assert!(continued > 0, "no stitched word ever ran through an edge seed");
    }

    #[test]
    fn test_mark_found_and_free_neighbors() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut world = WorldMap::new();
        world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng);
        world.create_chunk(ChunkCoord::new(0, -1), None, &generator, &mut rng);

        let cells = [CellCoord::new(0, 0), CellCoord::new(1, 0), CellCoord::new(50, 50)];
        assert_eq!(world.mark_found(&cells), 2);
        assert!(world.cell(CellCoord::new(0, 0)).unwrap().is_used());
        assert!(world.cell(CellCoord::new(1, 0)).unwrap().is_found());
        assert!(!world.cell(CellCoord::new(2, 0)).unwrap().is_found());

        let free: Vec<ChunkCoord> = world
            .free_neighbors(ChunkCoord::new(0, 0))
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(free.len(), 3);
        assert!(!free.contains(&ChunkCoord::new(0, -1)));
        assert_eq!(world.occupied(), vec![ChunkCoord::new(0, -1), ChunkCoord::new(0, 0)]);
    }
}
