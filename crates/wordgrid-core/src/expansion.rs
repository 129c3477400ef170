//! Picking where the world grows next after a word is found.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::generator::{GeneratedChunk, GridGenerator, NeighborHint};
use crate::world::WorldMap;

/// Choose a free chunk next to a random occupied chunk.
///
/// Occupied chunks are visited in a uniformly shuffled order and the first
/// one with at least one free axis-aligned neighbour wins; that neighbour is
/// picked uniformly among its free ones. Returns `None` when the world is
/// empty or no occupied chunk has a free neighbour.
pub fn plan_expansion<R: Rng + ?Sized>(world: &WorldMap, rng: &mut R) -> Option<NeighborHint> {
    let mut sources = world.occupied();
    sources.shuffle(rng);

    sources.into_iter().find_map(|origin| {
        let free = world.free_neighbors(origin);
        free.choose(rng)
            .map(|&(_, direction)| NeighborHint { origin, direction })
    })
}

/// Grow the world by one chunk, stitched from its origin.
pub fn expand_world<R: Rng + ?Sized>(
    world: &mut WorldMap,
    generator: &GridGenerator<'_>,
    rng: &mut R,
) -> Option<GeneratedChunk> {
    let Some(hint) = plan_expansion(world, rng) else {
        tracing::warn!(chunks = world.len(), "No free chunk to expand into");
        return None;
    };
    let target = hint.origin.neighbor(hint.direction);
    world.create_chunk(target, Some(hint), generator, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkCoord;
    use crate::lexicon::Lexicon;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lexicon() -> Lexicon {
        Lexicon::new(Some(vec!["HOUSE".to_string(), "STONE".to_string()]), None)
    }

    #[test]
    fn test_empty_world_has_no_expansion() {
        let world = WorldMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(plan_expansion(&world, &mut rng).is_none());
    }

    #[test]
    fn test_expansion_targets_a_free_neighbor() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut world = WorldMap::new();
        world.create_chunk(ChunkCoord::new(0, 0), None, &generator, &mut rng);

        for _ in 0..12 {
            let before = world.len();
            let generated = expand_world(&mut world, &generator, &mut rng).unwrap();
            assert_eq!(world.len(), before + 1);

            let coord = generated.coord;
            let touches_existing = crate::direction::Direction::CARDINAL
                .iter()
                .any(|&d| world.is_occupied(coord.neighbor(d)));
            assert!(touches_existing);
        }
    }

    #[test]
    fn test_surrounded_chunk_is_never_duplicated() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut world = WorldMap::new();

        // A plus shape: the centre has no free neighbour, the arms do.
        for coord in [
            ChunkCoord::new(0, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(0, 1),
            ChunkCoord::new(0, -1),
        ] {
            world.create_chunk(coord, None, &generator, &mut rng);
        }

        for _ in 0..50 {
            let hint = plan_expansion(&world, &mut rng).unwrap();
            assert_ne!(hint.origin, ChunkCoord::new(0, 0));
            assert!(!world.is_occupied(hint.origin.neighbor(hint.direction)));
        }
    }
}
