//! Procedural letter generation for a single chunk.
//!
//! A chunk is filled in five best-effort passes, none of which can fail the
//! whole generation:
//! 1. stitching a word across the edge shared with an existing neighbour
//!    ([`stitch`]), when the chunk is created from one;
//! 2. embedding a handful of placement words in random directions;
//! 3. embedding one bonus word from the obscure pool;
//! 4. seeding prefix/suffix fragments against the chunk edges so that future
//!    neighbours have something to stitch onto ([`seed`]);
//! 5. filling whatever is left with uniformly random letters.

pub mod seed;
pub mod stitch;

use rand::Rng;

use crate::cell::{Cell, ALPHABET};
use crate::chunk::{in_local_bounds, local_index, CellCoord, ChunkCoord, CHUNK_AREA, CHUNK_SIZE};
use crate::direction::Direction;
use crate::lexicon::Lexicon;

pub use seed::EdgeSeed;

/// Read access to cells that already exist in the world.
///
/// The generator only ever reads through this trait, so cells of existing
/// chunks cannot be modified while a new chunk is built.
pub trait CellSource {
    fn cell(&self, coord: CellCoord) -> Option<&Cell>;
}

/// Tunables for chunk generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Interior words always attempted.
    pub min_words: usize,
    /// Up to this many extra interior words (exclusive upper bound of a random draw).
    pub extra_words: usize,
    /// Random (direction, start) tries per interior or bonus word.
    pub word_attempts: usize,
    /// Bonus words drawn before giving up.
    pub bonus_attempts: usize,
    /// Fragments seeded against the chunk edges.
    pub edge_seeds: usize,
    /// Probability of also trying a single-letter fragment when stitching.
    pub single_letter_stitch_chance: f64,
    /// Extra interior draws allowed while no word has been placed yet.
    pub max_extra_draws: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_words: 3,
            extra_words: 3,
            word_attempts: 50,
            bonus_attempts: 10,
            edge_seeds: 2,
            single_letter_stitch_chance: 0.3,
            max_extra_draws: 64,
        }
    }
}

/// Describes the already-generated chunk a new chunk grows out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborHint {
    /// The existing chunk.
    pub origin: ChunkCoord,
    /// Cardinal step from `origin` to the chunk being generated.
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// Continues a fragment found on a neighbour's edge.
    Stitched,
    Interior,
    Bonus,
}

/// A word written into a chunk, recorded in global coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: CellCoord,
    pub direction: Direction,
    pub kind: PlacementKind,
}

impl Placement {
    /// The cells covered by the word, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.word.len() as i32).map(move |i| self.start.step(self.direction, i))
    }
}

/// Output of [`GridGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedChunk {
    pub coord: ChunkCoord,
    /// Letters in row-major local order.
    pub letters: [char; CHUNK_AREA],
    pub placements: Vec<Placement>,
    pub seeds: Vec<EdgeSeed>,
}

/// Working letters for the chunk under construction; `None` is unset.
#[derive(Debug, Clone)]
pub struct LocalGrid {
    slots: [Option<char>; CHUNK_AREA],
}

impl Default for LocalGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalGrid {
    pub fn new() -> Self {
        Self {
            slots: [None; CHUNK_AREA],
        }
    }

    pub fn get(&self, local_x: i32, local_y: i32) -> Option<char> {
        if !in_local_bounds(local_x, local_y) {
            return None;
        }
        self.slots[local_index(local_x, local_y)]
    }

    pub fn is_empty_at(&self, local_x: i32, local_y: i32) -> bool {
        in_local_bounds(local_x, local_y) && self.slots[local_index(local_x, local_y)].is_none()
    }

    pub fn set(&mut self, local_x: i32, local_y: i32, letter: char) {
        if in_local_bounds(local_x, local_y) {
            self.slots[local_index(local_x, local_y)] = Some(letter);
        }
    }

    /// Whether `word` fits starting at the local position along `direction`.
    ///
    /// Every covered cell must lie inside the chunk and be either unset or
    /// already hold the required letter.
    pub fn can_place(&self, word: &[char], x: i32, y: i32, direction: Direction) -> bool {
        word.iter().enumerate().all(|(i, &letter)| {
            let lx = x + direction.dx * i as i32;
            let ly = y + direction.dy * i as i32;
            in_local_bounds(lx, ly)
                && match self.slots[local_index(lx, ly)] {
                    None => true,
                    Some(existing) => existing == letter,
                }
        })
    }

    fn write(&mut self, word: &[char], x: i32, y: i32, direction: Direction) {
        for (i, &letter) in word.iter().enumerate() {
            self.set(x + direction.dx * i as i32, y + direction.dy * i as i32, letter);
        }
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Replace every unset slot with a uniformly random letter.
    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R) -> [char; CHUNK_AREA] {
        std::array::from_fn(|i| {
            self.slots[i].unwrap_or_else(|| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        })
    }
}

/// Fills new chunks with letters.
#[derive(Debug, Clone)]
pub struct GridGenerator<'a> {
    lexicon: &'a Lexicon,
    config: GeneratorConfig,
}

impl<'a> GridGenerator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_config(lexicon, GeneratorConfig::default())
    }

    pub fn with_config(lexicon: &'a Lexicon, config: GeneratorConfig) -> Self {
        Self { lexicon, config }
    }

    /// Generate the letters for the chunk at `coord`.
    ///
    /// `hint` names an existing neighbour to stitch a word from; `source`
    /// provides read-only access to that neighbour's cells.
    pub fn generate<S, R>(
        &self,
        coord: ChunkCoord,
        hint: Option<NeighborHint>,
        source: &S,
        rng: &mut R,
    ) -> GeneratedChunk
    where
        S: CellSource + ?Sized,
        R: Rng + ?Sized,
    {
        let mut grid = LocalGrid::new();
        let mut placements = Vec::new();

        if let Some(hint) = hint {
            if let Some(placement) = self.stitch(&mut grid, coord, hint, source, rng) {
                tracing::debug!(
                    word = %placement.word,
                    cx = coord.cx,
                    cy = coord.cy,
                    "Stitched word across chunk edge"
                );
                placements.push(placement);
            }
        }

        self.place_interior_words(&mut grid, coord, rng, &mut placements);

        if let Some(placement) = self.place_bonus_word(&mut grid, coord, rng) {
            tracing::debug!(word = %placement.word, "Placed bonus word");
            placements.push(placement);
        }

        let seeds = self.seed_edges(&mut grid, rng);
        let letters = grid.fill(rng);

        GeneratedChunk {
            coord,
            letters,
            placements,
            seeds,
        }
    }

    fn place_interior_words<R: Rng + ?Sized>(
        &self,
        grid: &mut LocalGrid,
        coord: ChunkCoord,
        rng: &mut R,
        placements: &mut Vec<Placement>,
    ) {
        let words = self.lexicon.placement_words();
        if words.is_empty() {
            return;
        }

        let extra = if self.config.extra_words == 0 {
            0
        } else {
            rng.gen_range(0..self.config.extra_words)
        };
        let target = self.config.min_words + extra;
        let max_draws = target + self.config.max_extra_draws;

        let mut placed = 0;
        let mut drawn = 0;
        while drawn < target || (placed == 0 && drawn < max_draws) {
            drawn += 1;
            let word = &words[rng.gen_range(0..words.len())];
            let placement = self.place_word(grid, coord, word, PlacementKind::Interior, rng);
            if let Some(placement) = placement {
                placed += 1;
                placements.push(placement);
            }
        }
        tracing::debug!(placed, drawn, "Placed interior words");
    }

    fn place_bonus_word<R: Rng + ?Sized>(
        &self,
        grid: &mut LocalGrid,
        coord: ChunkCoord,
        rng: &mut R,
    ) -> Option<Placement> {
        let words = self.lexicon.obscure_words();
        if words.is_empty() {
            return None;
        }
        (0..self.config.bonus_attempts).find_map(|_| {
            let word = &words[rng.gen_range(0..words.len())];
            self.place_word(grid, coord, word, PlacementKind::Bonus, rng)
        })
    }

    /// Try random (direction, start) pairs until `word` fits.
    fn place_word<R: Rng + ?Sized>(
        &self,
        grid: &mut LocalGrid,
        coord: ChunkCoord,
        word: &str,
        kind: PlacementKind,
        rng: &mut R,
    ) -> Option<Placement> {
        let letters: Vec<char> = word.chars().collect();
        for _ in 0..self.config.word_attempts {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            let x = rng.gen_range(0..CHUNK_SIZE);
            let y = rng.gen_range(0..CHUNK_SIZE);

            if grid.can_place(&letters, x, y, direction) {
                grid.write(&letters, x, y, direction);
                return Some(Placement {
                    word: word.to_string(),
                    start: coord.cell_at(x, y),
                    direction,
                    kind,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::to_local_coords;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    struct NoCells;

    impl CellSource for NoCells {
        fn cell(&self, _coord: CellCoord) -> Option<&Cell> {
            None
        }
    }

    fn lexicon() -> Lexicon {
        let placement = ["APPLE", "BRAIN", "CHAIR", "DANCE", "EAGLE", "GARDEN", "KITCHEN"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let validation = ["APPLE", "BRAIN", "QUIXOTIC", "ZYMURGY", "JUKEBOX"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        Lexicon::new(Some(placement), Some(validation))
    }

    fn letter_at(generated: &GeneratedChunk, cell: CellCoord) -> char {
        assert_eq!(cell.chunk(), generated.coord);
        let (lx, ly) = to_local_coords(cell);
        generated.letters[local_index(lx, ly)]
    }

    #[test]
    fn test_can_place_rules() {
        let mut grid = LocalGrid::new();
        let word: Vec<char> = "APPLE".chars().collect();

        assert!(grid.can_place(&word, 0, 0, Direction::RIGHT));
        assert!(grid.can_place(&word, 5, 0, Direction::RIGHT));
        assert!(!grid.can_place(&word, 6, 0, Direction::RIGHT));
        assert!(!grid.can_place(&word, 0, 0, Direction::UP));
        assert!(grid.can_place(&word, 9, 9, Direction::UP_LEFT));

        grid.set(2, 0, 'P');
        assert!(grid.can_place(&word, 0, 0, Direction::RIGHT));
        grid.set(3, 0, 'X');
        assert!(!grid.can_place(&word, 0, 0, Direction::RIGHT));
    }

    #[test]
    fn test_every_cell_is_an_uppercase_letter() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generated = generator.generate(ChunkCoord::new(0, 0), None, &NoCells, &mut rng);
            assert!(generated.letters.iter().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_placements_read_back_from_letters() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let coord = ChunkCoord::new(-3, 2);
            let generated = generator.generate(coord, None, &NoCells, &mut rng);

            let interior: Vec<_> = generated
                .placements
                .iter()
                .filter(|p| p.kind == PlacementKind::Interior)
                .collect();
            assert!(!interior.is_empty(), "seed {} placed no interior word", seed);

            for placement in &generated.placements {
                let read: String = placement.cells().map(|c| letter_at(&generated, c)).collect();
                assert_eq!(read, placement.word);
            }
        }
    }

    #[test]
    fn test_interior_word_count_bounds() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generated = generator.generate(ChunkCoord::new(0, 0), None, &NoCells, &mut rng);
            let interior = generated
                .placements
                .iter()
                .filter(|p| p.kind == PlacementKind::Interior)
                .count();
            assert!(interior <= 5);
            let bonus = generated
                .placements
                .iter()
                .filter(|p| p.kind == PlacementKind::Bonus)
                .count();
            assert!(bonus <= 1);
        }
    }

    #[test]
    fn test_at_least_one_word_even_with_zero_target() {
        let lexicon = lexicon();
        let config = GeneratorConfig {
            min_words: 0,
            extra_words: 0,
            ..GeneratorConfig::default()
        };
        let generator = GridGenerator::with_config(&lexicon, config);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let generated = generator.generate(ChunkCoord::new(0, 0), None, &NoCells, &mut rng);
        let interior = generated
            .placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Interior)
            .count();
        assert_eq!(interior, 1);
    }

    #[test]
    fn test_generation_is_reproducible_for_a_seed() {
        let lexicon = lexicon();
        let generator = GridGenerator::new(&lexicon);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let first = generator.generate(ChunkCoord::new(1, 1), None, &NoCells, &mut a);
        let second = generator.generate(ChunkCoord::new(1, 1), None, &NoCells, &mut b);
        assert_eq!(first.letters, second.letters);
        assert_eq!(first.placements, second.placements);
    }

    #[test]
    fn test_fill_keeps_set_letters() {
        let mut grid = LocalGrid::new();
        grid.set(4, 4, 'W');
        assert_eq!(grid.filled(), 1);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let letters = grid.fill(&mut rng);
        assert_eq!(letters[local_index(4, 4)], 'W');

        let mut counts: HashMap<char, usize> = HashMap::new();
        for letter in letters {
            *counts.entry(letter).or_default() += 1;
        }
        assert!(counts.keys().all(|c| c.is_ascii_uppercase()));
    }
}
