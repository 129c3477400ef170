use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::camera::Camera;
use crate::chunk::{CellCoord, ChunkCoord};
use crate::error::WordGridError;
use crate::expansion::expand_world;
use crate::generator::{GeneratedChunk, GeneratorConfig, GridGenerator, NeighborHint};
use crate::lexicon::Lexicon;
use crate::score::Score;
use crate::selection::{submit_selection, DragSelection, WordCheck};
use crate::snapshot::Snapshot;
use crate::world::WorldMap;

/// What a submitted selection did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub check: WordCheck,
    /// The chunk the world grew into, if the word was accepted.
    pub expanded: Option<ChunkCoord>,
}

/// One independent world with its own score, camera and randomness.
///
/// The normal game and a speed round are two separate sessions sharing
/// only the lexicon.
#[derive(Debug, Clone)]
pub struct Session {
    lexicon: Arc<Lexicon>,
    config: GeneratorConfig,
    world: WorldMap,
    score: Score,
    camera: Camera,
    drag: DragSelection,
    auto_pan: bool,
    rng: ChaCha8Rng,
}

impl Session {
    /// Start a fresh world holding only chunk (0,0).
    pub fn new(lexicon: Arc<Lexicon>, seed: u64) -> Self {
        Self::with_config(lexicon, GeneratorConfig::default(), seed)
    }

    pub fn with_config(lexicon: Arc<Lexicon>, config: GeneratorConfig, seed: u64) -> Self {
        let mut session = Self::empty(lexicon, config, WorldMap::new(), seed);
        session.create_chunk(ChunkCoord::new(0, 0), None);
        session
    }

    /// Rebuild a session from a snapshot, re-centring on the newest chunk.
    pub fn restore(
        lexicon: Arc<Lexicon>,
        snapshot: &Snapshot,
        seed: u64,
    ) -> Result<Self, WordGridError> {
        let world = snapshot.to_world()?;
        let mut session = Self::empty(lexicon, GeneratorConfig::default(), world, seed);
        session.score = snapshot.score();
        session.camera = Camera::new(snapshot.pan_x, snapshot.pan_y, snapshot.scale);
        if let Some(recent) = session.world.most_recent_chunk() {
            session.camera.pan_to_chunk(recent);
        }
        Ok(session)
    }

    fn empty(lexicon: Arc<Lexicon>, config: GeneratorConfig, world: WorldMap, seed: u64) -> Self {
        Self {
            lexicon,
            config,
            world,
            score: Score::default(),
            camera: Camera::default(),
            drag: DragSelection::new(),
            auto_pan: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn drag(&self) -> &DragSelection {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragSelection {
        &mut self.drag
    }

    /// Whether the camera follows newly added chunks.
    pub fn set_auto_pan(&mut self, auto_pan: bool) {
        self.auto_pan = auto_pan;
    }

    /// Create a chunk, optionally stitched from a neighbour. No-op if occupied.
    pub fn create_chunk(
        &mut self,
        coord: ChunkCoord,
        hint: Option<NeighborHint>,
    ) -> Option<GeneratedChunk> {
        let generator = GridGenerator::with_config(&self.lexicon, self.config.clone());
        self.world.create_chunk(coord, hint, &generator, &mut self.rng)
    }

    /// Judge the selection from `start` to `end`; on acceptance score it and
    /// grow the world by one chunk.
    pub fn submit(&mut self, start: CellCoord, end: CellCoord) -> SelectionResult {
        let check = submit_selection(&mut self.world, &self.lexicon, start, end);

        let mut expanded = None;
        if let WordCheck::Accepted { word, .. } = &check {
            self.score.record(word);

            let generator = GridGenerator::with_config(&self.lexicon, self.config.clone());
            expanded = expand_world(&mut self.world, &generator, &mut self.rng)
                .map(|generated| generated.coord);
            if let (Some(coord), true) = (expanded, self.auto_pan) {
                self.camera.pan_to_chunk(coord);
            }
        }

        SelectionResult { check, expanded }
    }

    /// Submit the drag currently in progress, if any.
    pub fn finish_drag(&mut self) -> Option<SelectionResult> {
        let (start, end) = self.drag.finish()?;
        Some(self.submit(start, end))
    }

    /// Snapshot of world, score and camera. Speed totals are added by the caller.
    pub fn capture(&self, saved_at: u64) -> Snapshot {
        let (pan_x, pan_y) = self.camera.pan();
        Snapshot::capture(&self.world, saved_at)
            .with_score(self.score)
            .with_camera(pan_x, pan_y, self.camera.scale())
    }
}
