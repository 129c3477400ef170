//! Versioned JSON snapshots of a game.
//!
//! The document keeps the camelCase layout browsers already have stored:
//!
//! ```json
//! { "version": 1, "savedAt": 0,
//!   "score": { "foundWordsCount": 0, "foundLettersCount": 0 },
//!   "totalSpeedScore": 0, "maxSpeedScore": 0,
//!   "mostRecentChunk": { "cx": 0, "cy": 0 },
//!   "panX": -200, "panY": -200, "scale": 1,
//!   "chunks": [ { "cx": 0, "cy": 0,
//!                 "cells": [ { "letter": "A", "found": false, "used": false } ] } ] }
//! ```
//!
//! Every field except `chunks` may be missing; score and camera then default to
//! zero and identity.

use serde::{Deserialize, Serialize};

use crate::cell::{is_grid_letter, Cell};
use crate::chunk::{Chunk, ChunkCoord, CHUNK_AREA};
use crate::error::WordGridError;
use crate::score::{Score, SpeedTotals};
use crate::world::WorldMap;

pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    #[serde(default)]
    pub found_words_count: u32,
    #[serde(default)]
    pub found_letters_count: u32,
}

impl From<Score> for ScoreSnapshot {
    fn from(score: Score) -> Self {
        Self {
            found_words_count: score.found_words,
            found_letters_count: score.found_letters,
        }
    }
}

impl From<ScoreSnapshot> for Score {
    fn from(snapshot: ScoreSnapshot) -> Self {
        Score::new(snapshot.found_words_count, snapshot.found_letters_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub letter: char,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSnapshot {
    pub cx: i32,
    pub cy: i32,
    /// Row-major local order.
    pub cells: Vec<CellSnapshot>,
}

impl ChunkSnapshot {
    fn capture(coord: ChunkCoord, chunk: &Chunk) -> Self {
        Self {
            cx: coord.cx,
            cy: coord.cy,
            cells: chunk
                .cells()
                .iter()
                .map(|cell| CellSnapshot {
                    letter: cell.letter(),
                    found: cell.is_found(),
                    used: cell.is_used(),
                })
                .collect(),
        }
    }

    fn restore(&self) -> Result<(ChunkCoord, Chunk), WordGridError> {
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                if is_grid_letter(cell.letter) {
                    Ok(Cell::restored(cell.letter, cell.found, cell.used))
                } else {
                    Err(WordGridError::InvalidLetter(cell.letter.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let found = cells.len();
        let chunk = Chunk::from_cells(cells).ok_or(WordGridError::CellCount {
            cx: self.cx,
            cy: self.cy,
            found,
            expected: CHUNK_AREA,
        })?;
        Ok((ChunkCoord::new(self.cx, self.cy), chunk))
    }
}

/// A whole saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Milliseconds since the Unix epoch, supplied by the caller.
    #[serde(default)]
    pub saved_at: u64,
    #[serde(default)]
    pub score: ScoreSnapshot,
    #[serde(default)]
    pub total_speed_score: u32,
    #[serde(default)]
    pub max_speed_score: u32,
    #[serde(default)]
    pub most_recent_chunk: Option<ChunkCoord>,
    #[serde(default)]
    pub pan_x: f64,
    #[serde(default)]
    pub pan_y: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub chunks: Vec<ChunkSnapshot>,
}

impl Snapshot {
    /// Capture `world` with empty score and identity camera; callers fill in the rest.
    pub fn capture(world: &WorldMap, saved_at: u64) -> Self {
        let chunks = world
            .occupied()
            .into_iter()
            .filter_map(|coord| {
                world
                    .chunk(coord)
                    .map(|chunk| ChunkSnapshot::capture(coord, chunk))
            })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            score: ScoreSnapshot::default(),
            total_speed_score: 0,
            max_speed_score: 0,
            most_recent_chunk: world.most_recent_chunk(),
            pan_x: 0.0,
            pan_y: 0.0,
            scale: default_scale(),
            chunks,
        }
    }

    pub fn with_score(mut self, score: Score) -> Self {
        self.score = score.into();
        self
    }

    pub fn with_speed_totals(mut self, totals: SpeedTotals) -> Self {
        self.total_speed_score = totals.total;
        self.max_speed_score = totals.best;
        self
    }

    pub fn with_camera(mut self, pan_x: f64, pan_y: f64, scale: f64) -> Self {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self.scale = scale;
        self
    }

    pub fn to_json(&self) -> Result<String, WordGridError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WordGridError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(WordGridError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Rebuild the world exactly, including found/used flags.
    ///
    /// A missing `mostRecentChunk` is taken to be the origin chunk.
    pub fn to_world(&self) -> Result<WorldMap, WordGridError> {
        if self.chunks.is_empty() {
            return Err(WordGridError::EmptySnapshot);
        }

        let mut world = WorldMap::new();
        for chunk in &self.chunks {
            let (coord, chunk) = chunk.restore()?;
            world.insert_restored(coord, chunk)?;
        }
        world.set_most_recent(self.most_recent_chunk.unwrap_or(ChunkCoord::new(0, 0)));
        Ok(world)
    }

    pub fn score(&self) -> Score {
        self.score.into()
    }

    pub fn speed_totals(&self) -> SpeedTotals {
        SpeedTotals {
            total: self.total_speed_score,
            best: self.max_speed_score,
        }
    }
}
