use thiserror::Error;

/// Errors produced by the WordGrid engine.
///
/// Gameplay never surfaces these to the player: a snapshot that fails to
/// restore is replaced by a fresh world, and invalid selections are reported
/// through [`crate::WordCheck`] instead.
#[derive(Error, Debug)]
pub enum WordGridError {
    #[error("Snapshot is not valid JSON: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Snapshot contains no chunks")]
    EmptySnapshot,

    #[error("Chunk ({cx}, {cy}) appears more than once")]
    DuplicateChunk { cx: i32, cy: i32 },

    #[error("Chunk ({cx}, {cy}) has {found} cells, expected {expected}")]
    CellCount {
        cx: i32,
        cy: i32,
        found: usize,
        expected: usize,
    },

    #[error("Invalid cell letter {0:?}")]
    InvalidLetter(String),
}

impl WordGridError {
    /// Stable identifier for the error kind, used by the JS bridge.
    pub fn code(&self) -> &'static str {
        match self {
            WordGridError::SnapshotParse(_) => "SNAPSHOT_PARSE",
            WordGridError::UnsupportedVersion { .. } => "UNSUPPORTED_VERSION",
            WordGridError::EmptySnapshot => "EMPTY_SNAPSHOT",
            WordGridError::DuplicateChunk { .. } => "DUPLICATE_CHUNK",
            WordGridError::CellCount { .. } => "CELL_COUNT",
            WordGridError::InvalidLetter(_) => "INVALID_LETTER",
        }
    }
}
