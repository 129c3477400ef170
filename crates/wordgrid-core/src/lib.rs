pub mod camera;
pub mod cell;
pub mod chunk;
pub mod direction;
pub mod error;
pub mod expansion;
pub mod feedback;
pub mod game;
pub mod generator;
pub mod lexicon;
pub mod score;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod speed;
pub mod world;

pub use camera::{Camera, PanAnimation, CELL_SIZE_PX, CHUNK_SIZE_PX};
pub use cell::Cell;
pub use chunk::{CellCoord, Chunk, ChunkCoord, CHUNK_AREA, CHUNK_SIZE};
pub use direction::Direction;
pub use error::WordGridError;
pub use expansion::{expand_world, plan_expansion};
pub use feedback::{Color, Feedback, ERROR_COLOR, SUCCESS_COLOR};
pub use game::{Game, RoundSummary, SpeedStatus, SubmitOutcome, TickOutcome};
pub use generator::{
    CellSource, EdgeSeed, GeneratedChunk, GeneratorConfig, GridGenerator, NeighborHint, Placement,
    PlacementKind,
};
pub use lexicon::{parse_definitions, parse_word_list, FragmentKind, Lexicon};
pub use score::{Score, SpeedTotals};
pub use selection::{check_word, resolve_selection, DragSelection, WordCheck, MIN_WORD_LEN};
pub use session::{SelectionResult, Session};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use speed::{speed_mode_points, SpeedTimer};
pub use world::WorldMap;
