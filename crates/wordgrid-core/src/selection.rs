use serde::{Deserialize, Serialize};

use crate::chunk::CellCoord;
use crate::lexicon::Lexicon;
use crate::world::WorldMap;

/// Shortest run of letters that can be accepted as a word.
pub const MIN_WORD_LEN: usize = 4;

/// A drag in progress, from the cell where the pointer went down to the
/// cell currently under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSelection {
    start: Option<CellCoord>,
    end: Option<CellCoord>,
}

impl DragSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new drag at `cell`, replacing any previous one.
    pub fn begin(&mut self, cell: CellCoord) {
        self.start = Some(cell);
        self.end = Some(cell);
    }

    /// Move the free end of the drag. Ignored when no drag is active.
    pub fn update(&mut self, cell: CellCoord) {
        if self.start.is_some() {
            self.end = Some(cell);
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn endpoints(&self) -> Option<(CellCoord, CellCoord)> {
        Some((self.start?, self.end?))
    }

    /// Cells the drag currently covers, for highlighting.
    pub fn preview(&self, world: &WorldMap) -> Vec<CellCoord> {
        self.endpoints()
            .map(|(start, end)| resolve_selection(world, start, end))
            .unwrap_or_default()
    }

    /// End the drag and return its endpoints.
    pub fn finish(&mut self) -> Option<(CellCoord, CellCoord)> {
        let endpoints = self.endpoints();
        self.clear();
        endpoints
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}

/// Result of judging a resolved selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordCheck {
    Accepted { word: String, cells: Vec<CellCoord> },
    /// Fewer than [`MIN_WORD_LEN`] letters; `len` may be zero for an empty run.
    TooShort { len: usize },
    NotFound { word: String },
}

impl WordCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WordCheck::Accepted { .. })
    }
}

/// Resolve a straight selection into the ordered cells it covers.
///
/// Returns an empty list when either endpoint is not an existing cell or
/// `end` is not on one of the eight lines through `start`. Cells in between
/// that do not exist or are already used are skipped, so a previously found
/// word shortens the run rather than blocking it.
pub fn resolve_selection(world: &WorldMap, start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
    if world.cell(start).is_none() || world.cell(end).is_none() {
        return Vec::new();
    }

    let dx = i64::from(end.gx) - i64::from(start.gx);
    let dy = i64::from(end.gy) - i64::from(start.gy);
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        return Vec::new();
    }

    let steps = dx.abs().max(dy.abs());
    let (step_x, step_y) = (dx.signum(), dy.signum());

    // Every point lies between the two endpoints, so it fits back into i32.
    (0..=steps)
        .map(|i| {
            CellCoord::new(
                (i64::from(start.gx) + step_x * i) as i32,
                (i64::from(start.gy) + step_y * i) as i32,
            )
        })
        .filter(|&coord| is_selectable(world, coord))
        .collect()
}

fn is_selectable(world: &WorldMap, coord: CellCoord) -> bool {
    world.cell(coord).is_some_and(|cell| !cell.is_used())
}

/// Judge the letters under `cells` against the validation dictionary.
///
/// Membership is an exact match; no plural stripping is applied.
pub fn check_word(world: &WorldMap, lexicon: &Lexicon, cells: &[CellCoord]) -> WordCheck {
    let word: String = cells
        .iter()
        .filter_map(|&coord| world.cell(coord).map(|cell| cell.letter()))
        .collect();

    if word.len() < MIN_WORD_LEN {
        return WordCheck::TooShort { len: word.len() };
    }
    if !lexicon.is_valid_word(&word) {
        tracing::trace!(word = %word, "Rejected selection");
        return WordCheck::NotFound { word };
    }
    WordCheck::Accepted {
        word,
        cells: cells.to_vec(),
    }
}

/// Resolve, judge, and on acceptance mark the selection found and used.
pub fn submit_selection(
    world: &mut WorldMap,
    lexicon: &Lexicon,
    start: CellCoord,
    end: CellCoord,
) -> WordCheck {
    let cells = resolve_selection(world, start, end);
    let check = check_word(world, lexicon, &cells);
    if let WordCheck::Accepted { cells, .. } = &check {
        world.mark_found(cells);
    }
    check
}
