use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wordgrid_core::{
    parse_definitions, parse_word_list, CellCoord, ChunkCoord, Direction, Game, Lexicon,
    NeighborHint, RoundSummary, Snapshot, SubmitOutcome, TickOutcome, WordCheck, WordGridError,
    CHUNK_AREA,
};

use crate::viewport::ChunkBuffer;

/// Word search engine exposed to JavaScript
#[wasm_bindgen]
pub struct WordGridEngine {
    game: Game,
    /// Reusable buffer for visible chunk cells
    chunk_buffer: ChunkBuffer,
}

/// Structured error object for JavaScript
#[derive(Serialize)]
pub struct JsWordGridError {
    code: String,
    message: String,
}

impl From<WordGridError> for JsWordGridError {
    fn from(err: WordGridError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

fn to_js_error(err: WordGridError) -> JsValue {
    let js_error = JsWordGridError::from(err);
    serde_wasm_bindgen::to_value(&js_error).unwrap_or(JsValue::NULL)
}

#[cfg(target_arch = "wasm32")]
fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(_message: &str) {}

fn random_seed() -> u64 {
    let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let low = js_sys::Date::now() as u64;
    (high << 32) ^ low
}

/// Cell data for JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub gx: i32,
    pub gy: i32,
    pub letter: char,
    pub found: bool,
    pub used: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub text: String,
    pub color: String,
}

/// Result of a submitted selection
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitData {
    /// "accepted", "tooShort" or "notFound"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub cells: Vec<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<ChunkCoord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub persist: bool,
}

impl From<SubmitOutcome> for SubmitData {
    fn from(outcome: SubmitOutcome) -> Self {
        let (status, word, cells) = match outcome.check {
            WordCheck::Accepted { word, cells } => (
                "accepted",
                Some(word),
                cells.iter().map(|c| [c.gx, c.gy]).collect(),
            ),
            WordCheck::TooShort { .. } => ("tooShort", None, Vec::new()),
            WordCheck::NotFound { word } => ("notFound", Some(word), Vec::new()),
        };
        Self {
            status,
            word,
            cells,
            message: outcome.feedback.map(|f| MessageData {
                text: f.text,
                color: f.color.to_hex(),
            }),
            expanded: outcome.expanded,
            points: outcome.points,
            persist: outcome.persist,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundData {
    pub score: u32,
    pub message: MessageData,
    pub total_speed_score: u32,
    pub max_speed_score: u32,
    /// The speed totals changed; the caller should save a fresh snapshot.
    pub persist: bool,
}

impl From<RoundSummary> for RoundData {
    fn from(summary: RoundSummary) -> Self {
        Self {
            score: summary.score,
            message: MessageData {
                text: summary.feedback.text,
                color: summary.feedback.color.to_hex(),
            },
            total_speed_score: summary.totals.total,
            max_speed_score: summary.totals.best,
            persist: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickData {
    pub needs_frame: bool,
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_ended: Option<RoundData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
    pub found_words_count: u32,
    pub average_letters: String,
    pub total_speed_score: u32,
    pub max_speed_score: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedStatusData {
    pub score: u32,
    pub remaining_seconds: f64,
    pub progress: f64,
    pub border_color: String,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn build_lexicon(placement: &str, validation: &str, definitions_json: Option<String>) -> Lexicon {
    let non_empty = |words: Vec<String>| if words.is_empty() { None } else { Some(words) };
    let lexicon = Lexicon::new(
        non_empty(parse_word_list(placement)),
        non_empty(parse_word_list(validation)),
    );
    match definitions_json.as_deref().map(parse_definitions) {
        Some(Ok(definitions)) => lexicon.with_definitions(definitions),
        Some(Err(err)) => {
            console_warn(&format!("Ignoring word definitions: {}", err));
            lexicon
        }
        None => lexicon,
    }
}

#[wasm_bindgen]
impl WordGridEngine {
    /// Create an engine with a fresh world.
    ///
    /// Word lists are newline-separated. An empty list falls back to the
    /// built-in words. Without a seed, one is drawn from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        placement_words: &str,
        validation_words: &str,
        definitions_json: Option<String>,
        seed: Option<f64>,
    ) -> Self {
        let lexicon = Arc::new(build_lexicon(placement_words, validation_words, definitions_json));
        let seed = seed.map(|s| s as u64).unwrap_or_else(random_seed);
        Self {
            game: Game::new(lexicon, seed),
            chunk_buffer: ChunkBuffer::with_capacity(9 * CHUNK_AREA),
        }
    }

    // --- Persistence ---

    /// Replace the game with a saved one, or a fresh world if it cannot be
    /// restored. Returns whether the save was used.
    #[wasm_bindgen(js_name = loadSaved)]
    pub fn load_saved(&mut self, json: Option<String>, seed: Option<f64>) -> bool {
        let lexicon = self.game.lexicon().clone();
        let seed = seed.map(|s| s as u64).unwrap_or_else(random_seed);
        let (game, restored) = Game::restore_or_new(lexicon, json.as_deref(), seed);
        if json.is_some() && !restored {
            console_warn("Saved game could not be restored, starting a new world");
        }
        self.game = game;
        restored
    }

    /// Restore a snapshot, leaving the current game untouched on error.
    #[wasm_bindgen(js_name = importSnapshot)]
    pub fn import_snapshot(&mut self, json: &str, seed: Option<f64>) -> Result<(), JsValue> {
        let snapshot = Snapshot::from_json(json).map_err(to_js_error)?;
        let seed = seed.map(|s| s as u64).unwrap_or_else(random_seed);
        self.game = Game::from_snapshot(self.game.lexicon().clone(), &snapshot, seed)
            .map_err(to_js_error)?;
        Ok(())
    }

    /// Serialize the normal game for storage.
    #[wasm_bindgen(js_name = exportSnapshot)]
    pub fn export_snapshot(&self) -> Result<String, JsValue> {
        self.game
            .to_json(js_sys::Date::now() as u64)
            .map_err(to_js_error)
    }

    // --- World ---

    #[wasm_bindgen(js_name = createChunk)]
    pub fn create_chunk(&mut self, cx: i32, cy: i32) -> bool {
        self.game
            .session_mut()
            .create_chunk(ChunkCoord::new(cx, cy), None)
            .is_some()
    }

    /// Create a chunk stitched from `origin`, which it lies `(dx, dy)` away from.
    #[wasm_bindgen(js_name = createChunkFrom)]
    pub fn create_chunk_from(
        &mut self,
        cx: i32,
        cy: i32,
        origin_cx: i32,
        origin_cy: i32,
        dx: i32,
        dy: i32,
    ) -> bool {
        let hint = Direction::from_step(dx, dy).map(|direction| NeighborHint {
            origin: ChunkCoord::new(origin_cx, origin_cy),
            direction,
        });
        self.game
            .session_mut()
            .create_chunk(ChunkCoord::new(cx, cy), hint)
            .is_some()
    }

    #[wasm_bindgen(js_name = isOccupied)]
    pub fn is_occupied(&self, cx: i32, cy: i32) -> bool {
        self.game.session().world().is_occupied(ChunkCoord::new(cx, cy))
    }

    /// Occupied chunks as a JSON array of `{cx, cy}`.
    #[wasm_bindgen(js_name = getOccupiedChunks)]
    pub fn get_occupied_chunks(&self) -> String {
        to_json(&self.game.session().world().occupied())
    }

    #[wasm_bindgen(js_name = getMostRecentChunk)]
    pub fn get_most_recent_chunk(&self) -> String {
        to_json(&self.game.session().world().most_recent_chunk())
    }

    /// Cell data as JSON, or `null` when no chunk covers the cell.
    #[wasm_bindgen(js_name = getCell)]
    pub fn get_cell(&self, gx: i32, gy: i32) -> String {
        let cell = self
            .game
            .session()
            .world()
            .cell(CellCoord::new(gx, gy))
            .map(|cell| CellData {
                gx,
                gy,
                letter: cell.letter(),
                found: cell.is_found(),
                used: cell.is_used(),
            });
        to_json(&cell)
    }

    // --- Selection ---

    #[wasm_bindgen(js_name = beginSelection)]
    pub fn begin_selection(&mut self, gx: i32, gy: i32) {
        self.game
            .session_mut()
            .drag_mut()
            .begin(CellCoord::new(gx, gy));
    }

    #[wasm_bindgen(js_name = updateSelection)]
    pub fn update_selection(&mut self, gx: i32, gy: i32) {
        self.game
            .session_mut()
            .drag_mut()
            .update(CellCoord::new(gx, gy));
    }

    /// Cells covered by the drag in progress, as `[[gx, gy], ...]`.
    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> String {
        let session = self.game.session();
        let cells: Vec<[i32; 2]> = session
            .drag()
            .preview(session.world())
            .iter()
            .map(|c| [c.gx, c.gy])
            .collect();
        to_json(&cells)
    }

    #[wasm_bindgen(js_name = cancelSelection)]
    pub fn cancel_selection(&mut self) {
        self.game.session_mut().drag_mut().clear();
    }

    /// Submit the drag in progress. Returns JSON, or `null` without a drag.
    #[wasm_bindgen(js_name = endSelection)]
    pub fn end_selection(&mut self) -> String {
        to_json(&self.game.finish_drag().map(SubmitData::from))
    }

    #[wasm_bindgen(js_name = submitSelection)]
    pub fn submit_selection(
        &mut self,
        start_gx: i32,
        start_gy: i32,
        end_gx: i32,
        end_gy: i32,
    ) -> String {
        let outcome = self.game.submit(
            CellCoord::new(start_gx, start_gy),
            CellCoord::new(end_gx, end_gy),
        );
        to_json(&SubmitData::from(outcome))
    }

    // --- Camera ---

    /// Cell under a screen point given relative to the container centre.
    #[wasm_bindgen(js_name = cellAtScreen)]
    pub fn cell_at_screen(&self, x: f64, y: f64) -> Vec<i32> {
        let cell = self.game.session().camera().cell_at_screen(x, y);
        vec![cell.gx, cell.gy]
    }

    #[wasm_bindgen(js_name = getCamera)]
    pub fn get_camera(&self) -> String {
        let camera = self.game.session().camera();
        let (pan_x, pan_y) = camera.pan();
        to_json(&serde_json::json!({
            "panX": pan_x,
            "panY": pan_y,
            "scale": camera.scale(),
        }))
    }

    #[wasm_bindgen(js_name = beginPan)]
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.game.session_mut().camera_mut().begin_drag(x, y);
    }

    #[wasm_bindgen(js_name = dragPan)]
    pub fn drag_pan(&mut self, x: f64, y: f64) {
        self.game.session_mut().camera_mut().drag_to(x, y);
    }

    #[wasm_bindgen(js_name = endPan)]
    pub fn end_pan(&mut self) {
        self.game.session_mut().camera_mut().end_drag();
    }

    /// Whether a pan drag is in progress, so pointer moves should pan.
    #[wasm_bindgen(js_name = isPanning)]
    pub fn is_panning(&self) -> bool {
        self.game.session().camera().is_dragging()
    }

    #[wasm_bindgen(js_name = panBy)]
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.game.session_mut().camera_mut().pan_by(dx, dy);
    }

    #[wasm_bindgen(js_name = zoomAt)]
    pub fn zoom_at(&mut self, scale: f64, anchor_x: f64, anchor_y: f64) {
        self.game
            .session_mut()
            .camera_mut()
            .zoom_at(scale, anchor_x, anchor_y);
    }

    #[wasm_bindgen]
    pub fn wheel(&mut self, delta_y: f64, anchor_x: f64, anchor_y: f64) {
        self.game
            .session_mut()
            .camera_mut()
            .wheel(delta_y, anchor_x, anchor_y);
    }

    #[wasm_bindgen(js_name = panToChunk)]
    pub fn pan_to_chunk(&mut self, cx: i32, cy: i32) {
        self.game
            .session_mut()
            .camera_mut()
            .pan_to_chunk(ChunkCoord::new(cx, cy));
    }

    #[wasm_bindgen(js_name = cancelPanAnimation)]
    pub fn cancel_pan_animation(&mut self) {
        self.game.session_mut().camera_mut().cancel_animation();
    }

    /// Advance animations and the speed timer; call once per animation frame.
    #[wasm_bindgen]
    pub fn tick(&mut self, now: f64) -> String {
        let outcome: TickOutcome = self.game.tick(now);
        let camera = self.game.session().camera();
        let (pan_x, pan_y) = camera.pan();
        to_json(&TickData {
            needs_frame: outcome.needs_frame,
            pan_x,
            pan_y,
            scale: camera.scale(),
            round_ended: outcome.round_ended.map(RoundData::from),
        })
    }

    // --- Score and speed mode ---

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> String {
        let score = self.game.normal_session().score();
        let totals = self.game.speed_totals();
        to_json(&ScoreData {
            found_words_count: score.found_words,
            average_letters: score.average_display(),
            total_speed_score: totals.total,
            max_speed_score: totals.best,
        })
    }

    #[wasm_bindgen(js_name = isSpeedMode)]
    pub fn is_speed_mode(&self) -> bool {
        self.game.is_speed_mode()
    }

    /// Enter or leave speed mode. Returns the round summary JSON when leaving.
    #[wasm_bindgen(js_name = toggleSpeedMode)]
    pub fn toggle_speed_mode(&mut self, now: f64) -> String {
        to_json(&self.game.toggle_speed_mode(now).map(RoundData::from))
    }

    #[wasm_bindgen(js_name = getSpeedStatus)]
    pub fn get_speed_status(&self, now: f64) -> String {
        let status = self.game.speed_status(now).map(|status| SpeedStatusData {
            score: status.score,
            remaining_seconds: status.remaining_ms / 1000.0,
            progress: status.progress,
            border_color: status.border_color.to_hex(),
        });
        to_json(&status)
    }

    // =========================================================================
    // Zero-Copy Chunk API
    // =========================================================================

    /// Fill the internal buffer with every cell of the occupied chunks in the
    /// inclusive chunk range. Call before reading the buffer pointers.
    #[wasm_bindgen(js_name = populateChunks)]
    pub fn populate_chunks(&mut self, min_cx: i32, min_cy: i32, max_cx: i32, max_cy: i32) {
        self.chunk_buffer.clear();
        let session = self.game.session();
        let selected = session.drag().preview(session.world());
        self.chunk_buffer.populate(
            session.world(),
            ChunkCoord::new(min_cx, min_cy),
            ChunkCoord::new(max_cx, max_cy),
            &selected,
        );
    }

    #[wasm_bindgen(js_name = getBufferLen)]
    pub fn get_buffer_len(&self) -> usize {
        self.chunk_buffer.len()
    }

    /// Pointer to global x coordinates (Int32Array)
    #[wasm_bindgen(js_name = getBufferGxPtr)]
    pub fn get_buffer_gx_ptr(&self) -> *const i32 {
        self.chunk_buffer.gx.as_ptr()
    }

    /// Pointer to global y coordinates (Int32Array)
    #[wasm_bindgen(js_name = getBufferGyPtr)]
    pub fn get_buffer_gy_ptr(&self) -> *const i32 {
        self.chunk_buffer.gy.as_ptr()
    }

    /// Pointer to ASCII letters (Uint8Array)
    #[wasm_bindgen(js_name = getBufferLettersPtr)]
    pub fn get_buffer_letters_ptr(&self) -> *const u8 {
        self.chunk_buffer.letters.as_ptr()
    }

    /// Pointer to packed cell flags (Uint32Array)
    #[wasm_bindgen(js_name = getBufferFlagsPtr)]
    pub fn get_buffer_flags_ptr(&self) -> *const u32 {
        self.chunk_buffer.flags.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &str = "house\nHORSE\nmouse\nstone\ntable\nplanet\n";

    fn engine() -> WordGridEngine {
        WordGridEngine::new(WORDS, WORDS, None, Some(7.0))
    }

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    /// Some word lying in chunk (0,0), found by brute force.
    fn find_word(engine: &WordGridEngine) -> Option<(CellCoord, CellCoord)> {
        let session = engine.game.session();
        let lexicon = session.lexicon();
        for gy in 0..10 {
            for gx in 0..10 {
                let start = CellCoord::new(gx, gy);
                for direction in Direction::ALL {
                    for len in 4..=7 {
                        let end = start.step(direction, len - 1);
                        let cells = wordgrid_core::resolve_selection(session.world(), start, end);
                        if cells.len() == len as usize
                            && wordgrid_core::check_word(session.world(), lexicon, &cells)
                                .is_accepted()
                        {
                            return Some((start, end));
                        }
                    }
                }
            }
        }
        None
    }

    #[test]
    fn test_new_engine_has_origin_chunk() {
        let engine = engine();
        assert!(engine.is_occupied(0, 0));
        assert!(!engine.is_occupied(1, 0));

        let cell = parse(&engine.get_cell(3, 4));
        assert_eq!(cell["gx"], 3);
        assert!(cell["letter"].as_str().unwrap().len() == 1);
        assert_eq!(cell["found"], false);
        assert_eq!(engine.get_cell(30, 4), "null");

        let camera = parse(&engine.get_camera());
        assert_eq!(camera["panX"], -200.0);
        assert_eq!(camera["scale"], 1.0);
    }

    #[test]
    fn test_create_chunk_variants() {
        let mut engine = engine();
        assert!(engine.create_chunk_from(1, 0, 0, 0, 1, 0));
        assert!(!engine.create_chunk(1, 0));
        assert!(engine.create_chunk(5, 5));

        let occupied = parse(&engine.get_occupied_chunks());
        assert_eq!(occupied.as_array().unwrap().len(), 3);
        assert_eq!(parse(&engine.get_most_recent_chunk())["cx"], 5);
    }

    #[test]
    fn test_submit_and_drag_selection() {
        let mut engine = engine();

        let short = parse(&engine.submit_selection(0, 0, 1, 0));
        assert_eq!(short["status"], "tooShort");
        assert_eq!(short["message"]["color"], "#e94560");
        assert_eq!(short["persist"], false);

        let (start, end) = find_word(&engine).unwrap();
        engine.begin_selection(start.gx, start.gy);
        engine.update_selection(end.gx, end.gy);
        assert!(!parse(&engine.get_selection()).as_array().unwrap().is_empty());

        let accepted = parse(&engine.end_selection());
        assert_eq!(accepted["status"], "accepted");
        assert_eq!(accepted["persist"], true);
        assert_eq!(accepted["message"]["color"], "#4caf50");
        assert!(accepted.get("expanded").is_some());
        assert_eq!(engine.end_selection(), "null");

        let score = parse(&engine.get_score());
        assert_eq!(score["foundWordsCount"], 1);
    }

    #[test]
    fn test_speed_mode_round_trip() {
        let mut engine = engine();
        assert_eq!(engine.toggle_speed_mode(0.0), "null");
        assert!(engine.is_speed_mode());

        let status = parse(&engine.get_speed_status(30_000.0));
        assert_eq!(status["remainingSeconds"], 30.0);
        assert_eq!(status["progress"], 0.5);

        let tick = parse(&engine.tick(61_000.0));
        assert_eq!(tick["roundEnded"]["score"], 0);
        assert_eq!(tick["roundEnded"]["persist"], true);
        assert_eq!(
            tick["roundEnded"]["message"]["text"],
            "Speed Mode Complete! Score: 0"
        );
        assert!(!engine.is_speed_mode());
        assert_eq!(engine.get_speed_status(0.0), "null");
    }

    #[test]
    fn test_load_saved_round_trip() {
        let mut engine = engine();
        engine.create_chunk(0, 1);
        let json = engine.game.to_json(42).unwrap();

        let mut other = WordGridEngine::new(WORDS, WORDS, None, Some(8.0));
        assert!(other.load_saved(Some(json), Some(1.0)));
        assert!(other.is_occupied(0, 1));
        assert_eq!(other.get_cell(0, 15), engine.get_cell(0, 15));

        assert!(!other.load_saved(Some("{".to_string()), Some(1.0)));
        assert!(!other.is_occupied(0, 1));
    }

    #[test]
    fn test_populate_chunks_buffer() {
        let mut engine = engine();
        engine.populate_chunks(-1, -1, 1, 1);
        assert_eq!(engine.get_buffer_len(), CHUNK_AREA);
        assert!(engine.chunk_buffer.letters.iter().all(|b| b.is_ascii_uppercase()));
    }

    #[test]
    fn test_camera_controls() {
        let mut engine = engine();
        engine.wheel(1.0, 0.0, 0.0);
        assert!((parse(&engine.get_camera())["scale"].as_f64().unwrap() - 0.9).abs() < 1e-9);

        engine.pan_to_chunk(1, 0);
        let first = parse(&engine.tick(0.0));
        assert_eq!(first["needsFrame"], true);
        let done = parse(&engine.tick(1_000.0));
        assert_eq!(done["needsFrame"], false);
        assert!((done["panX"].as_f64().unwrap() + 600.0 * 0.9).abs() < 1e-9);

        assert_eq!(engine.cell_at_screen(10.0, 10.0), vec![15, 5]);

        engine.begin_pan(5.0, 5.0);
        assert!(engine.is_panning());
        engine.drag_pan(25.0, 5.0);
        engine.end_pan();
        assert!(!engine.is_panning());
    }
}
