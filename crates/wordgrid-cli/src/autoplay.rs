//! A bot that plays the game by brute-force search of the current world.

use wordgrid_core::{
    check_word, resolve_selection, CellCoord, Direction, Game, RoundSummary, Session, CHUNK_SIZE,
    MIN_WORD_LEN,
};

/// Longest run the bot tries from any starting cell.
const MAX_SCAN_LEN: i32 = 12;

/// Simulated thinking time per word in a speed round. Longer than the
/// per-word bonus so a round always ends.
const THINK_MS: f64 = 8_000.0;

/// A word the bot can submit, with its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    pub word: String,
    pub start: CellCoord,
    pub end: CellCoord,
}

/// First unused word in the session's world, scanning chunks in coordinate order.
pub fn find_word(session: &Session) -> Option<Sighting> {
    let world = session.world();
    for coord in world.occupied() {
        for ly in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let start = coord.cell_at(lx, ly);
                for direction in Direction::ALL {
                    for len in MIN_WORD_LEN as i32..=MAX_SCAN_LEN {
                        let end = start.step(direction, len - 1);
                        let cells = resolve_selection(world, start, end);
                        // A gap or used cell blocks every longer run too.
                        if cells.len() != len as usize {
                            break;
                        }
                        if check_word(world, session.lexicon(), &cells).is_accepted() {
                            let word = cells
                                .iter()
                                .filter_map(|c| world.cell(*c).map(|cell| cell.letter()))
                                .collect();
                            return Some(Sighting { word, start, end });
                        }
                    }
                }
            }
        }
    }
    None
}

/// Play up to `turns` words in the normal world. Returns the words found.
pub fn play_turns(game: &mut Game, turns: u32) -> Vec<String> {
    let mut found = Vec::new();
    for turn in 1..=turns {
        let Some(sighting) = find_word(game.session()) else {
            tracing::warn!(turn, "No word left to find");
            break;
        };
        let outcome = game.submit(sighting.start, sighting.end);
        if let Some(feedback) = &outcome.feedback {
            println!("[{:>3}] {}", turn, feedback.text);
        }
        if let Some(coord) = outcome.expanded {
            tracing::debug!(cx = coord.cx, cy = coord.cy, "World expanded");
        }
        if outcome.check.is_accepted() {
            found.push(sighting.word);
        }
    }
    found
}

/// Play one speed round on a simulated clock starting at `start_ms`.
pub fn play_speed_round(game: &mut Game, start_ms: f64) -> Option<RoundSummary> {
    if !game.enter_speed_mode(start_ms) {
        return None;
    }
    let mut now = start_ms;

    loop {
        let Some(sighting) = find_word(game.session()) else {
            // Nothing left; let the clock run out.
            let remaining = game.speed_status(now).map_or(0.0, |s| s.remaining_ms);
            return game.tick(now + remaining).round_ended;
        };

        now += THINK_MS;
        let tick = game.tick(now);
        if tick.round_ended.is_some() {
            return tick.round_ended;
        }

        let outcome = game.submit(sighting.start, sighting.end);
        if let Some(feedback) = &outcome.feedback {
            println!("[speed] {}", feedback.text);
        }
    }
}
