//! Speed round scoring and countdown.

use crate::feedback::{Color, ERROR_COLOR, SUCCESS_COLOR};

/// Base length of a speed round in milliseconds.
pub const SPEED_ROUND_MS: f64 = 60_000.0;
/// Time added for each accepted word.
pub const WORD_BONUS_MS: f64 = 5_000.0;

/// Points for a word of `len` letters.
///
/// Words below the minimum length score nothing.
pub fn speed_mode_points(len: usize) -> u32 {
    match len {
        0..=3 => 0,
        4 => 1,
        5 => 2,
        6 => 4,
        7 => 7,
        8 => 11,
        9 => 16,
        10 => 25,
        n => 25 + n as u32,
    }
}

/// Countdown driven by caller-supplied timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTimer {
    started_at: f64,
    bonus_ms: f64,
}

impl SpeedTimer {
    pub fn start(now_ms: f64) -> Self {
        Self {
            started_at: now_ms,
            bonus_ms: 0.0,
        }
    }

    /// Extend the round by one word bonus.
    pub fn add_bonus(&mut self) {
        self.bonus_ms += WORD_BONUS_MS;
    }

    /// Total time allotted so far, including bonuses.
    pub fn duration_ms(&self) -> f64 {
        SPEED_ROUND_MS + self.bonus_ms
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at).max(0.0)
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.duration_ms() - self.elapsed_ms(now_ms)).max(0.0)
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.remaining_ms(now_ms) <= 0.0
    }

    /// Share of the allotted time used up, in `0.0..=1.0`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        (self.elapsed_ms(now_ms) / self.duration_ms()).clamp(0.0, 1.0)
    }

    /// Border colour, fading from green to red as time runs out.
    pub fn border_color(&self, now_ms: f64) -> Color {
        SUCCESS_COLOR.lerp(ERROR_COLOR, self.progress(now_ms))
    }
}
