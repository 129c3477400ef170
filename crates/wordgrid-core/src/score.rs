use serde::{Deserialize, Serialize};

/// Running totals for the normal game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub found_words: u32,
    pub found_letters: u32,
}

impl Score {
    pub fn new(found_words: u32, found_letters: u32) -> Self {
        Self {
            found_words,
            found_letters,
        }
    }

    /// Count an accepted word.
    pub fn record(&mut self, word: &str) {
        self.found_words += 1;
        self.found_letters += word.chars().count() as u32;
    }

    /// Mean word length, or `None` before the first word.
    pub fn average_letters(&self) -> Option<f64> {
        if self.found_words == 0 {
            None
        } else {
            Some(f64::from(self.found_letters) / f64::from(self.found_words))
        }
    }

    /// Mean word length for display: one decimal place, `0` with no words.
    pub fn average_display(&self) -> String {
        match self.average_letters() {
            Some(average) => format!("{:.1}", average),
            None => "0".to_string(),
        }
    }
}

/// Accumulated speed round results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedTotals {
    pub total: u32,
    pub best: u32,
}

impl SpeedTotals {
    /// Fold a finished round into the totals.
    pub fn record_round(&mut self, score: u32) {
        self.total += score;
        self.best = self.best.max(score);
    }
}
