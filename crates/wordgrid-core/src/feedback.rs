use serde::{Deserialize, Serialize};

use crate::lexicon::{format_definition, Lexicon};
use crate::selection::{WordCheck, MIN_WORD_LEN};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Convert to CSS hex color string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel linear blend; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub const SUCCESS_COLOR: Color = Color::rgb(0x4c, 0xaf, 0x50);
pub const ERROR_COLOR: Color = Color::rgb(0xe9, 0x45, 0x60);

/// A transient message for the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub color: Color,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: SUCCESS_COLOR,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: ERROR_COLOR,
        }
    }

    /// Message for a normal-mode selection. An empty run says nothing.
    pub fn for_check(check: &WordCheck, lexicon: &Lexicon) -> Option<Self> {
        match check {
            WordCheck::Accepted { word, .. } => {
                let text = match lexicon.definition_for(word) {
                    Some(definition) => format_definition(word, definition),
                    None => format!("Found: {}!", word),
                };
                Some(Self::success(text))
            }
            other => Self::for_rejection(other),
        }
    }

    /// Message for a speed-round selection worth `points`.
    pub fn for_speed_check(check: &WordCheck, points: u32) -> Option<Self> {
        match check {
            WordCheck::Accepted { word, .. } => {
                Some(Self::success(format!("{} (+{})", word, points)))
            }
            other => Self::for_rejection(other),
        }
    }

    pub fn speed_round_complete(score: u32) -> Self {
        Self::success(format!("Speed Mode Complete! Score: {}", score))
    }

    fn for_rejection(check: &WordCheck) -> Option<Self> {
        match check {
            WordCheck::TooShort { len: 0 } => None,
            WordCheck::TooShort { .. } => Some(Self::error(format!(
                "Words must be at least {} letters long",
                MIN_WORD_LEN
            ))),
            WordCheck::NotFound { word } => Some(Self::error(format!("{} invalid", word))),
            WordCheck::Accepted { .. } => None,
        }
    }
}
