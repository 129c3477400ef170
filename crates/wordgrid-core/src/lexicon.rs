//! Word lists and the prefix/suffix lookup tables the generator stitches with.
//!
//! Two dictionaries feed the engine:
//! - the *placement* list, a curated set of common words (length 5-7) that the
//!   generator embeds into chunks;
//! - the *validation* list, a much larger set used only to judge whether the
//!   letters a player selected form a real word.
//!
//! From these the [`Lexicon`] derives the obscure word pool (validation words of
//! length 6 or more) and fragment indexes keyed by the first or last 1-3
//! letters of every placement word. Everything is built once and never mutated.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::error::WordGridError;

/// Minimum length of a placement word.
pub const MIN_PLACEMENT_LEN: usize = 5;
/// Maximum length of a placement word.
pub const MAX_PLACEMENT_LEN: usize = 7;
/// Minimum length of a validation word used as a bonus word.
pub const MIN_OBSCURE_LEN: usize = 6;
/// Longest prefix/suffix fragment indexed.
pub const MAX_FRAGMENT_LEN: usize = 3;
/// Words shorter than this are not indexed by fragment.
const MIN_FRAGMENT_WORD_LEN: usize = 4;
/// Maximum characters of a definition message before truncation.
pub const DEFINITION_MAX_CHARS: usize = 250;

/// Placement list used when no dictionary could be loaded.
const FALLBACK_PLACEMENT_WORDS: [&str; 5] = ["APPLE", "BRAIN", "CHAIR", "DANCE", "EAGLE"];

/// Which end of a word a fragment is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Prefix,
    Suffix,
}

/// Words grouped by a fixed-length fragment from one of their ends.
#[derive(Debug, Clone, Default)]
pub struct FragmentIndex {
    words: HashMap<String, Vec<String>>,
    /// Sorted keys, so random picks are reproducible under a seeded RNG.
    fragments: Vec<String>,
}

impl FragmentIndex {
    fn build(words: &[String], len: usize, kind: FragmentKind) -> Self {
        let mut index: HashMap<String, Vec<String>> = HashMap::new();
        for word in words.iter().filter(|w| w.len() >= MIN_FRAGMENT_WORD_LEN) {
            let fragment = match kind {
                FragmentKind::Prefix => &word[..len],
                FragmentKind::Suffix => &word[word.len() - len..],
            };
            index.entry(fragment.to_string()).or_default().push(word.clone());
        }

        let mut fragments: Vec<String> = index.keys().cloned().collect();
        fragments.sort();
        Self {
            words: index,
            fragments,
        }
    }

    /// Words sharing the given fragment, in placement-list order.
    pub fn candidates(&self, fragment: &str) -> &[String] {
        self.words.get(fragment).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A uniformly chosen fragment, or `None` if the index is empty.
    pub fn random_fragment<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.fragments.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.fragments.len());
        Some(self.fragments[idx].as_str())
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Read-only dictionary data shared by every session.
#[derive(Debug, Clone)]
pub struct Lexicon {
    placement_words: Vec<String>,
    obscure_words: Vec<String>,
    validation: HashSet<String>,
    prefixes: [FragmentIndex; MAX_FRAGMENT_LEN],
    suffixes: [FragmentIndex; MAX_FRAGMENT_LEN],
    /// Keyed by lowercase word.
    definitions: HashMap<String, String>,
}

impl Lexicon {
    /// Build the lexicon from the two dictionaries.
    ///
    /// A missing placement list falls back to a tiny built-in list; a missing
    /// validation list makes the placement list double as the validation set
    /// (and leaves no bonus words). Both cases are logged, never fatal.
    pub fn new(placement: Option<Vec<String>>, validation: Option<Vec<String>>) -> Self {
        let mut placement_words: Vec<String> = placement
            .unwrap_or_default()
            .into_iter()
            .filter(|w| is_grid_word(w))
            .filter(|w| (MIN_PLACEMENT_LEN..=MAX_PLACEMENT_LEN).contains(&w.len()))
            .collect();
        if placement_words.is_empty() {
            tracing::warn!("Placement dictionary not loaded, using built-in fallback list");
            placement_words = FALLBACK_PLACEMENT_WORDS.iter().map(|w| w.to_string()).collect();
        }

        let (validation, obscure_words) = match validation {
            Some(words) if !words.is_empty() => {
                let validation: HashSet<String> = words.into_iter().collect();
                let mut obscure: Vec<String> = validation
                    .iter()
                    .filter(|w| w.len() >= MIN_OBSCURE_LEN && is_grid_word(w))
                    .cloned()
                    .collect();
                obscure.sort();
                tracing::info!(
                    validation = validation.len(),
                    obscure = obscure.len(),
                    "Loaded validation dictionary"
                );
                (validation, obscure)
            }
            _ => {
                tracing::warn!(
                    "Validation dictionary not loaded, validating against placement words"
                );
                (placement_words.iter().cloned().collect(), Vec::new())
            }
        };

        let prefixes = std::array::from_fn(|i| {
            FragmentIndex::build(&placement_words, i + 1, FragmentKind::Prefix)
        });
        let suffixes = std::array::from_fn(|i| {
            FragmentIndex::build(&placement_words, i + 1, FragmentKind::Suffix)
        });

        Self {
            placement_words,
            obscure_words,
            validation,
            prefixes,
            suffixes,
            definitions: HashMap::new(),
        }
    }

    /// Attach a word → definition map used for display text.
    pub fn with_definitions(mut self, definitions: HashMap<String, String>) -> Self {
        self.definitions = definitions
            .into_iter()
            .map(|(word, definition)| (word.to_lowercase(), definition))
            .collect();
        self
    }

    pub fn placement_words(&self) -> &[String] {
        &self.placement_words
    }

    pub fn obscure_words(&self) -> &[String] {
        &self.obscure_words
    }

    /// Exact membership test against the validation dictionary.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.validation.contains(word)
    }

    /// The fragment index for the given end and length (1-3).
    pub fn fragments(&self, kind: FragmentKind, len: usize) -> Option<&FragmentIndex> {
        if !(1..=MAX_FRAGMENT_LEN).contains(&len) {
            return None;
        }
        Some(match kind {
            FragmentKind::Prefix => &self.prefixes[len - 1],
            FragmentKind::Suffix => &self.suffixes[len - 1],
        })
    }

    /// Placement words starting (or ending) with `fragment`.
    pub fn candidates(&self, kind: FragmentKind, fragment: &str) -> &[String] {
        self.fragments(kind, fragment.len())
            .map(|index| index.candidates(fragment))
            .unwrap_or(&[])
    }

    /// Looks up a definition, retrying without a plural `S`.
    ///
    /// Only used for display; acceptance never strips plurals.
    pub fn definition_for(&self, word: &str) -> Option<&str> {
        let lower = word.to_lowercase();
        if let Some(definition) = self.definitions.get(&lower) {
            return Some(definition);
        }
        let singular = lower.strip_suffix('s')?;
        self.definitions.get(singular).map(String::as_str)
    }
}

/// Whether every character of `word` can be written into a cell.
fn is_grid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Parse a one-word-per-line list into uppercase alphabetic words.
///
/// Blank lines and entries containing anything other than letters are dropped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|word| is_grid_word(word))
        .collect()
}

/// Parse a JSON object of `word -> definition`.
pub fn parse_definitions(json: &str) -> Result<HashMap<String, String>, WordGridError> {
    Ok(serde_json::from_str(json)?)
}

/// Format the message shown for a found word with a definition.
pub fn format_definition(word: &str, definition: &str) -> String {
    let message = format!("{}: {}", word, definition);
    if message.chars().count() > DEFINITION_MAX_CHARS {
        let truncated: String = message.chars().take(DEFINITION_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        message
    }
}
