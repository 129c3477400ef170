/// The 26-letter alphabet cells are filled from.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One letter slot of the world.
///
/// `found` records that the cell has been part of an accepted word; `used`
/// removes it from future selections. Both are set together, so `used`
/// always implies `found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    letter: char,
    found: bool,
    used: bool,
}

impl Cell {
    /// Create a fresh, unfound cell
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            found: false,
            used: false,
        }
    }

    /// Rebuild a cell from persisted flags.
    ///
    /// A `used` flag without `found` is upgraded so the invariant holds.
    pub fn restored(letter: char, found: bool, used: bool) -> Self {
        Self {
            letter,
            found: found || used,
            used,
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Mark the cell as part of an accepted word. Irreversible.
    pub fn mark_found(&mut self) {
        self.found = true;
        self.used = true;
    }
}

/// Whether `letter` is one of the uppercase letters A-Z.
pub fn is_grid_letter(letter: char) -> bool {
    letter.is_ascii_uppercase()
}
