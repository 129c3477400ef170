use serde::{Deserialize, Serialize};

/// One of the eight compass/diagonal unit steps on the grid.
///
/// `dy` grows downwards, matching screen coordinates: `(0, -1)` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const RIGHT: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(-1, 0);
    pub const DOWN: Direction = Direction::new(0, 1);
    pub const UP: Direction = Direction::new(0, -1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);
    pub const UP_RIGHT: Direction = Direction::new(1, -1);
    pub const DOWN_LEFT: Direction = Direction::new(-1, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);

    /// All eight directions a word may run in.
    pub const ALL: [Direction; 8] = [
        Direction::RIGHT,
        Direction::LEFT,
        Direction::DOWN,
        Direction::UP,
        Direction::DOWN_RIGHT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
        Direction::UP_LEFT,
    ];

    /// The four axis-aligned neighbours of a chunk.
    pub const CARDINAL: [Direction; 4] = [
        Direction::UP,
        Direction::DOWN,
        Direction::LEFT,
        Direction::RIGHT,
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Build a direction from an arbitrary non-zero unit step.
    ///
    /// Returns `None` unless both components are in `-1..=1` and at least one
    /// of them is non-zero.
    pub fn from_step(dx: i32, dy: i32) -> Option<Self> {
        if (-1..=1).contains(&dx) && (-1..=1).contains(&dy) && (dx, dy) != (0, 0) {
            Some(Self { dx, dy })
        } else {
            None
        }
    }

    pub fn is_cardinal(&self) -> bool {
        (self.dx == 0) != (self.dy == 0)
    }

    pub fn reversed(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// A cardinal direction together with the two diagonals that share its
    /// forward component, e.g. `RIGHT` yields `RIGHT, DOWN_RIGHT, UP_RIGHT`.
    ///
    /// For a diagonal input only the direction itself is returned.
    pub fn with_diagonals(&self) -> Vec<Direction> {
        if self.dx != 0 && self.dy == 0 {
            vec![*self, Direction::new(self.dx, 1), Direction::new(self.dx, -1)]
        } else if self.dy != 0 && self.dx == 0 {
            vec![*self, Direction::new(1, self.dy), Direction::new(-1, self.dy)]
        } else {
            vec![*self]
        }
    }
}
