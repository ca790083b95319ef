#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Crossword slots and the geometry facts attached to them.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Index of a variable in the puzzle's variable arena.
pub type VarId = usize;

/// Index of a word in the [`Dictionary`](crate::csp::dictionary::Dictionary).
pub type WordId = usize;

/// The direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A slot in the grid.
///
/// Two variables are the same slot when they start on the same cell and run
/// in the same direction; the length does not take part in equality.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Direction the word runs in.
    pub direction: Direction,
    /// Number of cells.
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Grid coordinates of the `k`-th cell of the slot.
    #[must_use]
    pub const fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|k| self.cell(k))
    }

    const fn key(&self) -> (usize, usize, Direction) {
        (self.row, self.col, self.direction)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

/// Character positions that must agree where two slots cross.
///
/// `x` indexes into the word of the variable the overlap was queried from,
/// `y` into the word of the other variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Overlap {
    pub x: usize,
    pub y: usize,
}

impl Overlap {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The same overlap seen from the other variable.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}
