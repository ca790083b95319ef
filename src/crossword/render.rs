use crate::crossword::structure::Crossword;
use crate::csp::puzzle::Puzzle;
use crate::csp::solver::Solution;
use std::fmt::{Display, Formatter};

/// Drawn in place of a blocked cell.
pub const BLOCK: char = '█';

/// A crossword grid with letters written into its open cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid {
    /// `None` for blocked cells, `Some(' ')` for open cells without a letter.
    cells: Vec<Vec<Option<char>>>,
}

impl LetterGrid {
    /// The grid of `crossword` with every open cell empty.
    #[must_use]
    pub fn blank(crossword: &Crossword) -> Self {
        let cells = crossword
            .structure()
            .iter()
            .map(|row| row.iter().map(|&open| open.then_some(' ')).collect())
            .collect();

        Self { cells }
    }

    /// Writes every word of `solution` into its slot. Slots of `solution`
    /// that do not belong to `crossword` are ignored.
    #[must_use]
    pub fn new(crossword: &Crossword, solution: &Solution) -> Self {
        let mut grid = Self::blank(crossword);

        for (variable, word) in solution.iter() {
            if !crossword.variables().contains(variable) {
                continue;
            }
            for ((row, col), letter) in variable.cells().zip(word.chars()) {
                if let Some(Some(cell)) = grid.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *cell = letter;
                }
            }
        }

        grid
    }

    /// The letter in an open cell, `None` for blocked, empty or out of range
    /// cells.
    #[must_use]
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
            .filter(|&c| c != ' ')
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

impl Display for LetterGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.unwrap_or(BLOCK)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
