use crate::crossword::render::LetterGrid;
use crate::csp::error::PuzzleError;
use crate::csp::puzzle::Puzzle;
use crate::csp::variable::{Direction, Overlap, VarId, Variable};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::path::Path;

/// Marks an open cell in a structure file; anything else is a block.
pub const OPEN_CELL: char = '_';

/// A crossword grid together with its word list.
///
/// Slots are discovered from the grid: every maximal run of two or more open
/// cells, across or down, is a [`Variable`]. Cells are scanned row by row and
/// a cell starting both a down and an across run yields the down slot first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    structure: Vec<Vec<bool>>,
    width: usize,
    height: usize,
    variables: Vec<Variable>,
    words: Vec<String>,
    overlaps: FxHashMap<(VarId, VarId), Overlap>,
    neighbors: Vec<Vec<VarId>>,
}

impl Crossword {
    /// Builds a crossword from the text of a structure file and of a word
    /// list.
    ///
    /// # Errors
    ///
    /// If the structure has no cells or the word list has no words.
    pub fn new(structure: &str, words: &str) -> Result<Self, PuzzleError> {
        let structure = parse_structure(structure)?;
        let words = parse_words(words);
        if words.is_empty() {
            return Err(PuzzleError::EmptyDictionary);
        }

        let height = structure.len();
        let width = structure.first().map_or(0, Vec::len);
        let variables = find_variables(&structure);
        let overlaps = find_overlaps(&variables);

        let mut neighbors = vec![Vec::new(); variables.len()];
        for &(x, y) in overlaps.keys() {
            neighbors[x].push(y);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            structure,
            width,
            height,
            variables,
            words,
            overlaps,
            neighbors,
        })
    }

    /// Reads the structure and word list from disk.
    ///
    /// # Errors
    ///
    /// If either file cannot be read, or see [`Crossword::new`].
    pub fn from_files<S: AsRef<Path>, W: AsRef<Path>>(
        structure: S,
        words: W,
    ) -> Result<Self, PuzzleError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|e| PuzzleError::io(path, e))
        };

        Self::new(&read(structure.as_ref())?, &read(words.as_ref())?)
    }

    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn structure(&self) -> &[Vec<bool>] {
        &self.structure
    }
}

impl Puzzle for Crossword {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    fn neighbors(&self, x: VarId) -> Vec<VarId> {
        self.neighbors.get(x).cloned().unwrap_or_default()
    }
}

impl Display for Crossword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", LetterGrid::blank(self))
    }
}

/// Parses a structure file into a grid of open (`true`) and blocked cells.
///
/// Rows shorter than the longest one are padded with blocked cells.
///
/// # Errors
///
/// If there are no rows or every row is empty.
pub fn parse_structure(text: &str) -> Result<Vec<Vec<bool>>, PuzzleError> {
    let rows = text
        .lines()
        .map(|line| line.chars().map(|c| c == OPEN_CELL).collect_vec())
        .collect_vec();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(PuzzleError::EmptyStructure);
    }

    Ok(rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, false);
            row
        })
        .collect())
}

/// Parses a word list: one word per line, trimmed and upper-cased, blank
/// lines skipped, duplicates dropped.
#[must_use]
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .unique()
        .collect()
}

fn find_variables(structure: &[Vec<bool>]) -> Vec<Variable> {
    let open = |row: usize, col: usize| {
        structure
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    };
    let run = |row: usize, col: usize, direction: Direction| {
        let start = Variable::new(row, col, direction, 0);
        let length = (0..)
            .take_while(|&k| {
                let (r, c) = start.cell(k);
                open(r, c)
            })
            .count();
        Variable::new(row, col, direction, length)
    };

    let mut variables = Vec::new();
    for (row, cells) in structure.iter().enumerate() {
        for (col, &is_open) in cells.iter().enumerate() {
            if !is_open {
                continue;
            }

            if row == 0 || !open(row - 1, col) {
                let down = run(row, col, Direction::Down);
                if down.length > 1 {
                    variables.push(down);
                }
            }

            if col == 0 || !open(row, col - 1) {
                let across = run(row, col, Direction::Across);
                if across.length > 1 {
                    variables.push(across);
                }
            }
        }
    }

    variables
}

fn find_overlaps(variables: &[Variable]) -> FxHashMap<(VarId, VarId), Overlap> {
    let mut cells: FxHashMap<(usize, usize), Vec<(VarId, usize)>> = FxHashMap::default();
    for (var, variable) in variables.iter().enumerate() {
        for (k, cell) in variable.cells().enumerate() {
            cells.entry(cell).or_default().push((var, k));
        }
    }

    let mut overlaps = FxHashMap::default();
    for slots in cells.values() {
        for (&(x, ix), &(y, iy)) in slots.iter().tuple_combinations() {
            overlaps.insert((x, y), Overlap::new(ix, iy));
            overlaps.insert((y, x), Overlap::new(iy, ix));
        }
    }

    overlaps
}
