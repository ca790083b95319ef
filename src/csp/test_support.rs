//! Hand-built puzzles for unit tests.

use crate::csp::puzzle::Puzzle;
use crate::csp::variable::{Overlap, VarId, Variable};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct TestPuzzle {
    variables: Vec<Variable>,
    words: Vec<String>,
    overlaps: FxHashMap<(VarId, VarId), Overlap>,
}

impl TestPuzzle {
    pub fn new(variables: Vec<Variable>, words: &[&str]) -> Self {
        Self {
            variables,
            words: words.iter().map(ToString::to_string).collect(),
            overlaps: FxHashMap::default(),
        }
    }

    /// Records `overlap` for `(x, y)` and its reverse for `(y, x)`.
    pub fn with_overlap(self, x: VarId, y: VarId, overlap: Overlap) -> Self {
        self.with_directed_overlap(x, y, overlap)
            .with_directed_overlap(y, x, overlap.reversed())
    }

    pub fn with_directed_overlap(mut self, x: VarId, y: VarId, overlap: Overlap) -> Self {
        self.overlaps.insert((x, y), overlap);
        self
    }
}

impl Puzzle for TestPuzzle {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn width(&self) -> usize {
        self.variables
            .iter()
            .flat_map(|v| v.cells().map(|(_, col)| col + 1).collect::<Vec<_>>())
            .max()
            .unwrap_or(0)
    }

    fn height(&self) -> usize {
        self.variables
            .iter()
            .flat_map(|v| v.cells().map(|(row, _)| row + 1).collect::<Vec<_>>())
            .max()
            .unwrap_or(0)
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }
}
