//! The structural model the solver consumes.
//!
//! Anything that can describe its slots, its word list and how slots cross can
//! be solved. [`Crossword`](crate::crossword::Crossword) is the model built from
//! grid and word files; tests build small models by hand.

use crate::csp::variable::{Overlap, VarId, Variable};

pub trait Puzzle {
    /// All slots of the puzzle. A slot's position in this slice is its [`VarId`].
    fn variables(&self) -> &[Variable];

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// The candidate words every domain starts from.
    fn words(&self) -> &[String];

    /// Positions that must agree between `x` and `y`, or `None` if they do not
    /// cross. `overlap(y, x)` must be `overlap(x, y)` reversed.
    fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap>;

    /// Variables crossing `x`, in ascending id order.
    fn neighbors(&self, x: VarId) -> Vec<VarId> {
        (0..self.variables().len())
            .filter(|&y| y != x && self.overlap(x, y).is_some())
            .collect()
    }
}
