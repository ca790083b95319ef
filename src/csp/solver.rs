//! Solver plumbing shared by every search strategy.
//!
//! [`SolverConfig`] bundles the pluggable pieces (variable selection, value
//! ordering, arc-consistency propagation) into one type parameter, the way a
//! solver is specialized at compile time. [`DynamicConfig`] uses the
//! enum-dispatched `*Impls` types instead so that the pieces can be chosen at
//! run time from the command line.

use crate::csp::backtracking::Backtracking;
use crate::csp::error::PuzzleError;
use crate::csp::graph::ConstraintGraph;
use crate::csp::propagation::{Ac3, Propagator, PropagatorImpls};
use crate::csp::puzzle::Puzzle;
use crate::csp::value_ordering::{LeastConstrainingValue, ValueOrdering, ValueOrderingImpls};
use crate::csp::variable::{VarId, Variable};
use crate::csp::variable_selection::{
    MinimumRemainingValues, VariableSelection, VariableSelectionImpls,
};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

pub trait SolverConfig: Debug + Clone {
    type VariableSelector: VariableSelection + Debug + Clone + Default;
    type ValueOrder: ValueOrdering + Debug + Clone + Default;
    type Propagator: Propagator + Debug + Clone + Default;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrder = LeastConstrainingValue;
    type Propagator = Ac3;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type VariableSelector = VariableSelectionImpls;
    type ValueOrder = ValueOrderingImpls;
    type Propagator = PropagatorImpls;
}

pub trait Solver<C: SolverConfig = DefaultConfig> {
    /// Builds a solver for `puzzle`.
    ///
    /// # Errors
    ///
    /// Fails if the puzzle breaks one of the [`Puzzle`] contracts.
    fn new<P: Puzzle + ?Sized>(puzzle: &P) -> Result<Self, PuzzleError>
    where
        Self: Sized;

    /// Runs consistency enforcement and search. `None` means the puzzle has
    /// no solution with the given words.
    fn solve(&mut self) -> Option<Solution>;

    fn stats(&self) -> SolutionStats;
}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionStats {
    /// Words removed because their length did not fit the slot.
    pub node_pruned: usize,
    /// Words removed by arc consistency.
    pub arc_pruned: usize,
    /// Calls to `revise`.
    pub revisions: usize,
    /// Tentative assignments made by the search.
    pub decisions: usize,
    pub consistency_checks: usize,
    /// Bindings taken back after a failed or inconsistent branch.
    pub backtracks: usize,
    pub max_depth: usize,
}

/// A complete assignment, one word per variable in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    entries: Vec<(Variable, String)>,
}

impl Solution {
    #[must_use]
    pub const fn new(entries: Vec<(Variable, String)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn word(&self, var: VarId) -> Option<&str> {
        self.entries.get(var).map(|(_, word)| word.as_str())
    }

    /// Looks a word up by slot instead of by id.
    #[must_use]
    pub fn word_for(&self, variable: &Variable) -> Option<&str> {
        self.entries
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, word)| word.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &str)> {
        self.entries.iter().map(|(v, w)| (v, w.as_str()))
    }

    /// Checks the solution against the puzzle it claims to solve: every slot
    /// filled with a dictionary word of the right length, no word used twice,
    /// and crossing slots agreeing on every shared cell.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violation found.
    pub fn verify<P: Puzzle + ?Sized>(&self, puzzle: &P) -> Result<(), String> {
        let graph = ConstraintGraph::new(puzzle).map_err(|e| e.to_string())?;

        if self.len() != graph.num_vars() {
            return Err(format!(
                "{} of {} slots filled",
                self.len(),
                graph.num_vars()
            ));
        }

        let dictionary: FxHashSet<&str> = puzzle.words().iter().map(String::as_str).collect();
        let mut used = FxHashSet::default();

        for (var, (variable, word)) in self.entries.iter().enumerate() {
            if variable != graph.variable(var) {
                return Err(format!("slot {var} is {variable}, expected {}", graph.variable(var)));
            }
            if !dictionary.contains(word.as_str()) {
                return Err(format!("{word} is not in the word list"));
            }
            if word.chars().count() != variable.length {
                return Err(format!("{word} does not fit {variable}"));
            }
            if !used.insert(word.as_str()) {
                return Err(format!("{word} is used more than once"));
            }
        }

        for (x, y) in graph.arcs() {
            let overlap = graph.overlap(x, y).ok_or("missing overlap")?;
            let a = self.entries[x].1.chars().nth(overlap.x);
            let b = self.entries[y].1.chars().nth(overlap.y);
            if a != b {
                return Err(format!(
                    "{} and {} disagree where they cross",
                    self.entries[x].1, self.entries[y].1
                ));
            }
        }

        Ok(())
    }
}

impl Index<VarId> for Solution {
    type Output = str;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.entries[index].1
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = self
            .entries
            .iter()
            .map(|(variable, word)| format!("{variable} = {word}"))
            .join("\n");
        write!(f, "{lines}")
    }
}

/// Solves `puzzle` with the default heuristics.
///
/// # Errors
///
/// Only a malformed puzzle is an error; an unsatisfiable one yields
/// `Ok(None)`.
pub fn solve<P: Puzzle + ?Sized>(puzzle: &P) -> Result<Option<Solution>, PuzzleError> {
    let mut solver: Backtracking = Solver::new(puzzle)?;
    Ok(solver.solve())
}
