//! Backtracking search over partial assignments.
//!
//! Solving happens in two phases:
//!
//! 1.  **Preprocessing:** node consistency drops words of the wrong length,
//!     then arc consistency drops words with no support in a crossing slot. If
//!     any domain is emptied the puzzle is unsatisfiable and search never starts.
//! 2.  **Search:** depth-first over partial assignments. Each level picks a
//!     variable with the configured [`VariableSelection`], tries its words in the
//!     order given by the configured [`ValueOrdering`] and recurses on every
//!     consistent choice. The domains are frozen during this phase; the
//!     assignment is the only state that changes.
//!
//! A binding that fails, either because it is inconsistent or because the
//! recursion below it fails, is removed before the next word is tried, so the
//! assignment always holds exactly the committed variables.

use crate::csp::assignment::Assignment;
use crate::csp::dictionary::Dictionary;
use crate::csp::domain::Domains;
use crate::csp::error::PuzzleError;
use crate::csp::graph::{Arc, ConstraintGraph};
use crate::csp::propagation::{enforce_node_consistency, Propagator};
use crate::csp::puzzle::Puzzle;
use crate::csp::solver::{DefaultConfig, Solution, SolutionStats, Solver, SolverConfig};
use crate::csp::value_ordering::ValueOrdering;
use crate::csp::variable_selection::VariableSelection;

/// A backtracking crossword solver.
///
/// Generic over `Config`, which picks the variable selection, value ordering
/// and propagation strategies.
#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    /// Lengths, neighbors and overlaps of every variable.
    pub graph: ConstraintGraph,
    pub dictionary: Dictionary,
    /// Candidate words per variable. Pruned before search, read-only after.
    pub domains: Domains,
    pub selector: Config::VariableSelector,
    pub ordering: Config::ValueOrder,
    pub propagator: Config::Propagator,
    stats: SolutionStats,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new<P: Puzzle + ?Sized>(puzzle: &P) -> Result<Self, PuzzleError> {
        Self::from_parts(
            puzzle,
            Config::VariableSelector::default(),
            Config::ValueOrder::default(),
            Config::Propagator::default(),
        )
    }

    /// Enforces node and arc consistency, then searches from an empty
    /// assignment.
    ///
    /// # Returns
    ///
    /// * `Some(Solution)`: a complete, consistent assignment.
    /// * `None`: consistency enforcement emptied a domain, or the search
    ///   exhausted every candidate.
    fn solve(&mut self) -> Option<Solution> {
        self.enforce_node_consistency();

        if !self.enforce_arc_consistency(None) {
            log::debug!("arc consistency emptied a domain, skipping search");
            return None;
        }

        let mut assignment = Assignment::new(self.graph.num_vars());
        if self.backtrack(&mut assignment) {
            Some(self.to_solution(&assignment))
        } else {
            log::debug!(
                "search exhausted after {} decisions",
                self.stats.decisions
            );
            None
        }
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            revisions: self.propagator.revisions(),
            ..self.stats
        }
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// Builds a solver from explicitly chosen strategies.
    ///
    /// # Errors
    ///
    /// Fails if the puzzle breaks one of the [`Puzzle`] contracts.
    pub fn from_parts<P: Puzzle + ?Sized>(
        puzzle: &P,
        selector: Config::VariableSelector,
        ordering: Config::ValueOrder,
        propagator: Config::Propagator,
    ) -> Result<Self, PuzzleError> {
        let graph = ConstraintGraph::new(puzzle)?;
        let dictionary = Dictionary::new(puzzle.words());
        let domains = Domains::new(graph.num_vars(), dictionary.len());

        log::debug!(
            "{} variables, {} arcs, {} words",
            graph.num_vars(),
            graph.arcs().count(),
            dictionary.len()
        );

        Ok(Self {
            graph,
            dictionary,
            domains,
            selector,
            ordering,
            propagator,
            stats: SolutionStats::default(),
        })
    }

    /// Removes words whose length does not fit their variable.
    pub fn enforce_node_consistency(&mut self) -> usize {
        let removed = enforce_node_consistency(&self.graph, &self.dictionary, &mut self.domains);
        self.stats.node_pruned += removed;
        log::debug!("node consistency removed {removed} words");
        removed
    }

    /// Propagates arc consistency from `arcs`, or from every arc of the graph
    /// when `None`.
    ///
    /// Returns `false` if a domain ended up empty.
    pub fn enforce_arc_consistency(&mut self, arcs: Option<Vec<Arc>>) -> bool {
        let arcs = arcs.unwrap_or_else(|| self.graph.arcs().collect());
        let before = self.domains.total();

        let consistent =
            self.propagator
                .propagate(&self.graph, &self.dictionary, &mut self.domains, arcs);

        let removed = before - self.domains.total();
        self.stats.arc_pruned += removed;
        log::debug!(
            "arc consistency removed {removed} words after {} revisions",
            self.propagator.revisions()
        );

        consistent
    }

    /// Extends `assignment` to a complete consistent assignment.
    ///
    /// Returns `true` with `assignment` complete on success. On failure it
    /// returns `false` and leaves `assignment` exactly as it was on entry.
    pub fn backtrack(&mut self, assignment: &mut Assignment) -> bool {
        if assignment.is_complete() {
            return true;
        }

        let Some(var) = self
            .selector
            .pick(&self.graph, &self.domains, assignment)
        else {
            return false;
        };

        if self.domains.len(var) == 0 {
            return false;
        }

        let depth = assignment.len() + 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let values = self.ordering.order(
            var,
            &self.graph,
            &self.dictionary,
            &self.domains,
            assignment,
        );

        for word in values {
            self.stats.decisions += 1;
            assignment.assign(var, word);
            log::trace!(
                "depth {depth}: trying {} for {}",
                self.dictionary.word(word),
                self.graph.variable(var)
            );

            self.stats.consistency_checks += 1;
            if assignment.is_consistent_with(var, &self.graph, &self.dictionary)
                && self.backtrack(assignment)
            {
                return true;
            }

            assignment.unassign(var);
            self.stats.backtracks += 1;
        }

        false
    }

    fn to_solution(&self, assignment: &Assignment) -> Solution {
        Solution::new(
            assignment
                .iter()
                .map(|(var, word)| {
                    (
                        *self.graph.variable(var),
                        self.dictionary.word(word).to_owned(),
                    )
                })
                .collect(),
        )
    }
}
