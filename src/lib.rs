//! A crossword filler built on a constraint satisfaction solver.
//!
//! Slots of the grid are variables, the word list is the shared domain, and
//! crossing slots constrain each other through the letter on their shared
//! cell. Solving prunes the domains with node and arc consistency and then
//! runs a backtracking search with pluggable heuristics.

/// The constraint satisfaction core: domains, propagation, heuristics and
/// backtracking search over any [`csp::puzzle::Puzzle`].
pub mod csp;

/// Crossword grids read from structure and word files, and rendering of
/// filled grids.
pub mod crossword;

/// Logger setup for the command line tool.
pub mod logging;
