//! Immutable lookup tables derived from a [`Puzzle`].
//!
//! The graph is built once per solve. Building it is where a malformed puzzle
//! is caught: every contract listed on [`Puzzle`] is checked here, so the
//! propagation and search code can index without further validation.

use crate::csp::error::PuzzleError;
use crate::csp::puzzle::Puzzle;
use crate::csp::variable::{Overlap, VarId, Variable};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// One edge of the overlap graph, seen from the variable that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub var: VarId,
    pub overlap: Overlap,
}

/// An ordered pair of neighboring variables, `(x, y)`.
pub type Arc = (VarId, VarId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    variables: Vec<Variable>,
    neighbors: Vec<SmallVec<[Neighbor; 8]>>,
}

impl ConstraintGraph {
    /// Precomputes and validates the neighbor and overlap tables of `puzzle`.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] describing the first broken contract: a
    /// zero-length or duplicated variable, a neighbor outside the arena or
    /// equal to the variable itself, a neighbor pair without an overlap, an
    /// overlap index outside either word, or an asymmetric overlap.
    pub fn new<P: Puzzle + ?Sized>(puzzle: &P) -> Result<Self, PuzzleError> {
        let variables = puzzle.variables().to_vec();
        let count = variables.len();

        let mut slots = FxHashMap::default();
        for (var, variable) in variables.iter().enumerate() {
            if variable.length == 0 {
                return Err(PuzzleError::ZeroLength {
                    var,
                    variable: *variable,
                });
            }
            if let Some(&first) = slots.get(variable) {
                return Err(PuzzleError::DuplicateVariable {
                    first,
                    second: var,
                    variable: *variable,
                });
            }
            slots.insert(*variable, var);
        }

        let mut neighbors = Vec::with_capacity(count);
        for x in 0..count {
            let mut list = SmallVec::new();
            for y in puzzle.neighbors(x) {
                if y >= count {
                    return Err(PuzzleError::UnknownNeighbor {
                        var: x,
                        neighbor: y,
                        count,
                    });
                }
                if y == x {
                    return Err(PuzzleError::SelfOverlap { var: x });
                }

                let overlap = puzzle
                    .overlap(x, y)
                    .ok_or(PuzzleError::MissingOverlap { x, y })?;

                if overlap.x >= variables[x].length || overlap.y >= variables[y].length {
                    return Err(PuzzleError::OverlapOutOfRange {
                        x,
                        y,
                        ix: overlap.x,
                        iy: overlap.y,
                    });
                }
                if puzzle.overlap(y, x) != Some(overlap.reversed()) {
                    return Err(PuzzleError::AsymmetricOverlap { x, y });
                }

                list.push(Neighbor { var: y, overlap });
            }
            neighbors.push(list);
        }

        Ok(Self {
            variables,
            neighbors,
        })
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var]
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn length(&self, var: VarId) -> usize {
        self.variables[var].length
    }

    #[must_use]
    pub fn neighbors(&self, var: VarId) -> &[Neighbor] {
        &self.neighbors[var]
    }

    #[must_use]
    pub fn degree(&self, var: VarId) -> usize {
        self.neighbors[var].len()
    }

    #[must_use]
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.neighbors[x]
            .iter()
            .find(|n| n.var == y)
            .map(|n| n.overlap)
    }

    /// Every ordered pair of neighbors, in both directions.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(x, list)| list.iter().map(move |n| (x, n.var)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::test_support::TestPuzzle;
    use crate::csp::variable::Direction;

    fn crossing() -> TestPuzzle {
        TestPuzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
                Variable::new(5, 5, Direction::Across, 2),
            ],
            &["CAT"],
        )
        .with_overlap(0, 1, Overlap::new(0, 0))
    }

    #[test]
    fn test_neighbors_and_arcs() {
        let graph = ConstraintGraph::new(&crossing()).unwrap();

        assert_eq!(graph.num_vars(), 3);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(2), 0);
        assert_eq!(graph.overlap(1, 0), Some(Overlap::new(0, 0)));
        assert_eq!(graph.overlap(0, 2), None);
        assert_eq!(graph.arcs().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_rejects_zero_length() {
        let puzzle = TestPuzzle::new(vec![Variable::new(0, 0, Direction::Down, 0)], &["A"]);

        assert!(matches!(
            ConstraintGraph::new(&puzzle),
            Err(PuzzleError::ZeroLength { var: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_slot() {
        let puzzle = TestPuzzle::new(
            vec![
                Variable::new(1, 1, Direction::Down, 3),
                Variable::new(1, 1, Direction::Down, 4),
            ],
            &["CAT"],
        );

        assert!(matches!(
            ConstraintGraph::new(&puzzle),
            Err(PuzzleError::DuplicateVariable {
                first: 0,
                second: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_overlap() {
        let puzzle = TestPuzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
            ],
            &["CAT"],
        )
        .with_overlap(0, 1, Overlap::new(3, 0));

        assert!(matches!(
            ConstraintGraph::new(&puzzle),
            Err(PuzzleError::OverlapOutOfRange { x: 0, y: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_asymmetric_overlap() {
        let puzzle = TestPuzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
            ],
            &["CAT"],
        )
        .with_directed_overlap(0, 1, Overlap::new(0, 0))
        .with_directed_overlap(1, 0, Overlap::new(1, 0));

        assert!(matches!(
            ConstraintGraph::new(&puzzle),
            Err(PuzzleError::AsymmetricOverlap { .. })
        ));
    }
}
