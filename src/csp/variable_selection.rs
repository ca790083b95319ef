#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::assignment::Assignment;
use crate::csp::domain::Domains;
use crate::csp::graph::ConstraintGraph;
use crate::csp::variable::VarId;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

pub trait VariableSelection {
    /// Picks the next variable to branch on, or `None` if all are assigned.
    fn pick(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId>;
}

/// Fewest remaining values first, ties broken by highest degree, then by
/// lowest id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumRemainingValues;

impl VariableSelection for MinimumRemainingValues {
    fn pick(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        // min_by_key keeps the first of equal keys, so id order settles ties
        assignment
            .unassigned()
            .min_by_key(|&var| (domains.len(var), std::cmp::Reverse(graph.degree(var))))
    }
}

/// First unassigned variable in id order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&self, _: &ConstraintGraph, _: &Domains, assignment: &Assignment) -> Option<VarId> {
        assignment.unassigned().next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSelectionImpls {
    MinimumRemainingValues(MinimumRemainingValues),
    FixedOrder(FixedOrder),
}

impl Default for VariableSelectionImpls {
    fn default() -> Self {
        Self::MinimumRemainingValues(MinimumRemainingValues)
    }
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(
        &self,
        graph: &ConstraintGraph,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        match self {
            Self::MinimumRemainingValues(s) => s.pick(graph, domains, assignment),
            Self::FixedOrder(s) => s.pick(graph, domains, assignment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    Mrv,
    Fixed,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

impl VariableSelectionType {
    #[must_use]
    pub const fn to_impl(self) -> VariableSelectionImpls {
        match self {
            Self::Mrv => VariableSelectionImpls::MinimumRemainingValues(MinimumRemainingValues),
            Self::Fixed => VariableSelectionImpls::FixedOrder(FixedOrder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::test_support::TestPuzzle;
    use crate::csp::variable::{Direction, Overlap, Variable};

    /// A star: variable 1 crosses 0 and 2, variable 3 stands alone.
    fn star() -> ConstraintGraph {
        let puzzle = TestPuzzle::new(
            vec![
                Variable::new(0, 0, Direction::Down, 3),
                Variable::new(1, 0, Direction::Across, 3),
                Variable::new(0, 2, Direction::Down, 3),
                Variable::new(6, 6, Direction::Across, 3),
            ],
            &[],
        )
        .with_overlap(0, 1, Overlap::new(1, 0))
        .with_overlap(2, 1, Overlap::new(1, 2));
        ConstraintGraph::new(&puzzle).unwrap()
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let graph = star();
        let mut domains = Domains::new(4, 5);
        domains.remove(3, 0);
        let assignment = Assignment::new(4);

        assert_eq!(MinimumRemainingValues.pick(&graph, &domains, &assignment), Some(3));
    }

    #[test]
    fn test_mrv_ties_broken_by_degree() {
        let graph = star();
        let domains = Domains::new(4, 5);
        let assignment = Assignment::new(4);

        assert_eq!(MinimumRemainingValues.pick(&graph, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_mrv_remaining_ties_use_id_order() {
        let graph = star();
        let domains = Domains::new(4, 5);
        let mut assignment = Assignment::new(4);
        assignment.assign(1, 0);

        assert_eq!(MinimumRemainingValues.pick(&graph, &domains, &assignment), Some(0));
    }

    #[test]
    fn test_all_assigned() {
        let graph = star();
        let domains = Domains::new(4, 5);
        let mut assignment = Assignment::new(4);
        for var in 0..4 {
            assignment.assign(var, var);
        }

        assert_eq!(MinimumRemainingValues.pick(&graph, &domains, &assignment), None);
        assert_eq!(FixedOrder.pick(&graph, &domains, &assignment), None);
    }

    #[test]
    fn test_fixed_order() {
        let graph = star();
        let domains = Domains::new(4, 5);
        let mut assignment = Assignment::new(4);
        assignment.assign(0, 0);

        let selector = VariableSelectionType::Fixed.to_impl();
        assert_eq!(selector.pick(&graph, &domains, &assignment), Some(1));
    }
}
