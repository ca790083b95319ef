#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::assignment::Assignment;
use crate::csp::dictionary::Dictionary;
use crate::csp::domain::Domains;
use crate::csp::graph::ConstraintGraph;
use crate::csp::variable::{VarId, WordId};
use clap::ValueEnum;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

pub trait ValueOrdering {
    /// The words of `var`'s domain in the order the search should try them.
    /// Domains are only read.
    fn order(
        &self,
        var: VarId,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId>;
}

/// Least-constraining value: words that rule out the fewest candidates of the
/// unassigned neighbors come first; equal scores keep domain order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastConstrainingValue;

impl LeastConstrainingValue {
    /// How many words each candidate of `var` would eliminate.
    #[must_use]
    pub fn scores(
        var: VarId,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<(WordId, usize)> {
        // per unassigned neighbor: (index into var's word, domain size,
        // how many of its words carry each letter on the shared cell)
        let neighbors = graph
            .neighbors(var)
            .iter()
            .filter(|n| !assignment.is_assigned(n.var))
            .map(|n| {
                let mut counts: FxHashMap<char, usize> = FxHashMap::default();
                for word in domains.iter(n.var) {
                    if let Some(c) = dictionary.letter(word, n.overlap.y) {
                        *counts.entry(c).or_default() += 1;
                    }
                }
                (n.overlap.x, domains.len(n.var), counts)
            })
            .collect_vec();

        domains
            .iter(var)
            .map(|word| {
                let ruled_out = neighbors
                    .iter()
                    .map(|(index, size, counts)| {
                        let agreeing = dictionary
                            .letter(word, *index)
                            .and_then(|c| counts.get(&c).copied())
                            .unwrap_or(0);
                        size - agreeing
                    })
                    .sum();
                (word, ruled_out)
            })
            .collect()
    }
}

impl ValueOrdering for LeastConstrainingValue {
    fn order(
        &self,
        var: VarId,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        Self::scores(var, graph, dictionary, domains, assignment)
            .into_iter()
            .sorted_by_key(|&(_, ruled_out)| ruled_out)
            .map(|(word, _)| word)
            .collect()
    }
}

/// Words in dictionary order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn order(
        &self,
        var: VarId,
        _: &ConstraintGraph,
        _: &Dictionary,
        domains: &Domains,
        _: &Assignment,
    ) -> Vec<WordId> {
        domains.iter(var).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrderingImpls {
    LeastConstrainingValue(LeastConstrainingValue),
    DomainOrder(DomainOrder),
}

impl Default for ValueOrderingImpls {
    fn default() -> Self {
        Self::LeastConstrainingValue(LeastConstrainingValue)
    }
}

impl ValueOrdering for ValueOrderingImpls {
    fn order(
        &self,
        var: VarId,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        match self {
            Self::LeastConstrainingValue(o) => o.order(var, graph, dictionary, domains, assignment),
            Self::DomainOrder(o) => o.order(var, graph, dictionary, domains, assignment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum ValueOrderingType {
    #[default]
    Lcv,
    Domain,
}

impl Display for ValueOrderingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

impl ValueOrderingType {
    #[must_use]
    pub const fn to_impl(self) -> ValueOrderingImpls {
        match self {
            Self::Lcv => ValueOrderingImpls::LeastConstrainingValue(LeastConstrainingValue),
            Self::Domain => ValueOrderingImpls::DomainOrder(DomainOrder),
        }
    }
}
