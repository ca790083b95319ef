#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Node and arc consistency.
//!
//! Both run once, before search, and prune the [`Domains`] destructively.
//! Arc consistency comes in two strategies behind the [`Propagator`] trait:
//!
//! - [`Ac3`] keeps a work queue and only revisits arcs into a variable whose
//!   domain just shrank.
//! - [`SweepToFixpoint`] revises every arc of the worklist again and again until
//!   a whole sweep removes nothing. Simpler, and quadratic in the number of arcs
//!   in the worst case.
//!
//! Both reach the same fixpoint, so they leave identical domains behind.

use crate::csp::dictionary::Dictionary;
use crate::csp::domain::Domains;
use crate::csp::graph::{Arc, ConstraintGraph};
use clap::ValueEnum;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

/// Removes every word whose length differs from its variable's length.
///
/// Returns the number of words removed. Applying it twice removes nothing the
/// second time.
pub fn enforce_node_consistency(
    graph: &ConstraintGraph,
    dictionary: &Dictionary,
    domains: &mut Domains,
) -> usize {
    (0..graph.num_vars())
        .map(|var| {
            let length = graph.length(var);
            domains.retain(var, |word| dictionary.word_len(word) == length)
        })
        .sum()
}

/// Makes `x` arc consistent with `y`.
///
/// Removes from `x`'s domain each word without a supporting word in `y`'s
/// domain, one carrying the same character on the shared cell. Returns whether
/// anything was removed; variables that do not cross are left alone.
pub fn revise(
    graph: &ConstraintGraph,
    dictionary: &Dictionary,
    domains: &mut Domains,
    x: usize,
    y: usize,
) -> bool {
    let Some(overlap) = graph.overlap(x, y) else {
        return false;
    };

    let supported: FxHashSet<char> = domains
        .iter(y)
        .filter_map(|word| dictionary.letter(word, overlap.y))
        .collect();

    let removed = domains.retain(x, |word| {
        dictionary
            .letter(word, overlap.x)
            .is_some_and(|c| supported.contains(&c))
    });

    removed > 0
}

pub trait Propagator {
    /// Revises `arcs` until no domain changes.
    ///
    /// Returns `false` if some domain ended up empty, meaning the puzzle has no
    /// solution.
    fn propagate(
        &mut self,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &mut Domains,
        arcs: Vec<Arc>,
    ) -> bool;

    /// Number of `revise` calls made so far.
    fn revisions(&self) -> usize;
}

/// Queue-based AC-3.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ac3 {
    revisions: usize,
}

impl Propagator for Ac3 {
    fn propagate(
        &mut self,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &mut Domains,
        arcs: Vec<Arc>,
    ) -> bool {
        let mut queued: FxHashSet<Arc> = arcs.iter().copied().collect();
        let mut queue: VecDeque<Arc> = arcs.into_iter().collect();

        while let Some((x, y)) = queue.pop_front() {
            queued.remove(&(x, y));
            self.revisions += 1;

            if !revise(graph, dictionary, domains, x, y) {
                continue;
            }

            log::trace!("ac3: revised ({x}, {y}), {} words left in {x}", domains.len(x));

            for n in graph.neighbors(x) {
                let arc = (n.var, x);
                if n.var != y && queued.insert(arc) {
                    queue.push_back(arc);
                }
            }
        }

        !domains.any_empty()
    }

    fn revisions(&self) -> usize {
        self.revisions
    }
}

/// Repeatedly sweeps the whole worklist until a sweep changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepToFixpoint {
    revisions: usize,
    sweeps: usize,
}

impl SweepToFixpoint {
    #[must_use]
    pub const fn sweeps(&self) -> usize {
        self.sweeps
    }
}

impl Propagator for SweepToFixpoint {
    fn propagate(
        &mut self,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &mut Domains,
        arcs: Vec<Arc>,
    ) -> bool {
        loop {
            self.sweeps += 1;
            let mut changed = false;

            for &(x, y) in &arcs {
                self.revisions += 1;
                changed |= revise(graph, dictionary, domains, x, y);
            }

            if !changed {
                break;
            }
        }

        !domains.any_empty()
    }

    fn revisions(&self) -> usize {
        self.revisions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagatorImpls {
    Ac3(Ac3),
    Sweep(SweepToFixpoint),
}

impl Default for PropagatorImpls {
    fn default() -> Self {
        Self::Ac3(Ac3::default())
    }
}

impl Propagator for PropagatorImpls {
    fn propagate(
        &mut self,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
        domains: &mut Domains,
        arcs: Vec<Arc>,
    ) -> bool {
        match self {
            Self::Ac3(p) => p.propagate(graph, dictionary, domains, arcs),
            Self::Sweep(p) => p.propagate(graph, dictionary, domains, arcs),
        }
    }

    fn revisions(&self) -> usize {
        match self {
            Self::Ac3(p) => p.revisions(),
            Self::Sweep(p) => p.revisions(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum PropagatorType {
    #[default]
    Ac3,
    Sweep,
}

impl Display for PropagatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ac3 => write!(f, "ac3"),
            Self::Sweep => write!(f, "sweep"),
        }
    }
}

impl PropagatorType {
    #[must_use]
    pub fn to_impl(self) -> PropagatorImpls {
        match self {
            Self::Ac3 => PropagatorImpls::Ac3(Ac3::default()),
            Self::Sweep => PropagatorImpls::Sweep(SweepToFixpoint::default()),
        }
    }
}
