#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::variable::{VarId, WordId};
use bit_vec::BitVec;
use std::ops::Index;

/// A single variable's candidate set: a bit per dictionary word plus a cached
/// count so that size queries stay O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    bits: BitVec,
    size: usize,
}

impl Domain {
    #[must_use]
    pub fn full(num_words: usize) -> Self {
        Self {
            bits: BitVec::from_elem(num_words, true),
            size: num_words,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn contains(&self, word: WordId) -> bool {
        self.bits.get(word).unwrap_or(false)
    }

    /// Removes `word`, returning whether it was present.
    pub fn remove(&mut self, word: WordId) -> bool {
        if !self.contains(word) {
            return false;
        }
        self.bits.set(word, false);
        self.size -= 1;
        true
    }

    /// Candidate words in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(word, present)| present.then_some(word))
    }
}

/// The domain store: one [`Domain`] per variable, all seeded with the full
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains(Vec<Domain>);

impl Domains {
    #[must_use]
    pub fn new(num_vars: usize, num_words: usize) -> Self {
        Self(vec![Domain::full(num_words); num_vars])
    }

    #[must_use]
    pub fn len(&self, var: VarId) -> usize {
        self.0[var].len()
    }

    #[must_use]
    pub fn contains(&self, var: VarId, word: WordId) -> bool {
        self.0[var].contains(word)
    }

    pub fn remove(&mut self, var: VarId, word: WordId) -> bool {
        self.0[var].remove(word)
    }

    /// Removes every word of `var`'s domain rejected by `keep`, returning how
    /// many were removed.
    pub fn retain<F: FnMut(WordId) -> bool>(&mut self, var: VarId, mut keep: F) -> usize {
        let doomed: Vec<WordId> = self.0[var].iter().filter(|&w| !keep(w)).collect();
        for &word in &doomed {
            self.0[var].remove(word);
        }
        doomed.len()
    }

    pub fn iter(&self, var: VarId) -> impl Iterator<Item = WordId> + '_ {
        self.0[var].iter()
    }

    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.0.iter().any(Domain::is_empty)
    }

    /// Sum of all domain sizes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(Domain::len).sum()
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len()
    }
}

impl Index<VarId> for Domains {
    type Output = Domain;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.0[index]
    }
}
