use crate::csp::dictionary::Dictionary;
use crate::csp::graph::ConstraintGraph;
use crate::csp::variable::{VarId, WordId};
use core::ops::Index;

/// A partial mapping from variables to words.
///
/// Only variables currently committed by the search are present; a failed
/// binding is removed with [`Assignment::unassign`], never left behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
    assigned: usize,
}

impl Index<VarId> for Assignment {
    type Output = Option<WordId>;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.words[index]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            words: vec![None; num_vars],
            assigned: 0,
        }
    }

    pub fn assign(&mut self, var: VarId, word: WordId) {
        if self.words[var].replace(word).is_none() {
            self.assigned += 1;
        }
    }

    pub fn unassign(&mut self, var: VarId) -> Option<WordId> {
        let previous = self.words[var].take();
        if previous.is_some() {
            self.assigned -= 1;
        }
        previous
    }

    #[must_use]
    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.words.get(var).copied().flatten()
    }

    #[must_use]
    pub fn is_assigned(&self, var: VarId) -> bool {
        self.get(var).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.assigned
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.words.len()
    }

    /// Assigned `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }

    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.is_none().then_some(var))
    }

    /// Checks the binding of `var` against every other binding.
    ///
    /// Holds iff the word has the slot's length, no other variable uses the
    /// same word, and every assigned neighbor agrees on the shared cell. An
    /// unassigned `var` is trivially consistent.
    #[must_use]
    pub fn is_consistent_with(
        &self,
        var: VarId,
        graph: &ConstraintGraph,
        dictionary: &Dictionary,
    ) -> bool {
        let Some(word) = self.get(var) else {
            return true;
        };

        if dictionary.word_len(word) != graph.length(var) {
            return false;
        }

        if self.iter().any(|(other, w)| other != var && w == word) {
            return false;
        }

        graph.neighbors(var).iter().all(|n| match self.get(n.var) {
            Some(other) => {
                let mine = dictionary.letter(word, n.overlap.x);
                mine.is_some() && mine == dictionary.letter(other, n.overlap.y)
            }
            None => true,
        })
    }

    /// Full consistency check over every binding.
    #[must_use]
    pub fn is_consistent(&self, graph: &ConstraintGraph, dictionary: &Dictionary) -> bool {
        self.iter()
            .all(|(var, _)| self.is_consistent_with(var, graph, dictionary))
    }
}
