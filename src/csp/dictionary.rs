#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::variable::WordId;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::ops::Index;

type Letters = SmallVec<[char; 16]>;

/// The global word list, deduplicated in order of first appearance.
///
/// Words are addressed by [`WordId`] so domains can be stored as bit sets and
/// iterate in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    words: Vec<String>,
    letters: Vec<Letters>,
}

impl Dictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut dictionary = Self::default();

        for word in words {
            let word = word.as_ref();
            if seen.insert(word.to_owned()) {
                dictionary.letters.push(word.chars().collect());
                dictionary.words.push(word.to_owned());
            }
        }

        dictionary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    /// Length of a word in characters.
    #[must_use]
    pub fn word_len(&self, id: WordId) -> usize {
        self.letters[id].len()
    }

    /// The character at position `index` of a word.
    #[must_use]
    pub fn letter(&self, id: WordId, index: usize) -> Option<char> {
        self.letters[id].get(index).copied()
    }

    #[must_use]
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.words.iter().position(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> {
        self.words.iter().map(String::as_str).enumerate()
    }
}

impl Index<WordId> for Dictionary {
    type Output = str;

    fn index(&self, index: WordId) -> &Self::Output {
        self.word(index)
    }
}
