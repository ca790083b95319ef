//! Crossword grids: parsing structure and word files into a [`Puzzle`] and
//! drawing filled grids.
//!
//! [`Puzzle`]: crate::csp::puzzle::Puzzle

pub mod render;
pub mod structure;

pub use render::LetterGrid;
pub use structure::Crossword;
