#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod backtracking;
pub mod dictionary;
pub mod domain;
pub mod error;
pub mod graph;
pub mod propagation;
pub mod puzzle;
pub mod solver;
pub mod value_ordering;
pub mod variable;
pub mod variable_selection;

#[cfg(test)]
pub(crate) mod test_support;
