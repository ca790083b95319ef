//! Errors raised when a puzzle model is malformed.
//!
//! An unsatisfiable puzzle is not an error: solving simply yields `None`.
//! Everything here means the puzzle handed to the solver (or the files it was
//! read from) broke a contract, and solving cannot continue.

use crate::csp::variable::{VarId, Variable};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the grid structure is empty")]
    EmptyStructure,

    #[error("the word list is empty")]
    EmptyDictionary,

    #[error("variable {var} ({variable}) has zero length")]
    ZeroLength { var: VarId, variable: Variable },

    #[error("variables {first} and {second} describe the same slot ({variable})")]
    DuplicateVariable {
        first: VarId,
        second: VarId,
        variable: Variable,
    },

    #[error("variable {var} lists unknown neighbor {neighbor} (only {count} variables)")]
    UnknownNeighbor {
        var: VarId,
        neighbor: VarId,
        count: usize,
    },

    #[error("variable {var} lists itself as a neighbor")]
    SelfOverlap { var: VarId },

    #[error("variables {x} and {y} are neighbors but have no overlap")]
    MissingOverlap { x: VarId, y: VarId },

    #[error("overlap ({ix}, {iy}) between variables {x} and {y} is outside the words")]
    OverlapOutOfRange {
        x: VarId,
        y: VarId,
        ix: usize,
        iy: usize,
    },

    #[error("overlap between variables {x} and {y} is not symmetric")]
    AsymmetricOverlap { x: VarId, y: VarId },
}

impl PuzzleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
