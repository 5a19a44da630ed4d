//! Plain error enum, in the teacher's style (`RingDivisionError`, `MatOppErr`
//! in `src/rings/matrix.rs`): a small set of named, rare failure modes with a
//! hand-written `Display`/`Error` impl rather than a derive-macro crate.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RanError {
    /// The Tarski-query manager was asked to build a multivariate manager on
    /// an ideal whose variety is not zero-dimensional.
    ZeroDimensionalRequired,
    /// A RAN constructor's contract was violated on bad input (not reachable
    /// from `RAN::from_poly_interval`, which reports this as `None` instead,
    /// per spec.md §7 — kept here for internal assertions and other callers
    /// that do want a typed error instead of an `Option`).
    InvalidConstruction(String),
}

impl fmt::Display for RanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RanError::ZeroDimensionalRequired => {
                write!(f, "ideal is not zero-dimensional: Tarski query manager requires a finite variety")
            }
            RanError::InvalidConstruction(msg) => write!(f, "invalid RAN construction: {msg}"),
        }
    }
}

impl std::error::Error for RanError {}
