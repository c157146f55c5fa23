//! Error types for the grid store and the formula evaluator.

use thiserror::Error;

/// Errors raised by grid addressing and structural edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell not found: {0}")]
    NotFound(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Grid dimensions must be positive (got {rows}x{cols})")]
    EmptyDimensions { rows: usize, cols: usize },

    #[error("{what} {index} is out of bounds (1..={max})")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        max: usize,
    },

    #[error("Cannot delete the last remaining {0}")]
    LastRemaining(&'static str),
}

/// Errors raised while parsing or evaluating a range formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Not a formula (must start with '=')")]
    NotAFormula,

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Malformed range: {0}")]
    MalformedRange(String),

    #[error("Unresolved address: {0}")]
    UnresolvedAddress(String),

    #[error("Range is empty")]
    EmptyRange,

    #[error("Cannot average an empty range")]
    DivisionByEmptyRange,
}
