//! Error types for cellpad core.

use thiserror::Error;

use cellpad_engine::{EvalError, GridError};

/// Errors that can occur while editing a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellpadError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub type Result<T> = std::result::Result<T, CellpadError>;
