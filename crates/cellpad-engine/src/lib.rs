//! cellpad_engine - Grid store and range formula evaluator.

pub mod engine;
pub mod error;

pub use error::{EvalError, GridError};
