//! cellpad-core - UI-agnostic document model and command interpreter.

pub mod command;
pub mod document;
pub mod error;

pub use command::{Command, Outcome};
pub use document::{Document, Format};
pub use error::{CellpadError, Result};

pub use cellpad_engine::engine::{Address, BUILTINS, Cell, CellStyle, Grid};
