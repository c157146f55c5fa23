//! Grid store and formula evaluator.
//!
//! - [`Grid`], [`Cell`], [`CellStyle`] - Owned cell storage in row-major order
//! - [`Address`] - Address parsing (A1 notation <-> 1-based column/row)
//! - [`parse_formula`] - Parse `=FN(START:END)`
//! - [`evaluate`] - Resolve a range in storage order and aggregate it
//! - [`format_number`] - Format results for display

mod address;
mod cell;
mod eval;
mod format;
mod formula;
mod grid;

pub use address::Address;
pub use cell::{Cell, CellStyle};
pub use eval::{aggregate, coerce, evaluate, evaluate_formula, resolve_range};
pub use format::format_number;
pub use formula::{BUILTINS, Builtin, Formula, FormulaRange, Function, parse_formula, parse_range};
pub use grid::Grid;
