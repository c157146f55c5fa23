//! Cell records held by the grid.
//!
//! - [`Cell`] - Text content, style flags and the cell's current address
//! - [`CellStyle`] - Bold/italic presentation flags

use super::address::Address;

/// Presentation flags toggled by the formatting actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
}

/// A cell in the grid. Owned by the [`Grid`](super::Grid); everything else
/// refers to it by address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub address: Address,
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new_empty(col: usize, row: usize) -> Cell {
        Cell {
            address: Address::new(col, row),
            text: String::new(),
            style: CellStyle::default(),
        }
    }

    pub fn new_text(col: usize, row: usize, text: &str) -> Cell {
        Cell {
            text: text.to_string(),
            ..Cell::new_empty(col, row)
        }
    }

    /// 1-based row number.
    pub fn row(&self) -> usize {
        self.address.row
    }

    /// 1-based column number.
    pub fn col(&self) -> usize {
        self.address.col
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Move the cell to a new position, regenerating its address.
    pub(crate) fn relocate(&mut self, col: usize, row: usize) {
        self.address = Address::new(col, row);
    }
}
