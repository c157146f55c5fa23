//! The grid store: a rectangular, row-major matrix of cells.
//!
//! Storage order is the row-major flattening of the rows. Formula ranges are
//! resolved against that order, so `position_of` is part of the public
//! contract. Every structural edit regenerates addresses by position, so the
//! cell at row `r`, column `c` always carries address `(c, r)`.

use std::collections::HashSet;

use super::address::Address;
use super::cell::Cell;
use crate::error::GridError;

/// Dimension for row/column operations
#[derive(Copy, Clone, Debug)]
enum Dimension {
    Row,
    Column,
}

impl Dimension {
    fn name(&self) -> &'static str {
        match self {
            Dimension::Row => "row",
            Dimension::Column => "column",
        }
    }
}

/// A rectangular grid of text cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    cols: usize,
}

impl Grid {
    /// Build a `rows` x `cols` grid of empty cells.
    pub fn new(rows: usize, cols: usize) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        let rows = (1..=rows)
            .map(|r| (1..=cols).map(|c| Cell::new_empty(c, r)).collect())
            .collect();
        Ok(Grid { rows, cols })
    }

    /// Build a grid from row-major text. Short rows are padded with empty
    /// cells to the width of the longest row.
    pub fn from_texts<R, S>(texts: &[R]) -> Result<Grid, GridError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let cols = texts.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Grid::new(texts.len(), cols)?;
        for (r, row) in texts.iter().enumerate() {
            for (c, text) in row.as_ref().iter().enumerate() {
                grid.rows[r][c] = Cell::new_text(c + 1, r + 1, text.as_ref());
            }
        }
        Ok(grid)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// All cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Cell at a parsed address, if it lies inside the grid.
    pub fn cell_at(&self, address: &Address) -> Option<&Cell> {
        let (r, c) = self.index_of(address)?;
        Some(&self.rows[r][c])
    }

    fn cell_at_mut(&mut self, address: &Address) -> Option<&mut Cell> {
        let (r, c) = self.index_of(address)?;
        Some(&mut self.rows[r][c])
    }

    fn index_of(&self, address: &Address) -> Option<(usize, usize)> {
        let r = address.row.checked_sub(1)?;
        let c = address.col.checked_sub(1)?;
        if r < self.rows.len() && c < self.cols {
            Some((r, c))
        } else {
            None
        }
    }

    /// Resolve an address string to its parsed form, requiring the exact
    /// spelling a cell would carry (no lowercase, no leading zeros).
    fn resolve(&self, address: &str) -> Option<Address> {
        let parsed = Address::parse(address)?;
        if parsed.to_string() != address {
            return None;
        }
        self.index_of(&parsed).map(|_| parsed)
    }

    /// Look up a cell by address string. Case-sensitive, exact match.
    pub fn get_cell(&self, address: &str) -> Result<&Cell, GridError> {
        self.resolve(address)
            .and_then(|a| self.cell_at(&a))
            .ok_or_else(|| GridError::NotFound(address.to_string()))
    }

    pub fn get_cell_mut(&mut self, address: &str) -> Result<&mut Cell, GridError> {
        match self.resolve(address) {
            Some(a) => self
                .cell_at_mut(&a)
                .ok_or_else(|| GridError::NotFound(address.to_string())),
            None => Err(GridError::NotFound(address.to_string())),
        }
    }

    /// Storage-order index of the cell with this address.
    pub fn position_of(&self, address: &str) -> Option<usize> {
        let a = self.resolve(address)?;
        Some((a.row - 1) * self.cols + (a.col - 1))
    }

    /// Overwrite a cell's text.
    pub fn set_text(&mut self, address: &str, text: impl Into<String>) -> Result<(), GridError> {
        let cell = self.get_cell_mut(address)?;
        cell.text = text.into();
        tracing::debug!(%address, "set cell text");
        Ok(())
    }

    /// Append one row of empty cells.
    pub fn insert_row_at_end(&mut self) {
        let row = self.rows.len() + 1;
        self.rows
            .push((1..=self.cols).map(|c| Cell::new_empty(c, row)).collect());
        tracing::debug!(rows = self.rows.len(), "appended row");
    }

    /// Append one empty cell to every row.
    pub fn insert_column_at_end(&mut self) {
        self.cols += 1;
        let col = self.cols;
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.push(Cell::new_empty(col, r + 1));
        }
        tracing::debug!(cols = self.cols, "appended column");
    }

    /// Insert an empty row before row `at` (1-based). `at == rows + 1` appends.
    pub fn insert_row(&mut self, at: usize) -> Result<(), GridError> {
        self.insert_dimension(Dimension::Row, at)
    }

    /// Insert an empty column before column `at` (1-based). `at == cols + 1` appends.
    pub fn insert_column(&mut self, at: usize) -> Result<(), GridError> {
        self.insert_dimension(Dimension::Column, at)
    }

    /// Remove row `at` (1-based).
    pub fn delete_row(&mut self, at: usize) -> Result<(), GridError> {
        self.delete_dimension(Dimension::Row, at)
    }

    /// Remove column `at` (1-based).
    pub fn delete_column(&mut self, at: usize) -> Result<(), GridError> {
        self.delete_dimension(Dimension::Column, at)
    }

    fn len_of(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Row => self.rows.len(),
            Dimension::Column => self.cols,
        }
    }

    fn insert_dimension(&mut self, dim: Dimension, at: usize) -> Result<(), GridError> {
        let len = self.len_of(dim);
        if at == 0 || at > len + 1 {
            return Err(GridError::IndexOutOfBounds {
                what: dim.name(),
                index: at,
                max: len + 1,
            });
        }
        match dim {
            Dimension::Row => {
                let row = (1..=self.cols).map(|c| Cell::new_empty(c, at)).collect();
                self.rows.insert(at - 1, row);
            }
            Dimension::Column => {
                for (r, row) in self.rows.iter_mut().enumerate() {
                    row.insert(at - 1, Cell::new_empty(at, r + 1));
                }
                self.cols += 1;
            }
        }
        self.renumber();
        tracing::debug!(dimension = dim.name(), at, "inserted");
        Ok(())
    }

    fn delete_dimension(&mut self, dim: Dimension, at: usize) -> Result<(), GridError> {
        let len = self.len_of(dim);
        if at == 0 || at > len {
            return Err(GridError::IndexOutOfBounds {
                what: dim.name(),
                index: at,
                max: len,
            });
        }
        if len == 1 {
            return Err(GridError::LastRemaining(dim.name()));
        }
        match dim {
            Dimension::Row => {
                self.rows.remove(at - 1);
            }
            Dimension::Column => {
                for row in &mut self.rows {
                    row.remove(at - 1);
                }
                self.cols -= 1;
            }
        }
        self.renumber();
        tracing::debug!(dimension = dim.name(), at, "deleted");
        Ok(())
    }

    /// Remove rows whose texts repeat an earlier row's texts.
    /// First occurrence wins; order is preserved. Returns rows removed.
    pub fn dedupe_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        self.rows
            .retain(|row| seen.insert(row.iter().map(|c| c.text.clone()).collect()));
        self.renumber();
        let removed = before - self.rows.len();
        tracing::debug!(removed, "deduplicated rows");
        removed
    }

    /// Replace the first occurrence of `find` in every cell containing it.
    /// Returns the number of cells changed. Every text contains the empty
    /// string, so an empty `find` prefixes `replace` to every cell.
    pub fn find_and_replace(&mut self, find: &str, replace: &str) -> usize {
        let mut changed = 0;
        for cell in self.rows.iter_mut().flatten() {
            if cell.text.contains(find) {
                cell.text = cell.text.replacen(find, replace, 1);
                changed += 1;
            }
        }
        tracing::debug!(find, replace, changed, "find and replace");
        changed
    }

    /// Regenerate every cell's address from its position.
    fn renumber(&mut self) {
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                cell.relocate(c + 1, r + 1);
            }
        }
    }
}
