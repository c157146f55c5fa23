use super::Document;
use crate::error::Result;
use cellpad_engine::engine::evaluate;

/// A formatting action applied to a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Toggle bold.
    Bold,
    /// Toggle italic.
    Italic,
    Uppercase,
    Lowercase,
    /// Strip leading and trailing whitespace.
    Trim,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Format> {
        match name {
            "bold" => Some(Format::Bold),
            "italic" => Some(Format::Italic),
            "upper" | "uppercase" => Some(Format::Uppercase),
            "lower" | "lowercase" => Some(Format::Lowercase),
            "trim" => Some(Format::Trim),
            _ => None,
        }
    }
}

impl Document {
    /// Set cell contents.
    pub fn set_text(&mut self, address: &str, text: &str) -> Result<()> {
        Ok(self.grid.set_text(address, text)?)
    }

    /// Apply a formatting action to the cell at `address`.
    pub fn apply_format(&mut self, address: &str, format: Format) -> Result<()> {
        let cell = self.grid.get_cell_mut(address)?;
        match format {
            Format::Bold => cell.style.bold = !cell.style.bold,
            Format::Italic => cell.style.italic = !cell.style.italic,
            Format::Uppercase => cell.text = cell.text.to_uppercase(),
            Format::Lowercase => cell.text = cell.text.to_lowercase(),
            Format::Trim => cell.text = cell.text.trim().to_string(),
        }
        tracing::debug!(%address, ?format, "applied format");
        Ok(())
    }

    pub fn insert_row_at_end(&mut self) {
        self.grid.insert_row_at_end();
    }

    pub fn insert_column_at_end(&mut self) {
        self.grid.insert_column_at_end();
    }

    /// Insert an empty row before row `at` (1-based).
    pub fn insert_row(&mut self, at: usize) -> Result<()> {
        Ok(self.grid.insert_row(at)?)
    }

    /// Insert an empty column before column `at` (1-based).
    pub fn insert_column(&mut self, at: usize) -> Result<()> {
        Ok(self.grid.insert_column(at)?)
    }

    pub fn delete_row(&mut self, at: usize) -> Result<()> {
        Ok(self.grid.delete_row(at)?)
    }

    pub fn delete_column(&mut self, at: usize) -> Result<()> {
        Ok(self.grid.delete_column(at)?)
    }

    /// Remove duplicate rows; returns how many were removed.
    pub fn dedupe_rows(&mut self) -> usize {
        self.grid.dedupe_rows()
    }

    /// Replace the first occurrence of `find` in each cell; returns cells changed.
    pub fn find_and_replace(&mut self, find: &str, replace: &str) -> usize {
        self.grid.find_and_replace(find, replace)
    }

    /// Evaluate a range formula against the current grid.
    pub fn evaluate(&self, formula: &str) -> Result<f64> {
        Ok(evaluate(&self.grid, formula)?)
    }
}
