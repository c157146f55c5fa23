use crate::error::Result;
use cellpad_engine::engine::{Cell, Grid};

/// UI-agnostic editing session over a single grid.
///
/// The document owns its grid outright; front ends hold a `Document` and
/// call into it, there is no shared or global grid.
#[derive(Clone, Debug)]
pub struct Document {
    /// The cell grid
    pub grid: Grid,
}

impl Document {
    /// Create a document with an empty `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Document {
            grid: Grid::new(rows, cols)?,
        })
    }

    /// Wrap an existing grid.
    pub fn with_grid(grid: Grid) -> Self {
        Document { grid }
    }

    pub fn cell(&self, address: &str) -> Result<&Cell> {
        Ok(self.grid.get_cell(address)?)
    }

    pub fn text(&self, address: &str) -> Result<&str> {
        Ok(self.grid.get_cell(address)?.text.as_str())
    }

    pub fn rows(&self) -> usize {
        self.grid.row_count()
    }

    pub fn cols(&self) -> usize {
        self.grid.col_count()
    }
}
