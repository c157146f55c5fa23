use super::Document;
use cellpad_engine::engine::{Address, Cell, format_number};

impl Document {
    /// Display string for a cell. Cells whose text starts with `=` show the
    /// formula result, or `#ERR` when it does not evaluate.
    pub fn cell_display(&self, address: &Address) -> String {
        match self.grid.cell_at(address) {
            Some(cell) => self.display_of(cell),
            None => String::new(),
        }
    }

    fn display_of(&self, cell: &Cell) -> String {
        if !cell.text.starts_with('=') {
            return cell.text.clone();
        }
        match self.evaluate(&cell.text) {
            Ok(n) => format_number(n),
            Err(_) => "#ERR".to_string(),
        }
    }

    /// Tab-separated view of the grid: a header of column letters, then one
    /// line per row prefixed with its number.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = (1..=self.cols()).map(Address::col_to_letters).collect();
        out.push('\t');
        out.push_str(&header.join("\t"));
        for (r, row) in self.grid.rows().enumerate() {
            out.push('\n');
            out.push_str(&(r + 1).to_string());
            for cell in row {
                out.push('\t');
                out.push_str(&self.display_of(cell));
            }
        }
        out
    }
}
