//! Application state and logic.
//!
//! [`App`] wraps a [`Document`] with the cursor, viewport and editing
//! buffers. The app is modal: Normal for navigation and single-key actions,
//! Edit for changing the current cell, Command for `:` command lines.

use cellpad_core::{Address, Document, Format, Outcome};

/// Modal editing state for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the grid, run single-key actions.
    Normal,
    /// Edit the contents of the current cell.
    Edit,
    /// Enter a command line (`:set A1 5`, `:=SUM(A1:A3)`, ...).
    Command,
}

/// Main application state container.
pub struct App {
    /// The document being edited
    pub doc: Document,
    /// Cursor column (0-indexed)
    pub cursor_col: usize,
    /// Cursor row (0-indexed)
    pub cursor_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Current mode
    pub mode: Mode,
    /// Edit buffer for cell editing
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Command buffer for command mode
    pub command_buffer: String,
    /// Cursor position within command buffer (byte offset)
    pub command_cursor: usize,
    /// Status message to display
    pub status_message: String,
    /// Column width for display
    pub col_width: usize,
}

impl App {
    pub fn new(doc: Document, col_width: usize) -> Self {
        App {
            doc,
            cursor_col: 0,
            cursor_row: 0,
            viewport_col: 0,
            viewport_row: 0,
            visible_cols: 8,
            visible_rows: 20,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: "Press : for commands, i to edit, q to quit".to_string(),
            col_width,
        }
    }

    /// Address of the cell under the cursor.
    pub fn current_address(&self) -> Address {
        Address::new(self.cursor_col + 1, self.cursor_row + 1)
    }

    pub fn current_name(&self) -> String {
        self.current_address().to_string()
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let max_col = self.doc.cols().saturating_sub(1);
        let max_row = self.doc.rows().saturating_sub(1);
        self.cursor_col = (self.cursor_col as i64 + dx as i64).clamp(0, max_col as i64) as usize;
        self.cursor_row = (self.cursor_row as i64 + dy as i64).clamp(0, max_row as i64) as usize;
        self.update_viewport();
    }

    /// Keep the cursor inside the grid and the viewport around the cursor.
    pub fn update_viewport(&mut self) {
        self.cursor_col = self.cursor_col.min(self.doc.cols().saturating_sub(1));
        self.cursor_row = self.cursor_row.min(self.doc.rows().saturating_sub(1));

        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + self.visible_cols {
            self.viewport_col = self.cursor_col + 1 - self.visible_cols;
        }
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows;
        }
    }

    pub fn enter_edit_mode(&mut self) {
        let name = self.current_name();
        self.edit_buffer = self.doc.text(&name).unwrap_or_default().to_string();
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    pub fn commit_edit(&mut self) {
        let name = self.current_name();
        let text = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
        match self.doc.set_text(&name, &text) {
            Ok(()) => self.status_message.clear(),
            Err(e) => self.status_message = format!("Error: {}", e),
        }
        self.move_cursor(0, 1);
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::Normal;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.command_buffer.clear();
        self.command_cursor = 0;
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
        self.command_cursor = 0;
    }

    pub fn apply_format(&mut self, format: Format) {
        let name = self.current_name();
        if let Err(e) = self.doc.apply_format(&name, format) {
            self.status_message = format!("Error: {}", e);
        }
    }

    pub fn add_row(&mut self) {
        self.doc.insert_row_at_end();
        self.status_message = format!("{} rows", self.doc.rows());
    }

    pub fn add_column(&mut self) {
        self.doc.insert_column_at_end();
        self.status_message = format!("{} columns", self.doc.cols());
    }

    /// Run the command buffer. Returns true if the app should quit.
    pub fn execute_command(&mut self) -> bool {
        let line = std::mem::take(&mut self.command_buffer);
        self.command_cursor = 0;
        self.mode = Mode::Normal;
        if line.trim().is_empty() {
            return false;
        }

        match self.doc.execute(&line) {
            Ok(Outcome::None) => self.status_message.clear(),
            Ok(Outcome::Text(text)) => {
                // Multi-line output (a table dump) does not fit the status bar.
                self.status_message = match text.lines().count() {
                    0 | 1 => format!("Result: {}", text),
                    n => format!("{} lines of output (use -c show for a dump)", n),
                };
            }
            Ok(Outcome::Goto(address)) => {
                self.cursor_col = address.col - 1;
                self.cursor_row = address.row - 1;
                self.status_message.clear();
            }
            Ok(Outcome::Quit) => return true,
            Err(e) => self.status_message = format!("Error: {}", e),
        }
        self.update_viewport();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(rows: usize, cols: usize) -> App {
        App::new(Document::new(rows, cols).unwrap(), 12)
    }

    #[test]
    fn test_cursor_is_clamped_to_grid() {
        let mut app = app(3, 3);
        app.move_cursor(-1, -1);
        assert_eq!((app.cursor_col, app.cursor_row), (0, 0));
        app.move_cursor(10, 10);
        assert_eq!((app.cursor_col, app.cursor_row), (2, 2));
        assert_eq!(app.current_name(), "C3");
    }

    #[test]
    fn test_edit_commit_moves_down() {
        let mut app = app(3, 3);
        app.enter_edit_mode();
        app.edit_buffer = "42".to_string();
        app.commit_edit();
        assert_eq!(app.doc.text("A1").unwrap(), "42");
        assert_eq!(app.cursor_row, 1);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_enter_edit_loads_existing_text() {
        let mut app = app(2, 2);
        app.doc.set_text("A1", "abc").unwrap();
        app.enter_edit_mode();
        assert_eq!(app.edit_buffer, "abc");
        assert_eq!(app.edit_cursor, 3);
    }

    #[test]
    fn test_formula_command_shows_result() {
        let mut app = app(2, 2);
        app.doc.set_text("A1", "2").unwrap();
        app.doc.set_text("B1", "4").unwrap();
        app.command_buffer = "=AVG(A1:B1)".to_string();
        assert!(!app.execute_command());
        assert_eq!(app.status_message, "Result: 3");
    }

    #[test]
    fn test_goto_and_quit_commands() {
        let mut app = app(5, 5);
        app.command_buffer = "goto D4".to_string();
        app.execute_command();
        assert_eq!(app.current_name(), "D4");
        app.command_buffer = "q".to_string();
        assert!(app.execute_command());
    }

    #[test]
    fn test_cursor_follows_deleted_row() {
        let mut app = app(3, 1);
        app.move_cursor(0, 2);
        app.command_buffer = "delrow 3".to_string();
        app.execute_command();
        assert_eq!(app.cursor_row, 1);
    }

    #[test]
    fn test_command_error_reported() {
        let mut app = app(2, 2);
        app.command_buffer = "=MAX(B1:A1)".to_string();
        app.execute_command();
        assert_eq!(app.status_message, "Error: Range is empty");
    }
}
