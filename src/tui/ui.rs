//! UI rendering

use super::app::{App, Mode};
use cellpad_core::Address;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let [formula_area, grid_area, status_area] = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let available_width = grid_area.width.saturating_sub(ROW_HEADER_WIDTH + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders
    app.visible_cols = (available_width / (app.col_width + GRID_COLUMN_SPACING as usize)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, formula_area);
    draw_grid(f, app, grid_area);
    draw_status_bar(f, app, status_area);
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let cell_name = app.current_name();

    let content = match app.mode {
        Mode::Edit => {
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", cell_name, before, after)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            format!(":{}│{}", before, after)
        }
        Mode::Normal => match app.doc.text(&cell_name) {
            Ok(text) if !text.is_empty() => format!("{}: {}", cell_name, text),
            _ => format!("{}: (empty)", cell_name),
        },
    };

    let (title, color) = match app.mode {
        Mode::Edit => (" Edit ", Color::Yellow),
        Mode::Command => (" Command ", Color::Cyan),
        Mode::Normal => (" Cell ", Color::White),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn header_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let last_col = (app.viewport_col + app.visible_cols).min(app.doc.cols());
    let last_row = (app.viewport_row + app.visible_rows).min(app.doc.rows());

    let mut header_cells = vec![Cell::from(" ")];
    for col in app.viewport_col..last_col {
        header_cells.push(
            Cell::from(Address::col_to_letters(col + 1)).style(header_style(col == app.cursor_col)),
        );
    }
    let header = Row::new(header_cells).height(1);

    let mut rows = Vec::new();
    for row in app.viewport_row..last_row {
        let mut cells =
            vec![Cell::from(format!("{}", row + 1)).style(header_style(row == app.cursor_row))];

        for col in app.viewport_col..last_col {
            let address = Address::new(col + 1, row + 1);
            let display = app.doc.cell_display(&address);

            let mut style = if row == app.cursor_row && col == app.cursor_col {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if display == "#ERR" {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            if let Some(cell) = app.doc.grid.cell_at(&address) {
                if cell.style.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if cell.style.italic {
                    style = style.add_modifier(Modifier::ITALIC);
                }
            }
            cells.push(Cell::from(display).style(style));
        }
        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend((app.viewport_col..last_col).map(|_| Constraint::Length(app.col_width as u16)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Cellpad "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Edit => "EDIT",
        Mode::Command => "COMMAND",
    };
    let text = format!(
        " {} | {}x{} | {}",
        mode,
        app.doc.rows(),
        app.doc.cols(),
        app.status_message
    );
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_core::Document;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_split_main_chunks_heights() {
        let [formula, grid, status] = split_main_chunks(Rect::new(0, 0, 80, 24));
        assert_eq!(formula.height, FORMULA_BAR_HEIGHT);
        assert_eq!(status.height, STATUS_BAR_HEIGHT);
        assert_eq!(grid.height, 24 - FORMULA_BAR_HEIGHT - STATUS_BAR_HEIGHT);
    }

    #[test]
    fn test_draw_shows_values_and_results() {
        let mut doc = Document::new(3, 3).unwrap();
        doc.set_text("A1", "2").unwrap();
        doc.set_text("B1", "5").unwrap();
        doc.set_text("C1", "=SUM(A1:B1)").unwrap();
        let mut app = App::new(doc, 8);
        let screen = render(&mut app);
        assert!(screen.contains("A1: 2"));
        assert!(screen.contains('7'));
        assert!(screen.contains("NORMAL"));
    }

    #[test]
    fn test_draw_limits_visible_columns() {
        let mut app = App::new(Document::new(2, 20).unwrap(), 8);
        render(&mut app);
        assert!(app.visible_cols < 20);
        app.move_cursor(19, 0);
        assert!(app.viewport_col > 0);
    }
}
