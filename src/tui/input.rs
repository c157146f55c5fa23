use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Mode};
use super::ui;
use cellpad_core::Format;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Backspace => {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

/// Apply one key press. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Edit => match key.code {
            KeyCode::Esc => app.cancel(),
            KeyCode::Enter => app.commit_edit(),
            _ => handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key),
        },
        Mode::Command => match key.code {
            KeyCode::Esc => app.cancel(),
            KeyCode::Enter => return app.execute_command(),
            _ => handle_text_input(&mut app.command_buffer, &mut app.command_cursor, key),
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(':') => app.enter_command_mode(),
            KeyCode::Enter | KeyCode::Char('i') => app.enter_edit_mode(),
            KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
            KeyCode::Char('b') => app.apply_format(Format::Bold),
            KeyCode::Char('I') => app.apply_format(Format::Italic),
            KeyCode::Char('U') => app.apply_format(Format::Uppercase),
            KeyCode::Char('u') => app.apply_format(Format::Lowercase),
            KeyCode::Char('t') => app.apply_format(Format::Trim),
            KeyCode::Char('o') => app.add_row(),
            KeyCode::Char('O') => app.add_column(),
            _ => {}
        },
    }
    false
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) {
                return Ok(());
            }
        }
    }
}
