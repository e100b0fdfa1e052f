use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::{Ledger, ViewPort};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::screens::expenses::TABLE_TOP_OFFSET;
use crate::ui::util::{format_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Poll interval; also how often the alert banner gets a chance to expire.
const TICK: Duration = Duration::from_millis(250);

/// Terminal analog of the webapp's swipe-to-delete: a leftward drag on an
/// expense row past this many columns asks to delete it.
const DRAG_DELETE_COLS: u16 = 8;

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.ledger_changed(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if !event::poll(TICK)? {
            app.tick();
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if app.show_help {
                    app.show_help = false;
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => handle_normal_input(key, app, ledger)?,
                    InputMode::Command => handle_command_input(key, app, ledger)?,
                    InputMode::Editing => handle_editing_input(key, app, ledger)?,
                    InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
                }
            }
            Event::Mouse(mouse) => handle_mouse(mouse, app, ledger)?,
            _ => {}
        }
        app.tick();
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down if app.screen == Screen::Expenses => {
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('k') | KeyCode::Up if app.screen == Screen::Expenses => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('g') if app.screen == Screen::Expenses => {
            scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('G') if app.screen == Screen::Expenses => {
            scroll_to_bottom(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Expenses,
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            app.screen = screens[next];
        }
        KeyCode::Char('a') => {
            app.screen = Screen::Expenses;
            app.form.reset();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, ledger)?;
        }
        KeyCode::Char('t') => {
            commands::handle_command("theme", app, ledger)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            if app.form.on_last_field() {
                submit_form(app, ledger)?;
            } else {
                app.form.next_field();
            }
        }
        KeyCode::Tab => app.form.next_field(),
        KeyCode::BackTab => app.form.prev_field(),
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Add cancelled");
        }
        KeyCode::Backspace => {
            app.form.active_field_mut().pop();
        }
        KeyCode::Char(c) => {
            app.form.active_field_mut().push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, description } => {
                        ledger.remove(id)?;
                        app.ledger_changed(ledger);
                        app.set_status(format!("Deleted: {description}"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

fn submit_form(app: &mut App, ledger: &mut Ledger) -> Result<()> {
    let [description, amount, category, date] = app.form.fields.clone();
    let expense = ledger.add(&description, &amount, &category, &date)?;
    app.ledger_changed(ledger);
    app.input_mode = InputMode::Normal;

    let label = if expense.description.is_empty() {
        "(no description)".to_string()
    } else {
        expense.description
    };
    app.set_status(format!("Added: {label} ({})", format_amount(expense.amount)));
    Ok(())
}

// ── Mouse gesture ────────────────────────────────────────────

fn handle_mouse(mouse: event::MouseEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.drag_origin = Some((mouse.column, mouse.row));
            if app.screen == Screen::Expenses && app.input_mode == InputMode::Normal {
                if let Some(i) = expense_row_at(mouse.row, app) {
                    app.expense_index = i;
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some((start_col, start_row)) = app.drag_origin.take() else {
                return Ok(());
            };
            if app.screen != Screen::Expenses || app.input_mode != InputMode::Normal {
                return Ok(());
            }
            let dragged_left = start_col.saturating_sub(mouse.column) >= DRAG_DELETE_COLS;
            if dragged_left && mouse.row == start_row {
                if let Some(i) = expense_row_at(start_row, app) {
                    app.expense_index = i;
                    commands::handle_command("delete", app, ledger)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Map a terminal row to an index into the expense list, accounting for the
/// tab bar above the content area and the table border + header inside it.
/// Rows below the visible table (bottom border, status and command bars) map
/// to nothing.
fn expense_row_at(row: u16, app: &App) -> Option<usize> {
    let first_data_row = 1 + TABLE_TOP_OFFSET;
    let last_data_row = first_data_row + app.visible_rows as u16;
    if row < first_data_row || row >= last_data_row {
        return None;
    }
    let index = app.expense_scroll + (row - first_data_row) as usize;
    (index < app.expenses.len()).then_some(index)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::Expense;

    fn app_with_expenses(n: usize) -> App {
        let mut app = App::new();
        app.expenses = (0..n)
            .map(|i| Expense {
                id: i as i64,
                description: format!("e{i}"),
                amount: 1.0,
                category: "Misc".into(),
                date: "2024-01-01".into(),
            })
            .collect();
        app
    }

    #[test]
    fn test_row_above_table_maps_to_nothing() {
        let app = app_with_expenses(5);
        assert_eq!(expense_row_at(0, &app), None);
        assert_eq!(expense_row_at(2, &app), None);
    }

    #[test]
    fn test_first_data_row_maps_to_scroll_origin() {
        let mut app = app_with_expenses(50);
        app.expense_scroll = 10;
        assert_eq!(expense_row_at(3, &app), Some(10));
    }

    #[test]
    fn test_rows_below_visible_table_map_to_nothing() {
        let mut app = app_with_expenses(50);
        app.visible_rows = 5;
        // Last visible data row still resolves
        assert_eq!(expense_row_at(7, &app), Some(4));
        // Bottom border, status and command bars do not
        assert_eq!(expense_row_at(8, &app), None);
        assert_eq!(expense_row_at(9, &app), None);
        assert_eq!(expense_row_at(10, &app), None);
    }

    #[test]
    fn test_row_past_list_end_maps_to_nothing() {
        let mut app = app_with_expenses(2);
        app.visible_rows = 10;
        assert_eq!(expense_row_at(5, &app), None);
    }
}
