use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, Control, LARGE_STEP_FACTOR};
use crossterm::event::KeyCode;

const PAGE_ROWS: usize = 5;

pub async fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab => rotate_focus(app, wrap_increment),
        KeyCode::BackTab => rotate_focus(app, wrap_decrement),
        KeyCode::Up => app.select_previous(1),
        KeyCode::Down => app.select_next(1),
        KeyCode::PageUp => app.select_previous(PAGE_ROWS),
        KeyCode::PageDown => app.select_next(PAGE_ROWS),
        KeyCode::Home => app.selected_index = 0,
        KeyCode::End => app.select_last(),
        _ if app.focus == Control::Search => handle_search_input(app, key),
        _ => handle_range_input(app, key).await,
    }
}

fn rotate_focus(app: &mut App, step: fn(usize, usize) -> usize) {
    let next = step(app.focus.index(), Control::ALL.len());
    app.focus = Control::from_index(next).unwrap_or(Control::RatingMin);
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            if app.search_text().is_empty() {
                app.focus = Control::RatingMin;
            } else {
                app.clear_search();
            }
        }
        KeyCode::Enter => rotate_focus(app, wrap_increment),
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Char(ch) => app.push_query_char(ch),
        _ => {}
    }
}

async fn handle_range_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left => app.step_focused(-1),
        KeyCode::Right => app.step_focused(1),
        KeyCode::Char('<') => app.step_focused(-LARGE_STEP_FACTOR),
        KeyCode::Char('>') => app.step_focused(LARGE_STEP_FACTOR),
        KeyCode::Char('/') => app.focus = Control::Search,
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('r') => app.toggle_sort_order(),
        KeyCode::Char('x') | KeyCode::Esc => app.reset_criteria(),
        KeyCode::Char('e') => match app.export_map().await {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("unknown");
                app.status_message = format!("Map exported: {filename}");
            }
            Err(e) => {
                tracing::warn!(error = %e, "map export failed");
                app.status_message = format!("Error: {e}");
            }
        },
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
}
