use crate::app::state::App;
use crossterm::event::KeyCode;

mod dashboard;
mod help;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    dashboard::handle_dashboard_input(app, key).await;
}
