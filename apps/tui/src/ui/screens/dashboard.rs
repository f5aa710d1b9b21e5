use crate::app::App;
use crate::ui::widgets::controls::render_controls;
use crate::ui::widgets::map::render_location_map;
use crate::ui::widgets::tables::render_results_table;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Filters
            Constraint::Min(8),    // Table and map
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, main_layout[0]);
    render_controls(app, f, main_layout[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[2]);

    render_results_table(app, f, content[0]);
    render_location_map(app, f, content[1]);

    render_status_section(app, f, main_layout[3]);
    render_shortcuts(f, main_layout[4]);
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!("== {} ==", app.map_options.title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = TextLine::from(vec![
        Span::styled(
            format!("{}", app.matched.len()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" of {} locations match", app.dataset.len()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    f.render_widget(paragraph, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (message, color) = if app.status_message.is_empty() {
        ("Ready", Color::Gray)
    } else if app.status_message.starts_with("Error") {
        (app.status_message.as_str(), Color::Red)
    } else {
        (app.status_message.as_str(), Color::Green)
    };

    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color)))
        .block(
            Block::default()
                .title(" Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn shortcut(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let spans: Vec<Span<'static>> = [
        shortcut("Tab", ": Next filter   "),
        shortcut("←/→", ": Adjust   "),
        shortcut("↑/↓", ": Select   "),
        shortcut("s/r", ": Sort/Reverse   "),
        shortcut("e", ": Export map   "),
        shortcut("F1", ": Help   "),
        shortcut("q", ": Quit"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
