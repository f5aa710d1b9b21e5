use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use taqueria_map::map::format_rating;

/// First row to draw so the selected row stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}

pub fn rating_color(rating: f64) -> Color {
    if rating >= 4.5 {
        Color::Green
    } else if rating >= 4.0 {
        Color::Yellow
    } else {
        Color::Gray
    }
}

pub fn render_results_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let direction = if app.sort_descending { "↓" } else { "↑" };
    let title = format!(
        " Results ({} of {}) · {} {direction} ",
        (app.selected_index + 1).min(app.view.len()),
        app.view.len(),
        app.sort_column.label(),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.view.is_empty() {
        let paragraph = Paragraph::new("No locations match the current filters.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Translated"),
        Cell::from("Rating"),
        Cell::from("Reviews"),
        Cell::from("Address"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    // Borders plus header
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.view.len(), max_visible_rows, app.selected_index);

    let rows = app
        .visible_records()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, record)| {
            let style = if i == app.selected_index {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(rating_color(record.rating))
            };

            Row::new(vec![
                Cell::from(record.name_primary.clone()),
                Cell::from(record.name_secondary.clone().unwrap_or_default()),
                Cell::from(format_rating(record.rating)),
                Cell::from(record.reviews.to_string()),
                Cell::from(
                    record
                        .address_secondary
                        .clone()
                        .or_else(|| record.address_primary.clone())
                        .unwrap_or_default(),
                ),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Percentage(24),
        Constraint::Percentage(24),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}
