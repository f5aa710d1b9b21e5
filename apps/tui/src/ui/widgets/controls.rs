use crate::app::{App, Control};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const SLIDER_WIDTH: usize = 24;

/// A text range slider: `━` between the selected bounds, `─` elsewhere.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn slider_bar(limits: (f64, f64), selected: (f64, f64), width: usize) -> String {
    let (lo, hi) = limits;
    let (start, end) = selected;
    if width == 0 {
        return String::new();
    }
    if start > end {
        return "─".repeat(width);
    }
    if hi <= lo {
        return "━".repeat(width);
    }

    let last = (width - 1) as f64;
    let position =
        |value: f64| (((value - lo) / (hi - lo)).clamp(0.0, 1.0) * last).round() as usize;
    let (from, to) = (position(start), position(end));

    (0..width)
        .map(|i| if (from..=to).contains(&i) { '━' } else { '─' })
        .collect()
}

fn value_style(app: &App, control: Control) -> Style {
    if app.focus == control {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn range_line(
    app: &App,
    label: &'static str,
    controls: (Control, Control),
    values: (String, String),
    bar: String,
    limits: String,
) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().fg(Color::Gray)),
        Span::styled(format!(" {} ", values.0), value_style(app, controls.0)),
        Span::styled(format!(" {bar} "), Style::default().fg(Color::Cyan)),
        Span::styled(format!(" {} ", values.1), value_style(app, controls.1)),
        Span::styled(format!("  {limits}"), Style::default().fg(Color::DarkGray)),
    ])
}

pub fn render_controls(app: &App, f: &mut Frame<'_>, area: Rect) {
    let bounds = app.dataset.bounds();
    let (rating_min, rating_max) = app.criteria.rating_range;
    let (reviews_min, reviews_max) = app.criteria.review_range;

    let rating = range_line(
        app,
        "Rating",
        (Control::RatingMin, Control::RatingMax),
        (format!("{rating_min:.1}"), format!("{rating_max:.1}")),
        slider_bar(bounds.rating, (rating_min, rating_max), SLIDER_WIDTH),
        format!("({:.1} – {:.1})", bounds.rating.0, bounds.rating.1),
    );

    let reviews = range_line(
        app,
        "Reviews",
        (Control::ReviewsMin, Control::ReviewsMax),
        (reviews_min.to_string(), reviews_max.to_string()),
        slider_bar(
            (f64::from(bounds.reviews.0), f64::from(bounds.reviews.1)),
            (f64::from(reviews_min), f64::from(reviews_max)),
            SLIDER_WIDTH,
        ),
        format!("({} – {})", bounds.reviews.0, bounds.reviews.1),
    );

    let cursor = if app.focus == Control::Search { "_" } else { "" };
    let search = TextLine::from(vec![
        Span::styled(format!("{:<9}", "Name"), Style::default().fg(Color::Gray)),
        Span::styled(
            format!(" {}{cursor} ", app.search_text()),
            value_style(app, Control::Search),
        ),
    ]);

    let block = Block::default()
        .title(format!(" Filters · {} ", app.focus.label()))
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(Text::from(vec![rating, reviews, search])).block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_marks_selected_span() {
        assert_eq!(slider_bar((0.0, 10.0), (2.0, 5.0), 11), "──━━━━─────");
    }

    #[test]
    fn full_range_fills_bar() {
        assert_eq!(slider_bar((3.0, 4.8), (3.0, 4.8), 6), "━━━━━━");
    }

    #[test]
    fn inverted_selection_is_empty() {
        assert_eq!(slider_bar((0.0, 10.0), (6.0, 4.0), 5), "─────");
    }

    #[test]
    fn single_valued_limits_fill_bar() {
        assert_eq!(slider_bar((4.0, 4.0), (4.0, 4.0), 3), "━━━");
    }
}
