use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use taqueria_map::Bounds;

/// Minimum padding around the dataset, in degrees
const MIN_PADDING: f64 = 1.0;

/// Longitude and latitude bounds of the canvas: the dataset bounding box
/// padded by a tenth of its span on each side.
pub fn padded_viewport(bounds: &Bounds) -> ([f64; 2], [f64; 2]) {
    let pad = |(min, max): (f64, f64)| (((max - min) * 0.1).max(MIN_PADDING), min, max);

    let (lon_pad, west, east) = pad(bounds.longitude);
    let (lat_pad, south, north) = pad(bounds.latitude);

    (
        [(west - lon_pad).max(-180.0), (east + lon_pad).min(180.0)],
        [(south - lat_pad).max(-90.0), (north + lat_pad).min(90.0)],
    )
}

pub fn render_location_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let center = app.center();
    let (x_bounds, y_bounds) = padded_viewport(&app.dataset.bounds());

    let points: Vec<(f64, f64)> = app
        .visible_records()
        .map(|record| (record.coordinates.longitude, record.coordinates.latitude))
        .collect();
    let selected = app.selected_record();

    let block = Block::default()
        .title(format!(
            " Map · {} markers · centre {:.3}, {:.3} ",
            points.len(),
            center.latitude,
            center.longitude
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            ctx.draw(&Points {
                coords: &points,
                color: Color::Yellow,
            });

            if let Some(record) = selected {
                let (x, y) = (record.coordinates.longitude, record.coordinates.latitude);
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color: Color::Red,
                });
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        format!(" {}", record.name_primary),
                        Style::default().fg(Color::White),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
