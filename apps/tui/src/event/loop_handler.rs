use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;
use std::time::Duration;
use taqueria_map::config::AppConfig;
use taqueria_map::pipeline::{self, RenderOutput};
use taqueria_map::{Coordinates, Dataset, FilterCriteria, LocationRecord, SortColumn};

use crate::app::{handle_input, App};
use crate::terminal::Tui;
use crate::ui;

// Event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the pipeline once without a UI: print the matched set and optionally
/// write the map document.
pub async fn run_headless(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    config: &AppConfig,
    json: bool,
    sort: Option<SortColumn>,
) -> Result<()> {
    let output = pipeline::render(dataset.records(), criteria, &config.map);
    let report = HeadlessReport::new(dataset, &output, sort.unwrap_or(SortColumn::Source));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = &config.output_file {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(path, output.map_markup.as_bytes())
            .await
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), markers = report.matched, "map written");
    }

    Ok(())
}

fn print_report(report: &HeadlessReport<'_>) {
    println!("\nTaqueria Map");
    println!("============");
    println!("Matched {} of {} locations", report.matched, report.total);
    println!(
        "Map centre: {:.4}, {:.4}",
        report.center.latitude, report.center.longitude
    );

    if report.records.is_empty() {
        return;
    }

    println!();
    for record in &report.records {
        println!(
            "- {} | {} | {:.1} | {} reviews",
            record.name_primary,
            record.name_secondary.as_deref().unwrap_or("-"),
            record.rating,
            record.reviews
        );
    }
}

#[derive(Debug, Serialize)]
struct HeadlessReport<'a> {
    total: usize,
    matched: usize,
    center: Coordinates,
    records: Vec<&'a LocationRecord>,
}

impl<'a> HeadlessReport<'a> {
    fn new(dataset: &Dataset, output: &RenderOutput<'a>, sort: SortColumn) -> Self {
        let mut records = output.matched.clone();
        match sort {
            SortColumn::Source => {}
            SortColumn::Name => records.sort_by_key(|record| record.name_primary.to_lowercase()),
            SortColumn::Rating => records.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortColumn::Reviews => records.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
        }

        Self {
            total: dataset.len(),
            matched: output.matched.len(),
            center: output.center,
            records,
        }
    }
}

/// Run the main dashboard event loop
pub async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code).await;
                if !app.running {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => {
                // Redraw happens at the top of the loop
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read terminal event");
            }
        }
    }

    Ok(())
}
