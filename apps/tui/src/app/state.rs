use crate::app::input::helpers::{step_rating, step_reviews};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use taqueria_map::pipeline::{self, RenderOutput};
use taqueria_map::{Coordinates, Dataset, FilterCriteria, LocationRecord, MapOptions, SortColumn};

pub const RATING_STEP: f64 = 0.1;
pub const REVIEWS_STEP: i64 = 10;
pub const LARGE_STEP_FACTOR: i32 = 10;

/// The dashboard control that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    RatingMin,
    RatingMax,
    ReviewsMin,
    ReviewsMax,
    Search,
}

impl Control {
    pub const ALL: [Self; 5] = [
        Self::RatingMin,
        Self::RatingMax,
        Self::ReviewsMin,
        Self::ReviewsMax,
        Self::Search,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::RatingMin),
            1 => Some(Self::RatingMax),
            2 => Some(Self::ReviewsMin),
            3 => Some(Self::ReviewsMax),
            4 => Some(Self::Search),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::RatingMin => 0,
            Self::RatingMax => 1,
            Self::ReviewsMin => 2,
            Self::ReviewsMax => 3,
            Self::Search => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RatingMin => "Rating min",
            Self::RatingMax => "Rating max",
            Self::ReviewsMin => "Reviews min",
            Self::ReviewsMax => "Reviews max",
            Self::Search => "Name search",
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub dataset: Dataset,
    pub criteria: FilterCriteria,
    /// Indices into the dataset of the matched set, in source order
    pub matched: Vec<usize>,
    /// `matched` in table display order
    pub view: Vec<usize>,
    pub focus: Control,
    pub sort_column: SortColumn,
    pub sort_descending: bool,
    pub selected_index: usize,
    pub show_help: bool,
    pub status_message: String,
    pub map_options: MapOptions,
    pub output_dir: PathBuf,
}

impl App {
    pub fn new(
        dataset: Dataset,
        criteria: FilterCriteria,
        map_options: MapOptions,
        output_dir: PathBuf,
    ) -> Self {
        let mut app = Self {
            running: true,
            dataset,
            criteria,
            matched: Vec::new(),
            view: Vec::new(),
            focus: Control::RatingMin,
            sort_column: SortColumn::Source,
            sort_descending: false,
            selected_index: 0,
            show_help: false,
            status_message: String::new(),
            map_options,
            output_dir,
        };
        app.refresh();
        app
    }

    /// Re-run the filter against the snapshot and rebuild the table view.
    pub fn refresh(&mut self) {
        self.matched = pipeline::filter_indices(self.dataset.records(), &self.criteria);
        self.rebuild_view();

        tracing::debug!(
            matched = self.matched.len(),
            total = self.dataset.len(),
            rating = ?self.criteria.rating_range,
            reviews = ?self.criteria.review_range,
            query = ?self.criteria.name_query,
            "criteria applied"
        );
    }

    fn rebuild_view(&mut self) {
        let records = self.dataset.records();
        let mut view = self.matched.clone();
        view.sort_by(|a, b| compare_records(&records[*a], &records[*b], self.sort_column));
        if self.sort_descending {
            view.reverse();
        }
        self.view = view;

        if self.selected_index >= self.view.len() {
            self.selected_index = self.view.len().saturating_sub(1);
        }
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = FilterCriteria::full_range(&self.dataset.bounds());
        self.selected_index = 0;
        self.status_message = "Filters reset".to_string();
        self.refresh();
    }

    /// Step the focused numeric bound. A min never passes its max and a max
    /// never drops below its min.
    pub fn step_focused(&mut self, steps: i32) {
        let bounds = self.dataset.bounds();
        let (rating_min, rating_max) = self.criteria.rating_range;
        let (reviews_min, reviews_max) = self.criteria.review_range;
        let rating_delta = f64::from(steps) * RATING_STEP;
        let reviews_delta = i64::from(steps) * REVIEWS_STEP;

        match self.focus {
            Control::RatingMin => {
                self.criteria.rating_range.0 =
                    step_rating(rating_min, rating_delta, bounds.rating.0, rating_max);
            }
            Control::RatingMax => {
                self.criteria.rating_range.1 =
                    step_rating(rating_max, rating_delta, rating_min, bounds.rating.1);
            }
            Control::ReviewsMin => {
                self.criteria.review_range.0 =
                    step_reviews(reviews_min, reviews_delta, bounds.reviews.0, reviews_max);
            }
            Control::ReviewsMax => {
                self.criteria.review_range.1 =
                    step_reviews(reviews_max, reviews_delta, reviews_min, bounds.reviews.1);
            }
            Control::Search => return,
        }

        self.refresh();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.criteria
            .name_query
            .get_or_insert_with(String::new)
            .push(ch);
        self.selected_index = 0;
        self.refresh();
    }

    pub fn pop_query_char(&mut self) {
        if let Some(query) = self.criteria.name_query.as_mut() {
            query.pop();
            if query.is_empty() {
                self.criteria.name_query = None;
            }
        }
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.criteria.name_query = None;
        self.refresh();
    }

    pub fn search_text(&self) -> &str {
        self.criteria.name_query.as_deref().unwrap_or_default()
    }

    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
        self.status_message = format!("Sorted by {}", self.sort_column.label());
        self.rebuild_view();
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_descending = !self.sort_descending;
        self.rebuild_view();
    }

    pub fn select_previous(&mut self, rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(rows);
    }

    pub fn select_next(&mut self, rows: usize) {
        if !self.view.is_empty() {
            self.selected_index = (self.selected_index + rows).min(self.view.len() - 1);
        }
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.view.len().saturating_sub(1);
    }

    /// Rows in table order.
    pub fn visible_records(&self) -> impl Iterator<Item = &LocationRecord> {
        let records = self.dataset.records();
        self.view.iter().map(move |index| &records[*index])
    }

    pub fn selected_record(&self) -> Option<&LocationRecord> {
        self.view
            .get(self.selected_index)
            .map(|index| &self.dataset.records()[*index])
    }

    pub fn center(&self) -> Coordinates {
        let records = self.dataset.records();
        pipeline::map_center(self.matched.iter().map(|index| &records[*index]))
            .unwrap_or(self.map_options.default_center)
    }

    pub fn render_map(&self) -> RenderOutput<'_> {
        pipeline::render(self.dataset.records(), &self.criteria, &self.map_options)
    }

    /// Write the current map document into the output directory.
    pub async fn export_map(&mut self) -> Result<PathBuf> {
        let output = self.render_map();
        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = export_path(&self.output_dir, &date.to_string());

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .wrap_err_with(|| format!("failed to create {}", self.output_dir.display()))?;
        tokio::fs::write(&path, output.map_markup.as_bytes())
            .await
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            markers = output.matched.len(),
            "map exported"
        );
        Ok(path)
    }
}

pub fn export_path(output_dir: impl AsRef<Path>, date: &str) -> PathBuf {
    output_dir.as_ref().join(format!("{date}-taquerias.html"))
}

fn compare_records(a: &LocationRecord, b: &LocationRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Source => Ordering::Equal,
        SortColumn::Name => a
            .name_primary
            .to_lowercase()
            .cmp(&b.name_primary.to_lowercase()),
        SortColumn::Rating => a.rating.total_cmp(&b.rating),
        SortColumn::Reviews => a.reviews.cmp(&b.reviews),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rating: f64, reviews: u32) -> LocationRecord {
        LocationRecord {
            coordinates: Coordinates::new(35.0, 139.0),
            name_primary: name.to_string(),
            name_secondary: Some(name.to_string()),
            address_primary: None,
            address_secondary: None,
            rating,
            reviews,
            webpage: None,
        }
    }

    fn app() -> App {
        let dataset = Dataset::new(vec![
            record("Tacos El Pata", 4.5, 100),
            record("Burrito House", 3.0, 900),
            record("Al Pastor", 4.1, 250),
        ])
        .unwrap();
        let criteria = FilterCriteria::full_range(&dataset.bounds());
        App::new(
            dataset,
            criteria,
            MapOptions::default(),
            std::env::temp_dir().join("taqueria-map-tests"),
        )
    }

    fn names(app: &App) -> Vec<&str> {
        app.visible_records()
            .map(|record| record.name_primary.as_str())
            .collect()
    }

    #[test]
    fn starts_with_everything_matched() {
        let app = app();
        assert_eq!(app.matched, vec![0, 1, 2]);
    }

    #[test]
    fn min_cannot_pass_max() {
        let mut app = app();
        app.focus = Control::RatingMax;
        app.step_focused(-LARGE_STEP_FACTOR);
        assert!((app.criteria.rating_range.1 - 3.5).abs() < f64::EPSILON);

        app.focus = Control::RatingMin;
        app.step_focused(LARGE_STEP_FACTOR);
        assert!((app.criteria.rating_range.0 - 3.5).abs() < f64::EPSILON);
        assert!(app.matched.is_empty());
    }

    #[test]
    fn review_bounds_clamp_to_dataset() {
        let mut app = app();
        app.focus = Control::ReviewsMax;
        app.step_focused(5);
        assert_eq!(app.criteria.review_range.1, 900);

        app.focus = Control::ReviewsMin;
        app.step_focused(LARGE_STEP_FACTOR * 3);
        assert_eq!(app.criteria.review_range.0, 400);
        assert_eq!(names(&app), vec!["Burrito House"]);
    }

    #[test]
    fn typing_filters_by_translated_name() {
        let mut app = app();
        for ch in "PATA".chars() {
            app.push_query_char(ch);
        }
        assert_eq!(names(&app), vec!["Tacos El Pata"]);

        for _ in 0..4 {
            app.pop_query_char();
        }
        assert_eq!(app.criteria.name_query, None);
        assert_eq!(app.matched.len(), 3);
    }

    #[test]
    fn sorting_reorders_view_but_not_matched_set() {
        let mut app = app();
        app.cycle_sort();
        assert_eq!(app.sort_column, SortColumn::Name);
        assert_eq!(names(&app), vec!["Al Pastor", "Burrito House", "Tacos El Pata"]);

        app.cycle_sort();
        app.toggle_sort_order();
        assert_eq!(names(&app), vec!["Tacos El Pata", "Al Pastor", "Burrito House"]);
        assert_eq!(app.matched, vec![0, 1, 2]);
    }

    #[test]
    fn selection_stays_within_view() {
        let mut app = app();
        app.select_next(10);
        assert_eq!(app.selected_index, 2);

        for ch in "house".chars() {
            app.push_query_char(ch);
        }
        assert_eq!(app.selected_index, 0);
        assert_eq!(
            app.selected_record().map(|record| record.name_primary.as_str()),
            Some("Burrito House")
        );
    }

    #[test]
    fn map_and_table_share_the_matched_set() {
        let mut app = app();
        app.push_query_char('t');
        let output = app.render_map();

        assert_eq!(output.matched.len(), app.view.len());
        assert_eq!(output.center, app.center());
    }

    #[test]
    fn export_path_uses_date_prefix() {
        assert_eq!(
            export_path("/tmp/maps", "2024-03-03"),
            PathBuf::from("/tmp/maps/2024-03-03-taquerias.html")
        );
    }

    #[tokio::test]
    async fn export_writes_map_document() -> Result<()> {
        let mut app = app();
        app.output_dir = std::env::temp_dir().join("taqueria-map-export-test");

        let path = app.export_map().await?;
        let html = tokio::fs::read_to_string(&path).await?;
        assert_eq!(html.matches("L.marker(").count(), 3);

        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}
