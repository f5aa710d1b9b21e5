//! The filter-and-render pipeline.
//!
//! A pure function of an immutable record snapshot and the active criteria.
//! The matched list and the map document are derived from the same pass so
//! the table and the map always agree.

use crate::domain::{Coordinates, FilterCriteria, LocationRecord};
use crate::map::{render_document, MapOptions};

#[derive(Debug, Clone)]
pub struct RenderOutput<'a> {
    /// Matched records in source order
    pub matched: Vec<&'a LocationRecord>,
    pub center: Coordinates,
    pub map_markup: String,
}

/// Indices into `records` of every record passing all active criteria.
pub fn filter_indices(records: &[LocationRecord], criteria: &FilterCriteria) -> Vec<usize> {
    let query = criteria.normalized_query();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches_with_query(record, query.as_deref()))
        .map(|(index, _)| index)
        .collect()
}

pub fn filter<'a>(
    records: &'a [LocationRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a LocationRecord> {
    filter_indices(records, criteria)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Mean latitude and mean longitude; `None` for an empty set.
pub fn map_center<'a, I>(matched: I) -> Option<Coordinates>
where
    I: IntoIterator<Item = &'a LocationRecord>,
{
    let (count, latitude, longitude) = matched.into_iter().fold(
        (0_usize, 0.0_f64, 0.0_f64),
        |(count, latitude, longitude), record| {
            (
                count + 1,
                latitude + record.coordinates.latitude,
                longitude + record.coordinates.longitude,
            )
        },
    );

    if count == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    Some(Coordinates::new(latitude / count, longitude / count))
}

pub fn render<'a>(
    records: &'a [LocationRecord],
    criteria: &FilterCriteria,
    options: &MapOptions,
) -> RenderOutput<'a> {
    let matched = filter(records, criteria);
    let center = map_center(matched.iter().copied()).unwrap_or(options.default_center);
    let map_markup = render_document(&matched, center, options);

    tracing::debug!(
        total = records.len(),
        matched = matched.len(),
        latitude = center.latitude,
        longitude = center.longitude,
        "rendered map"
    );

    RenderOutput {
        matched,
        center,
        map_markup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        rating: f64,
        reviews: u32,
        latitude: f64,
        longitude: f64,
    ) -> LocationRecord {
        LocationRecord {
            coordinates: Coordinates::new(latitude, longitude),
            name_primary: name.to_string(),
            name_secondary: Some(name.to_string()),
            address_primary: None,
            address_secondary: None,
            rating,
            reviews,
            webpage: None,
        }
    }

    fn sample() -> Vec<LocationRecord> {
        vec![
            record("Tacos El Pata", 4.5, 100, 35.0, 139.0),
            record("Burrito House", 3.0, 900, 34.0, 135.0),
            record("Taco Rico", 4.1, 250, 43.0, 141.0),
        ]
    }

    #[test]
    fn rating_and_review_ranges_select_first_record() {
        let records = vec![
            record("A", 4.5, 100, 35.0, 139.0),
            record("B", 3.0, 900, 34.0, 135.0),
        ];
        let criteria = FilterCriteria::new((4.0, 5.0), (0, 500));

        let output = render(&records, &criteria, &MapOptions::default());
        assert_eq!(output.matched, vec![&records[0]]);
        assert_eq!(output.map_markup.matches("L.marker(").count(), 1);
    }

    #[test]
    fn zero_review_range_matches_nothing() {
        let records = sample();
        let criteria = FilterCriteria::new((0.0, 5.0), (0, 0));

        let options = MapOptions::default();
        let output = render(&records, &criteria, &options);
        assert!(output.matched.is_empty());
        assert_eq!(output.map_markup.matches("L.marker(").count(), 0);
        assert_eq!(output.center, options.default_center);
    }

    #[test]
    fn name_query_is_case_insensitive_substring() {
        let records = sample();
        let base = FilterCriteria::new((0.0, 5.0), (0, 1000));

        let pata = filter(&records, &base.clone().with_name_query("pata"));
        assert_eq!(pata, vec![&records[0]]);

        let lower = filter(&records, &base.clone().with_name_query("taco"));
        let upper = filter(&records, &base.with_name_query("Taco"));
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 2);
    }

    #[test]
    fn center_is_mean_of_matched_coordinates() {
        let records = sample();
        let criteria = FilterCriteria::new((4.0, 5.0), (0, 1000));

        let output = render(&records, &criteria, &MapOptions::default());
        assert_eq!(output.center, Coordinates::new(39.0, 140.0));
    }

    #[test]
    fn indices_agree_with_record_predicate() {
        let records = sample();
        let criteria = [
            FilterCriteria::new((4.0, 5.0), (0, 1000)),
            FilterCriteria::new((0.0, 5.0), (200, 1000)).with_name_query(" TACO "),
            FilterCriteria::new((4.6, 4.0), (0, 1000)),
        ];

        for criteria in &criteria {
            let indices = filter_indices(&records, criteria);
            for (index, record) in records.iter().enumerate() {
                assert_eq!(indices.contains(&index), criteria.matches(record));
            }
        }
    }

    #[test]
    fn indices_keep_source_order() {
        let records = sample();
        let criteria = FilterCriteria::new((0.0, 5.0), (0, 1000));
        assert_eq!(filter_indices(&records, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn source_records_are_untouched() {
        let records = sample();
        let before = records.clone();

        let _ = render(
            &records,
            &FilterCriteria::new((4.0, 4.2), (0, 300)).with_name_query("rico"),
            &MapOptions::default(),
        );
        assert_eq!(records, before);
    }
}
