use serde::Serialize;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One restaurant location, as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub coordinates: Coordinates,
    /// Name in the original language
    pub name_primary: String,
    /// Translated name, the one searched by the name filter
    pub name_secondary: Option<String>,
    pub address_primary: Option<String>,
    pub address_secondary: Option<String>,
    pub rating: f64,
    pub reviews: u32,
    pub webpage: Option<String>,
}

/// The active filters for one interaction. Both ranges are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub rating_range: (f64, f64),
    pub review_range: (u32, u32),
    pub name_query: Option<String>,
}

impl FilterCriteria {
    pub fn new(rating_range: (f64, f64), review_range: (u32, u32)) -> Self {
        Self {
            rating_range,
            review_range,
            name_query: None,
        }
    }

    #[must_use]
    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }

    /// Lowercased, trimmed query; `None` when there is nothing to search for.
    pub fn normalized_query(&self) -> Option<String> {
        self.name_query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches_ranges(&self, record: &LocationRecord) -> bool {
        let (rating_min, rating_max) = self.rating_range;
        let (reviews_min, reviews_max) = self.review_range;

        rating_min <= record.rating
            && record.rating <= rating_max
            && reviews_min <= record.reviews
            && record.reviews <= reviews_max
    }

    pub fn matches(&self, record: &LocationRecord) -> bool {
        self.matches_with_query(record, self.normalized_query().as_deref())
    }

    /// `matches` with the query already normalized, so a caller filtering
    /// many records normalizes it once.
    pub fn matches_with_query(&self, record: &LocationRecord, query: Option<&str>) -> bool {
        self.matches_ranges(record) && query.is_none_or(|query| name_contains(record, query))
    }
}

/// Case-insensitive substring test against the translated name. `query`
/// must already be lowercased. Records without a translated name never match.
pub fn name_contains(record: &LocationRecord, query: &str) -> bool {
    record
        .name_secondary
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(query))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Source,
    Name,
    Rating,
    Reviews,
}

impl SortColumn {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Source),
            1 => Some(Self::Name),
            2 => Some(Self::Rating),
            3 => Some(Self::Reviews),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Name => 1,
            Self::Rating => 2,
            Self::Reviews => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "source" => Some(Self::Source),
            "name" => Some(Self::Name),
            "rating" => Some(Self::Rating),
            "reviews" => Some(Self::Reviews),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "File order",
            Self::Name => "Name",
            Self::Rating => "Rating",
            Self::Reviews => "Reviews",
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::Source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name_secondary: Option<&str>, rating: f64, reviews: u32) -> LocationRecord {
        LocationRecord {
            coordinates: Coordinates::new(35.0, 139.0),
            name_primary: "タコス".to_string(),
            name_secondary: name_secondary.map(str::to_string),
            address_primary: None,
            address_secondary: None,
            rating,
            reviews,
            webpage: None,
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let criteria = FilterCriteria::new((4.0, 4.5), (10, 100));

        assert!(criteria.matches(&record(None, 4.0, 10)));
        assert!(criteria.matches(&record(None, 4.5, 100)));
        assert!(!criteria.matches(&record(None, 4.6, 50)));
        assert!(!criteria.matches(&record(None, 4.2, 101)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let criteria = FilterCriteria::new((5.0, 4.0), (0, 1000));
        assert!(!criteria.matches(&record(None, 4.5, 10)));
    }

    #[test]
    fn blank_query_is_ignored() {
        let criteria = FilterCriteria::new((0.0, 5.0), (0, 1000)).with_name_query("   ");

        assert_eq!(criteria.normalized_query(), None);
        assert!(criteria.matches(&record(None, 3.0, 5)));
    }

    #[test]
    fn missing_translated_name_never_matches_query() {
        let criteria = FilterCriteria::new((0.0, 5.0), (0, 1000)).with_name_query("taco");

        assert!(!criteria.matches(&record(None, 3.0, 5)));
        assert!(criteria.matches(&record(Some("TACO Shop"), 3.0, 5)));
    }

    #[test]
    fn sort_column_cycles_back_to_source() {
        let mut column = SortColumn::Source;
        for _ in 0..4 {
            column = column.next();
        }
        assert_eq!(column, SortColumn::Source);
        assert_eq!(SortColumn::parse(" Rating "), Some(SortColumn::Rating));
    }
}
