use crate::domain::{Coordinates, FilterCriteria, LocationRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["coordinatex", "coordinatey", "name", "rating", "reviews"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read dataset header")]
    Header(#[source] csv::Error),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: invalid `{column}`: {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },
    #[error("dataset contains no rows")]
    Empty,
}

/// One CSV row as it appears on disk. Optional columns may be absent from
/// the header or left empty.
#[derive(Debug, Deserialize)]
struct RawRow {
    coordinatex: f64,
    coordinatey: f64,
    name: String,
    rating: f64,
    reviews: u32,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    address_en: Option<String>,
    #[serde(default)]
    webpage: Option<String>,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<LocationRecord, DatasetError> {
        let invalid = |column, reason: String| DatasetError::InvalidValue {
            row,
            column,
            reason,
        };

        if !(-90.0..=90.0).contains(&self.coordinatex) {
            return Err(invalid(
                "coordinatex",
                format!("latitude {} is outside [-90, 90]", self.coordinatex),
            ));
        }
        if !(-180.0..=180.0).contains(&self.coordinatey) {
            return Err(invalid(
                "coordinatey",
                format!("longitude {} is outside [-180, 180]", self.coordinatey),
            ));
        }
        if !self.rating.is_finite() {
            return Err(invalid("rating", format!("{} is not a number", self.rating)));
        }
        if self.name.is_empty() {
            return Err(invalid("name", "value is empty".to_string()));
        }

        Ok(LocationRecord {
            coordinates: Coordinates::new(self.coordinatex, self.coordinatey),
            name_primary: self.name,
            name_secondary: non_empty(self.name_en),
            address_primary: non_empty(self.address),
            address_secondary: non_empty(self.address_en),
            rating: self.rating,
            reviews: self.reviews,
            webpage: non_empty(self.webpage),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Value ranges present in a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub rating: (f64, f64),
    pub reviews: (u32, u32),
    pub latitude: (f64, f64),
    pub longitude: (f64, f64),
}

impl Bounds {
    fn of(records: &[LocationRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut bounds = Self {
            rating: (first.rating, first.rating),
            reviews: (first.reviews, first.reviews),
            latitude: (first.coordinates.latitude, first.coordinates.latitude),
            longitude: (first.coordinates.longitude, first.coordinates.longitude),
        };

        for record in &records[1..] {
            bounds.rating = widen(bounds.rating, record.rating);
            bounds.latitude = widen(bounds.latitude, record.coordinates.latitude);
            bounds.longitude = widen(bounds.longitude, record.coordinates.longitude);
            bounds.reviews = (
                bounds.reviews.0.min(record.reviews),
                bounds.reviews.1.max(record.reviews),
            );
        }

        Some(bounds)
    }
}

impl FilterCriteria {
    /// Criteria spanning every value present, with no name query.
    pub fn full_range(bounds: &Bounds) -> Self {
        Self::new(bounds.rating, bounds.reviews)
    }
}

fn widen((min, max): (f64, f64), value: f64) -> (f64, f64) {
    (min.min(value), max.max(value))
}

/// The immutable snapshot of all locations, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LocationRecord>,
    bounds: Bounds,
}

impl Dataset {
    pub fn new(records: Vec<LocationRecord>) -> Result<Self, DatasetError> {
        let bounds = Bounds::of(&records).ok_or(DatasetError::Empty)?;
        Ok(Self { records, bounds })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(DatasetError::Header)?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|header| header == *column))
        {
            return Err(DatasetError::MissingColumn(missing));
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRow>().enumerate() {
            let row_number = index + 1;
            let raw = row.map_err(|source| DatasetError::Row {
                row: row_number,
                source,
            })?;
            records.push(raw.into_record(row_number)?);
        }

        Self::new(records)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(bytes.as_slice())
    }

    pub async fn load(path: &Path) -> Result<Self, DatasetError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::from_reader(bytes.as_slice())?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
