// Export our modules for use in the binary and tests
pub mod config;
pub mod dataset;
pub mod domain;
pub mod map;
pub mod pipeline;

pub use dataset::{Bounds, Dataset, DatasetError};
pub use domain::{Coordinates, FilterCriteria, LocationRecord, SortColumn};
pub use map::MapOptions;
pub use pipeline::{render, RenderOutput};
