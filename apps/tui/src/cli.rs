use clap::{CommandFactory, Parser};
use taqueria_map::{Bounds, FilterCriteria, SortColumn};

#[derive(Debug, Parser)]
#[command(name = "taqueria_map", version, about = "Taqueria map dashboard")]
pub struct CliArgs {
    /// Print the matched locations and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override dataset path
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Write the headless map document to this file
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Override the directory maps are exported to from the dashboard
    #[arg(long = "out-dir", value_name = "PATH")]
    pub out_dir: Option<String>,

    /// Map centre used when nothing matches, as `lat,lon`
    #[arg(long, value_name = "LAT,LON")]
    pub center: Option<String>,

    /// Initial map zoom level
    #[arg(long, value_name = "N")]
    pub zoom: Option<u8>,

    /// Lowest rating to include
    #[arg(long = "rating-min", value_name = "N")]
    pub rating_min: Option<f64>,

    /// Highest rating to include
    #[arg(long = "rating-max", value_name = "N")]
    pub rating_max: Option<f64>,

    /// Fewest reviews to include
    #[arg(long = "reviews-min", value_name = "N")]
    pub reviews_min: Option<u32>,

    /// Most reviews to include
    #[arg(long = "reviews-max", value_name = "N")]
    pub reviews_max: Option<u32>,

    /// Only include locations whose translated name contains this text
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,

    /// Order of the printed rows: source, name, rating or reviews
    #[arg(long, value_name = "COLUMN", value_parser = parse_sort_column)]
    pub sort: Option<SortColumn>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("TAQUERIA_DATA", data);
        }
        if let Some(out) = &self.out {
            std::env::set_var("MAP_OUTPUT", out);
        }
        if let Some(dir) = &self.out_dir {
            std::env::set_var("MAP_OUTPUT_DIR", dir);
        }
        if let Some(center) = &self.center {
            std::env::set_var("MAP_DEFAULT_CENTER", center);
        }
        if let Some(zoom) = self.zoom {
            std::env::set_var("MAP_ZOOM", zoom.to_string());
        }
    }

    /// Criteria from the command line. Bounds not given stay fully open.
    pub fn criteria(&self, bounds: &Bounds) -> FilterCriteria {
        let mut criteria = FilterCriteria::full_range(bounds);

        if let Some(min) = self.rating_min {
            criteria.rating_range.0 = min;
        }
        if let Some(max) = self.rating_max {
            criteria.rating_range.1 = max;
        }
        if let Some(min) = self.reviews_min {
            criteria.review_range.0 = min;
        }
        if let Some(max) = self.reviews_max {
            criteria.review_range.1 = max;
        }
        criteria.name_query.clone_from(&self.name);

        criteria
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

fn parse_sort_column(value: &str) -> Result<SortColumn, String> {
    SortColumn::parse(value)
        .ok_or_else(|| format!("unknown sort column `{value}` (source, name, rating, reviews)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        rating: (3.0, 4.8),
        reviews: (4, 1200),
        latitude: (26.2, 43.1),
        longitude: (127.6, 141.4),
    };

    #[test]
    fn unset_flags_keep_full_range() {
        let args = CliArgs::parse_from(["taqueria_map", "--headless"]);
        assert_eq!(args.criteria(&BOUNDS), FilterCriteria::full_range(&BOUNDS));
    }

    #[test]
    fn flags_override_individual_bounds() {
        let args = CliArgs::parse_from([
            "taqueria_map",
            "--rating-min",
            "4.0",
            "--reviews-max",
            "500",
            "--name",
            "pata",
            "--sort",
            "Rating",
        ]);
        let criteria = args.criteria(&BOUNDS);

        assert_eq!(criteria.rating_range, (4.0, 4.8));
        assert_eq!(criteria.review_range, (4, 500));
        assert_eq!(criteria.name_query.as_deref(), Some("pata"));
        assert_eq!(args.sort, Some(SortColumn::Rating));
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let result = CliArgs::try_parse_from(["taqueria_map", "--sort", "distance"]);
        assert!(result.is_err());
    }
}
