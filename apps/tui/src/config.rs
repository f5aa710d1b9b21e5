use crate::domain::Coordinates;
use crate::map::MapOptions;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DATA_FILE: &str = "places-of-taqueria-in-japan1.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "./maps";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve current directory")]
    CurrentDir(#[source] std::io::Error),
    #[error("MAP_DEFAULT_CENTER must be `lat,lon`, got `{0}`")]
    InvalidCenter(String),
    #[error("MAP_ZOOM must be an integer between 0 and 19, got `{0}`")]
    InvalidZoom(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    /// Directory for maps exported from the dashboard
    pub output_dir: PathBuf,
    /// Exact path for the headless map document, if one was requested
    pub output_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub map: MapOptions,
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir = env::current_dir().map_err(ConfigError::CurrentDir)?;
    resolve(&base_dir, |key| env::var(key).ok())
}

/// Builds the configuration from an arbitrary variable lookup. Relative paths
/// are resolved against `base_dir`.
pub fn resolve<F>(base_dir: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let data_name = lookup("TAQUERIA_DATA").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
    let output_dir = lookup("MAP_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

    let mut map = MapOptions::default();
    if let Some(center) = lookup("MAP_DEFAULT_CENTER") {
        map.default_center = parse_center(&center)?;
    }
    if let Some(zoom) = lookup("MAP_ZOOM") {
        map.zoom_start = parse_zoom(&zoom)?;
    }
    if let Some(title) = lookup("MAP_TITLE") {
        map.title = title;
    }

    Ok(AppConfig {
        data_path: base_dir.join(data_name),
        output_dir: base_dir.join(output_dir),
        output_file: lookup("MAP_OUTPUT").map(|path| base_dir.join(path)),
        log_file: lookup("LOG_FILE").map(|path| base_dir.join(path)),
        map,
    })
}

pub fn parse_center(value: &str) -> Result<Coordinates, ConfigError> {
    let invalid = || ConfigError::InvalidCenter(value.to_string());

    let (latitude, longitude) = value.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = latitude.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = longitude.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid());
    }

    Ok(Coordinates::new(latitude, longitude))
}

fn parse_zoom(value: &str) -> Result<u8, ConfigError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|zoom| *zoom <= 19)
        .ok_or_else(|| ConfigError::InvalidZoom(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_resolve_against_base_dir() -> Result<(), ConfigError> {
        let config = resolve(Path::new("/srv/app"), lookup_from(&[]))?;

        assert_eq!(config.data_path, PathBuf::from("/srv/app").join(DEFAULT_DATA_FILE));
        assert_eq!(config.output_dir, PathBuf::from("/srv/app/./maps"));
        assert_eq!(config.output_file, None);
        assert_eq!(config.map, MapOptions::default());
        Ok(())
    }

    #[test]
    fn environment_overrides_defaults() -> Result<(), ConfigError> {
        let config = resolve(
            Path::new("/srv/app"),
            lookup_from(&[
                ("TAQUERIA_DATA", "/data/tacos.csv"),
                ("MAP_OUTPUT", "out/map.html"),
                ("MAP_DEFAULT_CENTER", "35.68, 139.76"),
                ("MAP_ZOOM", "7"),
            ]),
        )?;

        assert_eq!(config.data_path, PathBuf::from("/data/tacos.csv"));
        assert_eq!(config.output_file, Some(PathBuf::from("/srv/app/out/map.html")));
        assert_eq!(config.map.default_center, Coordinates::new(35.68, 139.76));
        assert_eq!(config.map.zoom_start, 7);
        Ok(())
    }

    #[test]
    fn blank_values_fall_back_to_defaults() -> Result<(), ConfigError> {
        let config = resolve(Path::new("/srv"), lookup_from(&[("MAP_ZOOM", "  ")]))?;
        assert_eq!(config.map.zoom_start, MapOptions::default().zoom_start);
        Ok(())
    }

    #[test]
    fn invalid_center_is_rejected() {
        assert!(matches!(
            parse_center("35.68"),
            Err(ConfigError::InvalidCenter(_))
        ));
        assert!(matches!(
            parse_center("95.0,139.0"),
            Err(ConfigError::InvalidCenter(_))
        ));
    }

    #[test]
    fn invalid_zoom_is_rejected() {
        let result = resolve(Path::new("/srv"), lookup_from(&[("MAP_ZOOM", "25")]));
        assert!(matches!(result, Err(ConfigError::InvalidZoom(_))));
    }
}
