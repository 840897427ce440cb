use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://localhost:4000/api";
pub const DEFAULT_GEO_URL: &str = "http://ip-api.com/json";

/// Immutable runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL, normalized to end in the `/v1` version segment.
    pub api_base: String,
    /// Optional coordinate override for weather recommendations.
    pub coords: Option<Coordinates>,
    /// Endpoint used to look up coordinates when no override is set.
    pub geo_url: String,
    /// When set, tracing output is written to this file.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CINEMOOD_LAT and CINEMOOD_LON must be set together")]
    PartialCoordinates,
    #[error("invalid coordinate {name}: {value}")]
    InvalidCoordinate { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("CINEMOOD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let coords = parse_coords(
            env::var("CINEMOOD_LAT").ok(),
            env::var("CINEMOOD_LON").ok(),
        )?;

        Ok(Self {
            api_base: normalize_base(&raw),
            coords,
            geo_url: env::var("CINEMOOD_GEO_URL").unwrap_or_else(|_| DEFAULT_GEO_URL.into()),
            log_file: env::var("CINEMOOD_LOG").ok().map(PathBuf::from),
        })
    }
}

/// Normalizes the configured base so every request URL carries the `/v1`
/// version segment exactly once.
pub fn normalize_base(raw: &str) -> String {
    if raw.ends_with("/v1") {
        raw.to_string()
    } else {
        format!("{}/v1", raw.trim_end_matches('/'))
    }
}

fn parse_coords(
    lat: Option<String>,
    lon: Option<String>,
) -> Result<Option<Coordinates>, ConfigError> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            let lat = lat
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidCoordinate { name: "CINEMOOD_LAT", value: lat })?;
            let lon = lon
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidCoordinate { name: "CINEMOOD_LON", value: lon })?;
            Ok(Some(Coordinates { lat, lon }))
        }
        _ => Err(ConfigError::PartialCoordinates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_with_version_suffix_is_kept() {
        assert_eq!(normalize_base("http://localhost:4000/api/v1"), "http://localhost:4000/api/v1");
    }

    #[test]
    fn version_suffix_is_appended() {
        assert_eq!(normalize_base("http://localhost:4000/api"), "http://localhost:4000/api/v1");
    }

    #[test]
    fn trailing_slash_is_stripped_before_appending() {
        assert_eq!(normalize_base("https://movies.example.com/api/"), "https://movies.example.com/api/v1");
    }

    #[test]
    fn coords_require_both_values() {
        assert!(matches!(
            parse_coords(Some("48.85".into()), None),
            Err(ConfigError::PartialCoordinates)
        ));
        assert!(matches!(
            parse_coords(None, Some("2.35".into())),
            Err(ConfigError::PartialCoordinates)
        ));
    }

    #[test]
    fn coords_parse_as_floats() {
        let coords = parse_coords(Some("48.85".into()), Some("2.35".into()))
            .unwrap()
            .unwrap();
        assert_eq!(coords, Coordinates { lat: 48.85, lon: 2.35 });
    }

    #[test]
    fn bad_coordinate_is_rejected() {
        assert!(matches!(
            parse_coords(Some("north".into()), Some("2.35".into())),
            Err(ConfigError::InvalidCoordinate { name: "CINEMOOD_LAT", .. })
        ));
    }
}
