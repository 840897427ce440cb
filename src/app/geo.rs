use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;

/// Geolocation answers must arrive within this window or fail
/// deterministically.
pub const GEO_TIMEOUT: Duration = Duration::from_millis(8000);

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoError {
    #[error("location lookup timed out")]
    Timeout,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy)]
pub struct GeoFix {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    status: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Resolves coordinates for the weather query. A configured override wins;
/// otherwise the geolocation endpoint is asked, with its own short-timeout
/// client so a stalled lookup cannot hang the worker for long.
pub fn locate(config: &Config) -> Result<GeoFix, GeoError> {
    if let Some(coords) = config.coords {
        return Ok(GeoFix { lat: coords.lat, lon: coords.lon });
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(GEO_TIMEOUT)
        .build()
        .map_err(|e| GeoError::Unavailable(e.to_string()))?;

    tracing::debug!(url = %config.geo_url, "geolocation lookup");
    let response = client.get(&config.geo_url).send().map_err(|e| {
        if e.is_timeout() {
            GeoError::Timeout
        } else {
            GeoError::Unavailable(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeoError::Unavailable(format!("status {}", status.as_u16())));
    }

    let payload: GeoResponse = response
        .json()
        .map_err(|e| GeoError::Unavailable(e.to_string()))?;
    fix_from(payload)
}

/// Validates the lookup payload: a non-`success` status field or missing
/// coordinates both count as unavailable.
fn fix_from(payload: GeoResponse) -> Result<GeoFix, GeoError> {
    if let Some(status) = payload.status.as_deref()
        && status != "success"
    {
        return Err(GeoError::Unavailable(format!("lookup status {status}")));
    }

    match (payload.lat, payload.lon) {
        (Some(lat), Some(lon)) => Ok(GeoFix { lat, lon }),
        _ => Err(GeoError::Unavailable("no coordinates in response".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Coordinates;

    #[test]
    fn configured_coordinates_skip_the_lookup() {
        let config = Config {
            api_base: "http://localhost:4000/api/v1".to_string(),
            coords: Some(Coordinates { lat: 59.33, lon: 18.07 }),
            // Unroutable on purpose; the override must win before any request.
            geo_url: "http://192.0.2.1/json".to_string(),
            log_file: None,
        };
        let fix = locate(&config).unwrap();
        assert_eq!(fix.lat, 59.33);
        assert_eq!(fix.lon, 18.07);
    }

    #[test]
    fn lookup_status_other_than_success_is_rejected() {
        let payload: GeoResponse =
            serde_json::from_str(r#"{"status": "fail", "message": "private range"}"#).unwrap();
        assert!(matches!(fix_from(payload), Err(GeoError::Unavailable(_))));
    }

    #[test]
    fn payload_without_coordinates_is_rejected() {
        let payload: GeoResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(matches!(fix_from(payload), Err(GeoError::Unavailable(_))));
    }
}
