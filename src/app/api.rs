use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::app::models::{MovieDetails, MovieSummary, Paginated, WeatherPayload};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PREVIEW_LIMIT: usize = 300;

/// Why a fetch was rejected. The reason token is what the UI renders
/// inline next to the failing page.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("status {0}")]
    BadStatus(u16),
    #[error("not_json")]
    NotJson,
    #[error("fetch_failed: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn reason(&self) -> String {
        match self {
            FetchError::BadStatus(code) => code.to_string(),
            FetchError::NotJson => "not_json".to_string(),
            FetchError::Transport(_) => "fetch_failed".to_string(),
        }
    }
}

/// A failed fetch plus the diagnostics the debug panel shows.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub url: String,
    pub error: FetchError,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub preview: String,
}

impl FetchFailure {
    fn transport(url: &str, detail: String) -> Self {
        Self {
            url: url.to_string(),
            error: FetchError::Transport(detail),
            status: None,
            content_type: None,
            preview: String::new(),
        }
    }

    pub fn reason(&self) -> String {
        self.error.reason()
    }
}

/// Gateway to the movie-metadata API. Validates every response (status
/// and content-type) before decoding. Retries are the caller's concern.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    /// `base` must already be normalized (see `config::normalize_base`).
    pub fn new(base: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base })
    }

    pub fn trending(&self, page: u32) -> Result<Paginated<MovieSummary>, FetchFailure> {
        self.get(&self.url("movies/trending", &[("page", &page.to_string())]))
    }

    pub fn details(&self, id: u64) -> Result<MovieDetails, FetchFailure> {
        self.get(&self.url(&format!("movies/details/{id}"), &[]))
    }

    pub fn search(&self, query: &str, page: u32) -> Result<Paginated<MovieSummary>, FetchFailure> {
        self.get(&self.url(
            "movies/search",
            &[("query", query), ("page", &page.to_string())],
        ))
    }

    pub fn mood_by_weather(&self, lat: f64, lon: f64) -> Result<WeatherPayload, FetchFailure> {
        self.get(&self.url(
            "smart/mood-by-weather",
            &[("lat", &lat.to_string()), ("lon", &lon.to_string())],
        ))
    }

    /// Candidate endpoints for the mood query, most likely first. The
    /// probe walks them in order and stops at the first validated hit.
    pub fn mood_candidates(&self, mood: &str, page: u32) -> Vec<String> {
        let page = page.to_string();
        [
            "smart/by-mood",
            "mood",
            "movies/mood",
            "movies/by-mood",
            "recommendations/mood",
        ]
        .iter()
        .map(|path| self.url(path, &[("mood", mood), ("page", &page)]))
        .collect()
    }

    pub fn probe_mood(&self, urls: &[String]) -> Probe<Paginated<MovieSummary>> {
        probe_first(urls, |url| self.get(url))
    }

    /// Raw image/byte download, reusing the gateway's client and timeout.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| FetchFailure::transport(url, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure {
                url: url.to_string(),
                error: FetchError::BadStatus(status.as_u16()),
                status: Some(status.as_u16()),
                content_type: None,
                preview: String::new(),
            });
        }
        let bytes = response
            .bytes()
            .map_err(|e| FetchFailure::transport(url, e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base, path);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchFailure> {
        tracing::debug!(%url, "api request");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| FetchFailure::transport(url, e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !status.is_success() || !content_type.contains("application/json") {
            let preview: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(PREVIEW_LIMIT)
                .collect();
            let error = if !status.is_success() {
                FetchError::BadStatus(status.as_u16())
            } else {
                FetchError::NotJson
            };
            tracing::warn!(%url, status = status.as_u16(), %content_type, "api request rejected");
            return Err(FetchFailure {
                url: url.to_string(),
                error,
                status: Some(status.as_u16()),
                content_type: Some(content_type),
                preview,
            });
        }

        response.json::<T>().map_err(|e| FetchFailure {
            url: url.to_string(),
            error: FetchError::Transport(e.to_string()),
            status: Some(status.as_u16()),
            content_type: Some(content_type),
            preview: String::new(),
        })
    }
}

/// Outcome of a sequential endpoint probe. `tried` always lists the URLs
/// attempted, in order, for diagnostics.
#[derive(Debug)]
pub enum Probe<T> {
    Hit { tried: Vec<String>, value: T },
    Miss { tried: Vec<String>, last: Option<FetchFailure> },
}

/// Tries each candidate URL in order, short-circuiting on the first
/// success. Strictly sequential, no racing.
pub fn probe_first<T>(
    urls: &[String],
    mut fetch: impl FnMut(&str) -> Result<T, FetchFailure>,
) -> Probe<T> {
    let mut tried = Vec::new();
    let mut last = None;
    for url in urls {
        tried.push(url.clone());
        match fetch(url) {
            Ok(value) => return Probe::Hit { tried, value },
            Err(failure) => last = Some(failure),
        }
    }
    Probe::Miss { tried, last }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:4000/api/v1".to_string()).unwrap()
    }

    #[test]
    fn trending_url_carries_page() {
        let c = client();
        assert_eq!(
            c.url("movies/trending", &[("page", "2")]),
            "http://localhost:4000/api/v1/movies/trending?page=2"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let c = client();
        assert_eq!(
            c.url("movies/search", &[("query", "blade runner"), ("page", "1")]),
            "http://localhost:4000/api/v1/movies/search?query=blade%20runner&page=1"
        );
    }

    #[test]
    fn mood_candidates_are_ordered() {
        let c = client();
        let urls = c.mood_candidates("happy", 1);
        assert_eq!(urls.len(), 5);
        assert_eq!(
            urls[0],
            "http://localhost:4000/api/v1/smart/by-mood?mood=happy&page=1"
        );
        assert_eq!(
            urls[4],
            "http://localhost:4000/api/v1/recommendations/mood?mood=happy&page=1"
        );
    }

    #[test]
    fn probe_stops_at_first_success() {
        let urls: Vec<String> = (1..=4).map(|i| format!("http://api/{i}")).collect();
        let mut calls = Vec::new();
        let outcome = probe_first(&urls, |url| {
            calls.push(url.to_string());
            if url.ends_with("/3") {
                Ok(url.to_string())
            } else {
                Err(FetchFailure::transport(url, "refused".into()))
            }
        });

        assert_eq!(calls, &urls[..3]);
        match outcome {
            Probe::Hit { tried, value } => {
                assert_eq!(tried, &urls[..3]);
                assert_eq!(value, "http://api/3");
            }
            Probe::Miss { .. } => panic!("expected a hit on the third candidate"),
        }
    }

    #[test]
    fn probe_reports_all_attempts_on_total_failure() {
        let urls: Vec<String> = (1..=3).map(|i| format!("http://api/{i}")).collect();
        let outcome = probe_first(&urls, |url| -> Result<(), FetchFailure> {
            Err(FetchFailure {
                url: url.to_string(),
                error: FetchError::BadStatus(404),
                status: Some(404),
                content_type: None,
                preview: String::new(),
            })
        });

        match outcome {
            Probe::Miss { tried, last } => {
                assert_eq!(tried, urls);
                assert_eq!(last.unwrap().reason(), "404");
            }
            Probe::Hit { .. } => panic!("no candidate should succeed"),
        }
    }

    #[test]
    fn reason_tokens_match_vocabulary() {
        assert_eq!(FetchError::BadStatus(502).reason(), "502");
        assert_eq!(FetchError::NotJson.reason(), "not_json");
        assert_eq!(FetchError::Transport("x".into()).reason(), "fetch_failed");
    }
}
