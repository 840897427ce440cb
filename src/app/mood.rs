use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::app::geo::GeoError;
use crate::app::models::{MovieSummary, Paginated, WeatherPayload};

/// Fixed mood vocabulary; the keys are what the recommendation endpoint
/// understands.
pub struct Mood {
    pub key: &'static str,
    pub label: &'static str,
}

pub const MOODS: &[Mood] = &[
    Mood { key: "happy", label: "Happy" },
    Mood { key: "sad", label: "Sad" },
    Mood { key: "romance", label: "Romantic" },
    Mood { key: "nostalgic", label: "Nostalgic" },
    Mood { key: "excited", label: "Excited" },
    Mood { key: "adventurer", label: "Adventurous" },
    Mood { key: "scifi", label: "Sci-Fi" },
];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MoodSelection {
    #[default]
    None,
    /// A plain mood key from `MOODS`.
    Key(String),
    /// Synthetic weather tag, e.g. `weather:Rain`. Not paginated.
    Weather(String),
}

/// Failures surfaced on the mood screen. Geolocation and weather failures
/// get their own wording so the user knows to pick a mood manually.
#[derive(Debug, Clone)]
pub enum MoodError {
    Fetch { reason: String },
    Geo(GeoError),
    Weather { reason: String },
}

impl MoodError {
    pub fn message(&self) -> String {
        match self {
            MoodError::Fetch { reason } => format!("Failed to fetch ({reason})"),
            MoodError::Geo(e) => {
                format!("Could not determine your location ({e}). Pick a mood manually.")
            }
            MoodError::Weather { reason } => {
                format!("Weather recommendations unavailable ({reason}). Pick a mood manually.")
            }
        }
    }
}

/// Transient state of the mood screen. Replaced wholesale on every
/// successful fetch; a failed page-turn keeps the previous grid visible.
#[derive(Default)]
pub struct MoodState {
    pub selection: MoodSelection,
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieSummary>,
    pub error: Option<MoodError>,
    /// Endpoints attempted by the last failed probe, for the debug list.
    pub tried: Vec<String>,
    pub loading: bool,
}

impl MoodState {
    pub fn selected_key(&self) -> Option<&str> {
        match &self.selection {
            MoodSelection::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Pagination only applies to plain mood selections, within bounds.
    pub fn can_page_next(&self) -> bool {
        self.selected_key().is_some() && self.page < self.total_pages
    }

    pub fn can_page_prev(&self) -> bool {
        self.selected_key().is_some() && self.page > 1
    }

    /// Whether the pager row is worth drawing at all.
    pub fn can_pager(&self) -> bool {
        self.selected_key().is_some() && self.total_pages > 1
    }

    pub fn apply_mood(&mut self, key: String, payload: Paginated<MovieSummary>) {
        self.selection = MoodSelection::Key(key);
        self.results = payload.results;
        self.page = payload.page.max(1);
        self.total_pages = payload.total_pages.max(1);
        self.error = None;
        self.tried.clear();
        self.loading = false;
    }

    pub fn apply_weather(&mut self, payload: WeatherPayload) {
        self.selection = MoodSelection::Weather(format!("weather:{}", payload.weather.main));
        self.results = payload.results;
        self.page = 1;
        self.total_pages = 1;
        self.error = None;
        self.tried.clear();
        self.loading = false;
    }

    pub fn fail(&mut self, error: MoodError, tried: Vec<String>) {
        self.error = Some(error);
        self.tried = tried;
        self.loading = false;
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedMood {
    mood: String,
    saved_at: DateTime<Local>,
}

fn cache_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("cinemood").join("last_mood.json"))
}

/// Reads the persisted mood choice, discarding anything outside the
/// vocabulary. Read once when the mood screen first opens.
pub fn load_last_mood() -> Option<String> {
    let path = cache_file()?;
    let raw = fs::read_to_string(path).ok()?;
    let saved: SavedMood = serde_json::from_str(&raw).ok()?;
    MOODS
        .iter()
        .any(|m| m.key == saved.mood)
        .then_some(saved.mood)
}

/// Persists the last applied plain mood. Failures are logged and ignored;
/// the cache is a convenience, not state the app depends on.
pub fn save_last_mood(key: &str) {
    let Some(path) = cache_file() else {
        return;
    };
    let saved = SavedMood { mood: key.to_string(), saved_at: Local::now() };
    let json = match serde_json::to_string(&saved) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode last mood");
            return;
        }
    };
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        tracing::warn!(error = %e, "failed to create cache directory");
        return;
    }
    if let Err(e) = fs::write(&path, json) {
        tracing::warn!(error = %e, "failed to persist last mood");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(results: usize, page_no: u32, total: u32) -> Paginated<MovieSummary> {
        Paginated {
            results: (0..results as u64)
                .map(|id| MovieSummary { id, title: format!("M{id}"), ..MovieSummary::default() })
                .collect(),
            page: page_no,
            total_pages: total,
        }
    }

    #[test]
    fn pagination_noops_at_both_bounds() {
        let mut state = MoodState::default();
        state.apply_mood("happy".into(), page(3, 1, 4));
        assert!(state.can_page_next());
        assert!(!state.can_page_prev());

        state.apply_mood("happy".into(), page(3, 4, 4));
        assert!(!state.can_page_next());
        assert!(state.can_page_prev());
    }

    #[test]
    fn pagination_disabled_without_selection() {
        let state = MoodState::default();
        assert!(!state.can_page_next());
        assert!(!state.can_page_prev());
    }

    #[test]
    fn weather_selection_disables_pagination() {
        let mut state = MoodState::default();
        state.apply_weather(WeatherPayload {
            results: vec![MovieSummary { id: 1, ..MovieSummary::default() }],
            weather: crate::app::models::WeatherInfo { main: "Clear".into() },
        });
        assert_eq!(state.selection, MoodSelection::Weather("weather:Clear".into()));
        assert!(!state.can_page_next());
        assert!(!state.can_page_prev());
    }

    #[test]
    fn failed_page_turn_keeps_prior_results() {
        let mut state = MoodState::default();
        state.apply_mood("scifi".into(), page(5, 1, 2));
        let tried = vec!["http://api/a".to_string(), "http://api/b".to_string()];
        state.fail(MoodError::Fetch { reason: "503".into() }, tried.clone());

        assert_eq!(state.results.len(), 5);
        assert_eq!(state.page, 1);
        assert_eq!(state.tried, tried);
        assert!(state.error.is_some());
    }

    #[test]
    fn successful_fetch_clears_previous_error() {
        let mut state = MoodState::default();
        state.fail(MoodError::Fetch { reason: "404".into() }, vec!["u".into()]);
        state.apply_mood("sad".into(), page(2, 1, 1));
        assert!(state.error.is_none());
        assert!(state.tried.is_empty());
    }

    #[test]
    fn geo_error_message_tells_the_user_to_pick_manually() {
        let msg = MoodError::Geo(GeoError::Timeout).message();
        assert!(msg.contains("Pick a mood manually"));
        let msg = MoodError::Fetch { reason: "404".into() }.message();
        assert!(!msg.contains("Pick a mood manually"));
    }

    #[test]
    fn clamped_page_defaults() {
        let mut state = MoodState::default();
        state.apply_mood("happy".into(), page(0, 0, 0));
        assert_eq!(state.page, 1);
        assert_eq!(state.total_pages, 1);
        assert!(!state.can_page_next());
    }
}
