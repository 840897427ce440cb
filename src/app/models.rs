use serde::Deserialize;

/// Minimal projection of an API movie entry, as used for card rendering.
///
/// Search results for TV entries carry `name` instead of `title`, so the
/// alias accepts either.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default, alias = "name")]
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

impl MovieSummary {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { "Untitled" } else { &self.title }
    }

    /// First four characters of the release date, `—` when absent.
    pub fn year_label(&self) -> &str {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .unwrap_or("—")
    }

    /// Vote average with one decimal; zero and missing both render `—`.
    pub fn vote_label(&self) -> String {
        match self.vote_average {
            Some(v) if v != 0.0 => format!("{v:.1}"),
            _ => "—".to_string(),
        }
    }

    pub fn overview_text(&self) -> &str {
        match self.overview.as_deref().map(str::trim) {
            Some(o) if !o.is_empty() => o,
            _ => "No synopsis available.",
        }
    }

    pub fn has_image(&self) -> bool {
        self.backdrop_path.is_some() || self.poster_path.is_some()
    }
}

fn default_page() -> u32 {
    1
}

/// Paginated result list as returned by the trending, search, and mood
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    /// Avatar path; carried for parity with the payload, not rendered.
    #[allow(dead_code)]
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationList {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

pub const CAST_LIMIT: usize = 10;
pub const RECOMMENDATION_LIMIT: usize = 12;

/// Full detail payload for one movie.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: VideoList,
    #[serde(default)]
    pub recommendations: RecommendationList,
}

impl MovieDetails {
    pub fn genre_label(&self) -> String {
        if self.genres.is_empty() {
            "—".to_string()
        } else {
            self.genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(" • ")
        }
    }

    /// First YouTube video of type Trailer, if any.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .results
            .iter()
            .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
    }

    pub fn top_cast(&self) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..cast.len().min(CAST_LIMIT)]
    }

    pub fn top_recommendations(&self) -> &[MovieSummary] {
        let recs = &self.recommendations.results;
        &recs[..recs.len().min(RECOMMENDATION_LIMIT)]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherInfo {
    pub main: String,
}

/// Payload of the weather recommendation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    pub weather: WeatherInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tolerates_missing_optional_fields() {
        let m: MovieSummary = serde_json::from_str(r#"{"id": 42, "title": "Heat"}"#).unwrap();
        assert_eq!(m.id, 42);
        assert_eq!(m.year_label(), "—");
        assert_eq!(m.vote_label(), "—");
        assert!(!m.has_image());
        assert_eq!(m.overview_text(), "No synopsis available.");
    }

    #[test]
    fn summary_accepts_name_alias() {
        let m: MovieSummary = serde_json::from_str(r#"{"id": 7, "name": "Dark"}"#).unwrap();
        assert_eq!(m.display_title(), "Dark");
    }

    #[test]
    fn untitled_fallback() {
        let m: MovieSummary = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(m.display_title(), "Untitled");
    }

    #[test]
    fn year_is_first_four_chars() {
        let m: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "Alien", "release_date": "1979-05-25"}"#)
                .unwrap();
        assert_eq!(m.year_label(), "1979");
    }

    #[test]
    fn zero_vote_renders_placeholder() {
        let m: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "X", "vote_average": 0.0}"#).unwrap();
        assert_eq!(m.vote_label(), "—");

        let m: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "X", "vote_average": 7.25}"#).unwrap();
        assert_eq!(m.vote_label(), "7.3");
    }

    #[test]
    fn paginated_defaults_apply() {
        let p: Paginated<MovieSummary> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert!(p.results.is_empty());
    }

    #[test]
    fn details_decode_with_nested_sections() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "credits": {"cast": [{"name": "Keanu Reeves", "character": "Neo"}]},
            "videos": {"results": [
                {"key": "abc", "site": "Vimeo", "type": "Trailer"},
                {"key": "def", "site": "YouTube", "type": "Clip"},
                {"key": "ghi", "site": "YouTube", "type": "Trailer"}
            ]},
            "recommendations": {"results": [{"id": 604, "title": "Reloaded"}]}
        }"#;
        let d: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(d.summary.display_title(), "The Matrix");
        assert_eq!(d.genre_label(), "Action • Science Fiction");
        assert_eq!(d.trailer().map(|v| v.key.as_str()), Some("ghi"));
        assert_eq!(d.top_recommendations().len(), 1);
    }

    #[test]
    fn details_decode_without_sections() {
        let d: MovieDetails = serde_json::from_str(r#"{"id": 1, "title": "Solo"}"#).unwrap();
        assert!(d.trailer().is_none());
        assert!(d.top_cast().is_empty());
        assert_eq!(d.genre_label(), "—");
    }

    #[test]
    fn cast_is_capped() {
        let cast: Vec<String> = (0..14)
            .map(|i| format!(r#"{{"name": "Actor {i}"}}"#))
            .collect();
        let json = format!(
            r#"{{"id": 1, "title": "Crowd", "credits": {{"cast": [{}]}}}}"#,
            cast.join(",")
        );
        let d: MovieDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(d.top_cast().len(), CAST_LIMIT);
    }

    #[test]
    fn weather_payload_decodes() {
        let p: WeatherPayload = serde_json::from_str(
            r#"{"results": [{"id": 9, "title": "Rain"}], "total_pages": 1, "page": 1, "weather": {"main": "Rain"}}"#,
        )
        .unwrap();
        assert_eq!(p.weather.main, "Rain");
        assert_eq!(p.results.len(), 1);
    }
}
