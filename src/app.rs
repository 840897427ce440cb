pub mod api;
pub mod carousel;
pub mod geo;
pub mod images;
pub mod loader;
pub mod models;
pub mod mood;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use chrono::{DateTime, Local};
use image::DynamicImage;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::config::Config;

use api::{ApiClient, FetchFailure, Probe};
use carousel::Carousel;
use images::ImageSize;
use loader::LoadOutcome;
use models::{MovieDetails, MovieSummary, Paginated, WeatherPayload};
use mood::{MOODS, MoodError, MoodState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentScreen {
    Home,
    Search,
    MovieDetail,
    Mood,
}

/// Which half of the mood screen keyboard input acts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoodFocus {
    Chips,
    Grid,
}

/// Everything the worker threads report back to the UI thread. Each
/// message carries the sequence number of the dispatch that produced it;
/// stale sequences are discarded on drain.
pub enum FetchMessage {
    Progress { seq: u64, line: String },
    Trending { seq: u64, outcome: Result<Paginated<MovieSummary>, FetchFailure> },
    SearchResults { seq: u64, outcome: Result<Paginated<MovieSummary>, FetchFailure> },
    Details { seq: u64, outcome: Result<Box<MovieDetails>, FetchFailure> },
    Poster { seq: u64, image: Option<Box<DynamicImage>> },
    MoodResults { seq: u64, key: String, probe: Probe<Paginated<MovieSummary>> },
    WeatherResults { seq: u64, outcome: Result<WeatherPayload, MoodError> },
}

/// Home screen: trending grid plus the hero carousel.
pub struct HomeState {
    pub results: Vec<MovieSummary>,
    pub error: Option<FetchFailure>,
    pub loading: bool,
    pub messages: Vec<String>,
    pub carousel: Carousel,
    pub list: ListState,
    pub index: usize,
    pub last_updated: Option<DateTime<Local>>,
    /// Hit-test rects recorded during render for mouse routing.
    pub hero_area: Option<Rect>,
    pub dots_area: Option<Rect>,
    pub grid_area: Option<Rect>,
}

impl HomeState {
    fn new() -> Self {
        Self {
            results: Vec::new(),
            error: None,
            loading: false,
            messages: Vec::new(),
            carousel: Carousel::new(),
            list: ListState::default(),
            index: 0,
            last_updated: None,
            hero_area: None,
            dots_area: None,
            grid_area: None,
        }
    }
}

pub struct SearchState {
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieSummary>,
    pub error: Option<FetchFailure>,
    pub loading: bool,
    pub list: ListState,
    pub index: usize,
}

impl SearchState {
    fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_pages: 1,
            results: Vec::new(),
            error: None,
            loading: false,
            list: ListState::default(),
            index: 0,
        }
    }
}

pub struct DetailState {
    pub movie: Option<Box<MovieDetails>>,
    pub error: Option<FetchFailure>,
    pub loading: bool,
    pub poster: Option<StatefulProtocol>,
    pub loading_poster: bool,
    pub recs: ListState,
    pub rec_index: usize,
    pub return_to: CurrentScreen,
}

impl DetailState {
    fn new(return_to: CurrentScreen) -> Self {
        Self {
            movie: None,
            error: None,
            loading: true,
            poster: None,
            loading_poster: true,
            recs: ListState::default(),
            rec_index: 0,
            return_to,
        }
    }
}

#[derive(Default)]
struct Seqs {
    trending: u64,
    search: u64,
    detail: u64,
    mood: u64,
}

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub current_screen: CurrentScreen,
    pub searching: bool,
    pub search_term: String,
    pub home: HomeState,
    pub search: SearchState,
    pub detail: DetailState,
    pub mood: MoodState,
    pub mood_chip: usize,
    pub mood_focus: MoodFocus,
    pub mood_index: usize,
    pub mood_list: ListState,
    pub picker: Picker,
    pub throbber: ThrobberState,
    tx: mpsc::Sender<FetchMessage>,
    rx: mpsc::Receiver<FetchMessage>,
    seqs: Seqs,
    load_cancel: Option<Arc<AtomicBool>>,
    mood_primed: bool,
}

impl App {
    pub fn new(config: Config, api: ApiClient, picker: Picker) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            config,
            api,
            current_screen: CurrentScreen::Home,
            searching: false,
            search_term: String::new(),
            home: HomeState::new(),
            search: SearchState::new(),
            detail: DetailState::new(CurrentScreen::Home),
            mood: MoodState::default(),
            mood_chip: 0,
            mood_focus: MoodFocus::Chips,
            mood_index: 0,
            mood_list: ListState::default(),
            picker,
            throbber: ThrobberState::default(),
            tx,
            rx,
            seqs: Seqs::default(),
            load_cancel: None,
            mood_primed: false,
        }
    }

    // ---- dispatch -------------------------------------------------------

    /// Kicks off (or restarts) the home screen's initial load: up to three
    /// attempts spaced 1500ms on a worker thread. A previous loader still
    /// in flight is cancelled first so only one run exists at a time.
    pub fn fetch_trending(&mut self) {
        if let Some(token) = self.load_cancel.take() {
            token.store(true, Ordering::Relaxed);
        }
        let cancel = Arc::new(AtomicBool::new(false));
        self.load_cancel = Some(cancel.clone());

        let seq = bump(&mut self.seqs.trending);
        self.home.loading = true;
        self.home.error = None;
        self.home.messages.clear();

        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let progress_tx = tx.clone();
            let outcome = loader::run(
                || api.trending(1),
                thread::sleep,
                &cancel,
                |attempt| {
                    let _ = progress_tx.send(FetchMessage::Progress {
                        seq,
                        line: format!(
                            "Fetching trending movies (attempt {attempt}/{})",
                            loader::MAX_ATTEMPTS
                        ),
                    });
                },
            );
            let outcome = match outcome {
                LoadOutcome::Loaded(page) => Ok(page),
                LoadOutcome::Failed(failure) => Err(failure),
                LoadOutcome::Cancelled => return,
            };
            let _ = tx.send(FetchMessage::Trending { seq, outcome });
        });
    }

    /// Commits the search input and dispatches page 1.
    pub fn submit_search(&mut self) {
        let query = self.search_term.trim().to_string();
        self.searching = false;
        if query.is_empty() {
            return;
        }
        self.current_screen = CurrentScreen::Search;
        self.dispatch_search(query, 1);
    }

    pub fn search_next_page(&mut self) {
        if self.search.loading || self.search.page >= self.search.total_pages {
            return;
        }
        self.dispatch_search(self.search.query.clone(), self.search.page + 1);
    }

    pub fn search_prev_page(&mut self) {
        if self.search.loading || self.search.page <= 1 {
            return;
        }
        self.dispatch_search(self.search.query.clone(), self.search.page - 1);
    }

    fn dispatch_search(&mut self, query: String, page: u32) {
        let seq = bump(&mut self.seqs.search);
        self.search.query = query.clone();
        self.search.page = page;
        self.search.loading = true;

        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = api.search(&query, page);
            let _ = tx.send(FetchMessage::SearchResults { seq, outcome });
        });
    }

    /// Opens the detail screen for one movie; the worker fetches the
    /// detail payload and then the poster, reporting each as it lands.
    pub fn open_detail(&mut self, id: u64) {
        let return_to = if self.current_screen == CurrentScreen::MovieDetail {
            self.detail.return_to
        } else {
            self.current_screen
        };
        self.detail = DetailState::new(return_to);
        self.current_screen = CurrentScreen::MovieDetail;

        let seq = bump(&mut self.seqs.detail);
        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || match api.details(id) {
            Ok(movie) => {
                let source = detail_image_source(&movie.summary);
                let _ = tx.send(FetchMessage::Details { seq, outcome: Ok(Box::new(movie)) });
                if let Some((path, size)) = source {
                    let url = images::image_url(&path, size);
                    let image = match images::download_image(&api, &url) {
                        Ok(image) => Some(Box::new(image)),
                        Err(failure) => {
                            tracing::warn!(url = %failure.url, reason = %failure.reason(), "poster download failed");
                            None
                        }
                    };
                    let _ = tx.send(FetchMessage::Poster { seq, image });
                }
            }
            Err(failure) => {
                let _ = tx.send(FetchMessage::Details { seq, outcome: Err(failure) });
            }
        });
    }

    pub fn close_detail(&mut self) {
        self.current_screen = self.detail.return_to;
    }

    /// Enters the mood screen. The first visit applies the persisted (or
    /// first) mood so the grid is never blank without a reason.
    pub fn open_mood(&mut self) {
        self.current_screen = CurrentScreen::Mood;
        if !self.mood_primed {
            self.mood_primed = true;
            let key = mood::load_last_mood().unwrap_or_else(|| MOODS[0].key.to_string());
            self.mood_chip = MOODS.iter().position(|m| m.key == key).unwrap_or(0);
            self.select_mood(key, 1);
        }
    }

    /// Applies the currently highlighted chip.
    pub fn apply_chip(&mut self) {
        let key = MOODS[self.mood_chip].key.to_string();
        self.select_mood(key, 1);
    }

    pub fn select_mood(&mut self, key: String, page: u32) {
        self.mood.loading = true;
        let seq = bump(&mut self.seqs.mood);
        let api = self.api.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let urls = api.mood_candidates(&key, page);
            let probe = api.probe_mood(&urls);
            let _ = tx.send(FetchMessage::MoodResults { seq, key, probe });
        });
    }

    /// Weather-based recommendations: resolve coordinates, then query the
    /// weather endpoint. Either step failing surfaces its own message.
    pub fn select_weather(&mut self) {
        self.mood.loading = true;
        let seq = bump(&mut self.seqs.mood);
        let api = self.api.clone();
        let config = self.config.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = match geo::locate(&config) {
                Ok(fix) => api
                    .mood_by_weather(fix.lat, fix.lon)
                    .map_err(|failure| MoodError::Weather { reason: failure.reason() }),
                Err(error) => Err(MoodError::Geo(error)),
            };
            let _ = tx.send(FetchMessage::WeatherResults { seq, outcome });
        });
    }

    pub fn mood_next_page(&mut self) {
        if self.mood.loading || !self.mood.can_page_next() {
            return;
        }
        let key = self.mood.selected_key().unwrap_or_default().to_string();
        let page = self.mood.page + 1;
        self.select_mood(key, page);
    }

    pub fn mood_prev_page(&mut self) {
        if self.mood.loading || !self.mood.can_page_prev() {
            return;
        }
        let key = self.mood.selected_key().unwrap_or_default().to_string();
        let page = self.mood.page - 1;
        self.select_mood(key, page);
    }

    /// Cancels background work that must not outlive the UI.
    pub fn shutdown(&mut self) {
        if let Some(token) = self.load_cancel.take() {
            token.store(true, Ordering::Relaxed);
        }
    }

    // ---- message drain --------------------------------------------------

    /// Applies every pending worker message. Called once per frame, before
    /// drawing, on the UI thread.
    pub fn drain_messages(&mut self, now: Instant) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                FetchMessage::Progress { seq, line } => {
                    if seq == self.seqs.trending {
                        self.home.messages.push(line);
                    }
                }
                FetchMessage::Trending { seq, outcome } => {
                    if seq != self.seqs.trending {
                        continue;
                    }
                    self.home.loading = false;
                    self.home.messages.clear();
                    match outcome {
                        Ok(page) => {
                            self.home.results = page.results;
                            self.home.error = None;
                            self.home.last_updated = Some(Local::now());
                            self.home.index = 0;
                            self.home.list.select(first_index(&self.home.results));
                            self.home
                                .carousel
                                .load(carousel::hero_items(&self.home.results), now);
                        }
                        Err(failure) => {
                            self.home.error = Some(failure);
                        }
                    }
                }
                FetchMessage::SearchResults { seq, outcome } => {
                    if seq != self.seqs.search {
                        continue;
                    }
                    self.search.loading = false;
                    match outcome {
                        Ok(payload) => {
                            self.search.total_pages = payload.total_pages.max(1);
                            self.search.results = payload
                                .results
                                .into_iter()
                                .filter(|m| m.media_type.as_deref().is_none_or(|t| t == "movie"))
                                .collect();
                            self.search.error = None;
                            self.search.index = 0;
                            self.search.list.select(first_index(&self.search.results));
                        }
                        Err(failure) => {
                            self.search.results.clear();
                            self.search.error = Some(failure);
                        }
                    }
                }
                FetchMessage::Details { seq, outcome } => {
                    if seq != self.seqs.detail {
                        continue;
                    }
                    self.detail.loading = false;
                    match outcome {
                        Ok(movie) => {
                            self.detail.loading_poster =
                                detail_image_source(&movie.summary).is_some();
                            self.detail.rec_index = 0;
                            self.detail.recs.select(first_index(movie.top_recommendations()));
                            self.detail.movie = Some(movie);
                            self.detail.error = None;
                        }
                        Err(failure) => {
                            self.detail.error = Some(failure);
                        }
                    }
                }
                FetchMessage::Poster { seq, image } => {
                    if seq != self.seqs.detail {
                        continue;
                    }
                    self.detail.loading_poster = false;
                    if let Some(image) = image {
                        self.detail.poster = Some(self.picker.new_resize_protocol(*image));
                    }
                }
                FetchMessage::MoodResults { seq, key, probe } => {
                    if seq != self.seqs.mood {
                        continue;
                    }
                    match probe {
                        Probe::Hit { value, .. } => {
                            self.mood.apply_mood(key.clone(), value);
                            mood::save_last_mood(&key);
                            self.mood_index = 0;
                            self.mood_list.select(first_index(&self.mood.results));
                        }
                        Probe::Miss { tried, last } => {
                            let reason = last
                                .map(|failure| failure.reason())
                                .unwrap_or_else(|| "404".to_string());
                            self.mood.fail(MoodError::Fetch { reason }, tried);
                        }
                    }
                }
                FetchMessage::WeatherResults { seq, outcome } => {
                    if seq != self.seqs.mood {
                        continue;
                    }
                    match outcome {
                        Ok(payload) => {
                            self.mood.apply_weather(payload);
                            self.mood_index = 0;
                            self.mood_list.select(first_index(&self.mood.results));
                        }
                        Err(error) => {
                            self.mood.fail(error, Vec::new());
                        }
                    }
                }
            }
        }
    }

    // ---- selection ------------------------------------------------------

    pub fn home_select_next(&mut self) {
        step_list(&mut self.home.index, self.home.results.len(), 1, &mut self.home.list);
    }

    pub fn home_select_prev(&mut self) {
        step_list(&mut self.home.index, self.home.results.len(), -1, &mut self.home.list);
    }

    pub fn search_select_next(&mut self) {
        step_list(&mut self.search.index, self.search.results.len(), 1, &mut self.search.list);
    }

    pub fn search_select_prev(&mut self) {
        step_list(&mut self.search.index, self.search.results.len(), -1, &mut self.search.list);
    }

    pub fn mood_select_next(&mut self) {
        step_list(&mut self.mood_index, self.mood.results.len(), 1, &mut self.mood_list);
    }

    pub fn mood_select_prev(&mut self) {
        step_list(&mut self.mood_index, self.mood.results.len(), -1, &mut self.mood_list);
    }

    pub fn rec_select_next(&mut self) {
        let len = self.rec_count();
        step_list(&mut self.detail.rec_index, len, 1, &mut self.detail.recs);
    }

    pub fn rec_select_prev(&mut self) {
        let len = self.rec_count();
        step_list(&mut self.detail.rec_index, len, -1, &mut self.detail.recs);
    }

    pub fn chip_next(&mut self) {
        self.mood_chip = (self.mood_chip + 1) % MOODS.len();
    }

    pub fn chip_prev(&mut self) {
        self.mood_chip = if self.mood_chip == 0 { MOODS.len() - 1 } else { self.mood_chip - 1 };
    }

    pub fn home_selected(&self) -> Option<&MovieSummary> {
        self.home.results.get(self.home.index)
    }

    pub fn search_selected(&self) -> Option<&MovieSummary> {
        self.search.results.get(self.search.index)
    }

    pub fn mood_selected(&self) -> Option<&MovieSummary> {
        self.mood.results.get(self.mood_index)
    }

    pub fn rec_selected(&self) -> Option<&MovieSummary> {
        self.detail
            .movie
            .as_ref()?
            .top_recommendations()
            .get(self.detail.rec_index)
    }

    fn rec_count(&self) -> usize {
        self.detail
            .movie
            .as_ref()
            .map(|m| m.top_recommendations().len())
            .unwrap_or(0)
    }
}

fn bump(seq: &mut u64) -> u64 {
    *seq += 1;
    *seq
}

/// Image shown on the detail screen: the poster, or the wider backdrop
/// when no poster exists. Neither present means the placeholder.
fn detail_image_source(summary: &MovieSummary) -> Option<(String, ImageSize)> {
    summary
        .poster_path
        .clone()
        .map(|path| (path, ImageSize::W500))
        .or_else(|| summary.backdrop_path.clone().map(|path| (path, ImageSize::W780)))
}

fn first_index<T>(items: &[T]) -> Option<usize> {
    if items.is_empty() { None } else { Some(0) }
}

/// Wrap-around step shared by every selectable list.
fn step_list(index: &mut usize, len: usize, delta: isize, list: &mut ListState) {
    if len == 0 {
        return;
    }
    *index = if delta >= 0 {
        (*index + 1) % len
    } else if *index == 0 {
        len - 1
    } else {
        *index - 1
    };
    list.select(Some(*index));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let config = Config {
            api_base: "http://localhost:4000/api/v1".to_string(),
            coords: None,
            geo_url: "http://localhost:1/json".to_string(),
            log_file: None,
        };
        let api = ApiClient::new(config.api_base.clone()).unwrap();
        App::new(config, api, Picker::from_fontsize((8, 16)))
    }

    fn summary(id: u64, media_type: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            poster_path: Some("/p.jpg".to_string()),
            media_type: media_type.map(String::from),
            ..MovieSummary::default()
        }
    }

    fn page(results: Vec<MovieSummary>) -> Paginated<MovieSummary> {
        Paginated { results, page: 1, total_pages: 3 }
    }

    #[test]
    fn trending_result_populates_grid_and_carousel() {
        let mut app = test_app();
        let movies: Vec<MovieSummary> = (0..8).map(|id| summary(id, None)).collect();
        app.tx
            .send(FetchMessage::Trending { seq: 0, outcome: Ok(page(movies)) })
            .unwrap();
        app.drain_messages(Instant::now());

        assert_eq!(app.home.results.len(), 8);
        assert_eq!(app.home.carousel.len(), carousel::HERO_LIMIT);
        assert!(!app.home.loading);
        assert!(app.home.error.is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut app = test_app();
        app.seqs.trending = 2;
        app.home.loading = true;
        app.tx
            .send(FetchMessage::Trending { seq: 1, outcome: Ok(page(vec![summary(1, None)])) })
            .unwrap();
        app.drain_messages(Instant::now());

        assert!(app.home.results.is_empty());
        assert!(app.home.loading);
    }

    #[test]
    fn search_results_filter_non_movie_media() {
        let mut app = test_app();
        let results = vec![
            summary(1, Some("movie")),
            summary(2, Some("tv")),
            summary(3, None),
            summary(4, Some("person")),
        ];
        app.tx
            .send(FetchMessage::SearchResults { seq: 0, outcome: Ok(page(results)) })
            .unwrap();
        app.drain_messages(Instant::now());

        let ids: Vec<u64> = app.search.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn failed_search_clears_results_and_keeps_error() {
        let mut app = test_app();
        app.search.results = vec![summary(1, None)];
        app.tx
            .send(FetchMessage::SearchResults {
                seq: 0,
                outcome: Err(FetchFailure {
                    url: "http://api/movies/search".to_string(),
                    error: api::FetchError::NotJson,
                    status: Some(200),
                    content_type: Some("text/html".to_string()),
                    preview: "<html>".to_string(),
                }),
            })
            .unwrap();
        app.drain_messages(Instant::now());

        assert!(app.search.results.is_empty());
        assert_eq!(app.search.error.as_ref().unwrap().reason(), "not_json");
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = test_app();
        app.home.results = (0..3).map(|id| summary(id, None)).collect();
        app.home_select_prev();
        assert_eq!(app.home.index, 2);
        app.home_select_next();
        assert_eq!(app.home.index, 0);
    }

    #[test]
    fn selection_is_inert_without_results() {
        let mut app = test_app();
        app.home_select_next();
        assert_eq!(app.home.index, 0);
        assert!(app.home_selected().is_none());
    }

    #[test]
    fn mood_page_turn_guards_do_not_dispatch_at_bounds() {
        let mut app = test_app();
        app.mood.apply_mood(
            "happy".to_string(),
            Paginated { results: vec![summary(1, None)], page: 1, total_pages: 1 },
        );
        let seq_before = app.seqs.mood;
        app.mood_next_page();
        app.mood_prev_page();
        assert_eq!(app.seqs.mood, seq_before);
    }
}
