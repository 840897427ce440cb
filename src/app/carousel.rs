use std::time::{Duration, Instant};

use crate::app::models::MovieSummary;

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);
pub const WHEEL_DEBOUNCE: Duration = Duration::from_millis(600);
pub const WHEEL_DEADZONE: f32 = 10.0;
pub const HERO_LIMIT: usize = 5;

/// Picks the items featured in the hero rotation: those with a displayable
/// image first, the raw list if none qualify, capped at `HERO_LIMIT`.
pub fn hero_items(list: &[MovieSummary]) -> Vec<MovieSummary> {
    let with_image: Vec<MovieSummary> =
        list.iter().filter(|m| m.has_image()).cloned().collect();
    let source = if with_image.is_empty() { list.to_vec() } else { with_image };
    source.into_iter().take(HERO_LIMIT).collect()
}

/// Auto-advancing rotation over a bounded item list.
///
/// The controller owns exactly one autoplay deadline; every transition
/// that re-arms it overwrites the previous one, so two live timers cannot
/// exist. While `items` is non-empty, `index < items.len()` holds.
pub struct Carousel {
    items: Vec<MovieSummary>,
    index: usize,
    paused: bool,
    deadline: Option<Instant>,
    wheel_accepted: Option<Instant>,
}

impl Carousel {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
            paused: false,
            deadline: None,
            wheel_accepted: None,
        }
    }

    /// Replaces the rotation with freshly loaded items. A non-empty load
    /// always re-enters the running state at index 0.
    pub fn load(&mut self, items: Vec<MovieSummary>, now: Instant) {
        self.items = items;
        self.index = 0;
        self.paused = false;
        self.wheel_accepted = None;
        self.deadline = if self.items.is_empty() {
            None
        } else {
            Some(now + AUTOPLAY_INTERVAL)
        };
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn active(&self) -> Option<&MovieSummary> {
        self.items.get(self.index)
    }

    /// Advances the rotation when the autoplay deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.paused || self.items.is_empty() {
            return;
        }
        if let Some(deadline) = self.deadline
            && now >= deadline
        {
            self.index = (self.index + 1) % self.items.len();
            self.deadline = Some(now + AUTOPLAY_INTERVAL);
        }
    }

    /// Pointer entered the hero: suspend autoplay. Idempotent, so repeated
    /// move events inside the hero are harmless.
    pub fn pointer_enter(&mut self) {
        if self.paused || self.items.is_empty() {
            return;
        }
        self.paused = true;
        self.deadline = None;
    }

    /// Pointer left the hero: resume autoplay with the interval restarted
    /// from zero. Idempotent for repeated outside-move events.
    pub fn pointer_leave(&mut self, now: Instant) {
        if !self.paused || self.items.is_empty() {
            return;
        }
        self.paused = false;
        self.deadline = Some(now + AUTOPLAY_INTERVAL);
    }

    /// Manual step forward. Leaves the paused flag and the armed deadline
    /// untouched.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Manual step backward.
    pub fn prev(&mut self) {
        self.step(-1);
    }

    /// Direct jump, normalized into range whatever the input.
    pub fn go_to(&mut self, target: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        self.index = ((target % len + len) % len) as usize;
    }

    /// Horizontal wheel gesture. Vertical-dominant or tiny deltas fall in
    /// the deadzone; accepted gestures within the debounce window of the
    /// previous accepted one are dropped so one physical swipe moves a
    /// single step.
    pub fn wheel(&mut self, dx: f32, dy: f32, now: Instant) {
        if self.items.is_empty() {
            return;
        }
        if let Some(accepted) = self.wheel_accepted
            && now.duration_since(accepted) < WHEEL_DEBOUNCE
        {
            return;
        }
        if dx.abs() > dy.abs() && dx.abs() > WHEEL_DEADZONE {
            if dx > 0.0 {
                self.next();
            } else {
                self.prev();
            }
            self.wheel_accepted = Some(now);
        }
    }

    fn step(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        self.go_to(self.index as isize + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, poster: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            poster_path: poster.map(String::from),
            ..MovieSummary::default()
        }
    }

    fn loaded(n: u64) -> (Carousel, Instant) {
        let now = Instant::now();
        let mut c = Carousel::new();
        c.load((0..n).map(|i| summary(i, Some("/p.jpg"))).collect(), now);
        (c, now)
    }

    #[test]
    fn hero_selection_prefers_items_with_images() {
        let list = vec![
            summary(1, None),
            summary(2, Some("/a.jpg")),
            summary(3, None),
            summary(4, Some("/b.jpg")),
        ];
        let heroes = hero_items(&list);
        assert_eq!(heroes.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn hero_selection_falls_back_to_raw_list() {
        let list: Vec<MovieSummary> = (0..7).map(|i| summary(i, None)).collect();
        let heroes = hero_items(&list);
        assert_eq!(heroes.len(), HERO_LIMIT);
        assert_eq!(heroes[0].id, 0);
    }

    #[test]
    fn next_prev_round_trip_from_any_index() {
        let (mut c, _) = loaded(5);
        for start in 0..5 {
            c.go_to(start as isize);
            c.next();
            c.prev();
            assert_eq!(c.index(), start);
            c.prev();
            c.next();
            assert_eq!(c.index(), start);
        }
    }

    #[test]
    fn index_stays_in_range_under_arbitrary_steps() {
        let (mut c, now) = loaded(3);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.index(), 0);
        c.prev();
        assert_eq!(c.index(), 2);
        c.tick(now + AUTOPLAY_INTERVAL);
        assert!(c.index() < c.len());
    }

    #[test]
    fn go_to_normalizes_out_of_range_targets() {
        let (mut c, _) = loaded(4);
        c.go_to(-1);
        assert_eq!(c.index(), 3);
        c.go_to(9);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn tick_advances_only_after_the_interval() {
        let (mut c, now) = loaded(3);
        c.tick(now + Duration::from_millis(4999));
        assert_eq!(c.index(), 0);
        c.tick(now + AUTOPLAY_INTERVAL);
        assert_eq!(c.index(), 1);
        // The deadline re-arms relative to the advancing tick.
        c.tick(now + AUTOPLAY_INTERVAL + Duration::from_millis(4999));
        assert_eq!(c.index(), 1);
        c.tick(now + AUTOPLAY_INTERVAL * 2);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn pause_blocks_ticks_and_resume_restarts_from_zero() {
        let (mut c, now) = loaded(3);
        c.pointer_enter();
        c.tick(now + AUTOPLAY_INTERVAL * 3);
        assert_eq!(c.index(), 0);

        let resumed = now + Duration::from_secs(20);
        c.pointer_leave(resumed);
        c.tick(resumed + Duration::from_millis(100));
        assert_eq!(c.index(), 0);
        c.tick(resumed + AUTOPLAY_INTERVAL);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn hover_transitions_are_idempotent() {
        let (mut c, now) = loaded(3);
        c.pointer_enter();
        c.pointer_enter();
        assert!(c.is_paused());

        let resumed = now + Duration::from_secs(1);
        c.pointer_leave(resumed);
        // A second leave must not push the deadline further out.
        c.pointer_leave(resumed + Duration::from_millis(4000));
        c.tick(resumed + AUTOPLAY_INTERVAL);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn manual_step_works_while_paused() {
        let (mut c, _) = loaded(3);
        c.pointer_enter();
        c.next();
        assert_eq!(c.index(), 1);
        assert!(c.is_paused());
    }

    #[test]
    fn wheel_respects_deadzone() {
        let (mut c, now) = loaded(3);
        c.wheel(8.0, 0.0, now);
        assert_eq!(c.index(), 0);
        c.wheel(12.0, 20.0, now);
        assert_eq!(c.index(), 0);
        c.wheel(30.0, 0.0, now);
        assert_eq!(c.index(), 1);
        c.wheel(-30.0, 0.0, now + WHEEL_DEBOUNCE);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn wheel_is_debounced() {
        let (mut c, now) = loaded(4);
        c.wheel(30.0, 0.0, now);
        c.wheel(30.0, 0.0, now + Duration::from_millis(200));
        c.wheel(30.0, 0.0, now + Duration::from_millis(599));
        assert_eq!(c.index(), 1);
        c.wheel(30.0, 0.0, now + WHEEL_DEBOUNCE);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn rejected_wheel_does_not_refresh_the_debounce_window() {
        let (mut c, now) = loaded(4);
        c.wheel(30.0, 0.0, now);
        // In-window events are ignored but must not extend the lock.
        c.wheel(30.0, 0.0, now + Duration::from_millis(500));
        c.wheel(30.0, 0.0, now + Duration::from_millis(650));
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = Carousel::new();
        let now = Instant::now();
        c.load(Vec::new(), now);
        c.next();
        c.prev();
        c.go_to(3);
        c.tick(now + AUTOPLAY_INTERVAL);
        c.wheel(30.0, 0.0, now);
        assert!(c.is_empty());
        assert!(c.active().is_none());
    }

    #[test]
    fn nonempty_reload_reenters_rotation() {
        let mut c = Carousel::new();
        let now = Instant::now();
        c.load(Vec::new(), now);
        assert!(c.is_empty());
        c.load(vec![summary(1, Some("/a.jpg"))], now);
        assert_eq!(c.index(), 0);
        c.tick(now + AUTOPLAY_INTERVAL);
        assert_eq!(c.index(), 0); // single item wraps onto itself
    }
}
