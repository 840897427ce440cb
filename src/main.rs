mod app;
mod config;
mod ui;

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::Position;
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui_image::picker::Picker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::api::ApiClient;
use crate::app::{App, CurrentScreen, MoodFocus};
use crate::config::Config;

/// Horizontal delta assigned to one discrete scroll event, comfortably
/// past the carousel's wheel deadzone.
const WHEEL_STEP: f32 = 30.0;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    let api = ApiClient::new(config.api_base.clone())?;

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)));

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // create app, kick off the initial load, and run
    let mut app = App::new(config, api, picker);
    app.fetch_trending();
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinemood_tui=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    loop {
        let now = Instant::now();
        if app.current_screen == CurrentScreen::Home {
            app.home.carousel.tick(now);
        }
        app.throbber.calc_next();
        app.drain_messages(now);

        terminal.draw(|f| ui::ui(f, app))?;

        // Poll with a timeout so timers and worker messages keep flowing
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == event::KeyEventKind::Release {
                        // Skip events that are not KeyEventKind::Press
                        continue;
                    }
                    if handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, Instant::now()),
                _ => {}
            }
        }
    }
}

/// Routes one key press. Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Text input swallows everything while the search bar is open
    if app.searching {
        match key.code {
            KeyCode::Char(c) => {
                app.search_term.push(c);
            }
            KeyCode::Backspace => {
                app.search_term.pop();
            }
            KeyCode::Enter => {
                app.submit_search();
            }
            KeyCode::Esc => {
                app.searching = false;
                app.search_term.clear();
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.searching = true;
            app.search_term.clear();
            return false;
        }
        _ => {}
    }

    match app.current_screen {
        CurrentScreen::Home => match key.code {
            KeyCode::Char('m') => app.open_mood(),
            KeyCode::Char('r') => app.fetch_trending(),
            KeyCode::Down | KeyCode::Char('j') => app.home_select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.home_select_prev(),
            KeyCode::Left | KeyCode::Char('h') => app.home.carousel.prev(),
            KeyCode::Right | KeyCode::Char('l') => app.home.carousel.next(),
            KeyCode::Enter => {
                if let Some(id) = app.home_selected().map(|m| m.id) {
                    app.open_detail(id);
                }
            }
            KeyCode::Char(c @ '1'..='5') => {
                let slot = c as usize - '1' as usize;
                if slot < app.home.carousel.len() {
                    app.home.carousel.go_to(slot as isize);
                }
            }
            _ => {}
        },
        CurrentScreen::Search => match key.code {
            KeyCode::Esc => app.current_screen = CurrentScreen::Home,
            KeyCode::Char('m') => app.open_mood(),
            KeyCode::Down | KeyCode::Char('j') => app.search_select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.search_select_prev(),
            KeyCode::Char('n') | KeyCode::Right => app.search_next_page(),
            KeyCode::Char('p') | KeyCode::Left => app.search_prev_page(),
            KeyCode::Enter => {
                if let Some(id) = app.search_selected().map(|m| m.id) {
                    app.open_detail(id);
                }
            }
            _ => {}
        },
        CurrentScreen::MovieDetail => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.close_detail(),
            KeyCode::Down | KeyCode::Char('j') => app.rec_select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.rec_select_prev(),
            KeyCode::Enter => {
                if let Some(id) = app.rec_selected().map(|m| m.id) {
                    app.open_detail(id);
                }
            }
            _ => {}
        },
        CurrentScreen::Mood => match key.code {
            KeyCode::Esc => app.current_screen = CurrentScreen::Home,
            KeyCode::Tab => {
                app.mood_focus = match app.mood_focus {
                    MoodFocus::Chips => MoodFocus::Grid,
                    MoodFocus::Grid => MoodFocus::Chips,
                };
            }
            KeyCode::Char('w') => app.select_weather(),
            KeyCode::Char('n') => app.mood_next_page(),
            KeyCode::Char('p') => app.mood_prev_page(),
            KeyCode::Left | KeyCode::Char('h') => {
                if app.mood_focus == MoodFocus::Chips {
                    app.chip_prev();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if app.mood_focus == MoodFocus::Chips {
                    app.chip_next();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if app.mood_focus == MoodFocus::Grid {
                    app.mood_select_next();
                } else {
                    app.mood_focus = MoodFocus::Grid;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.mood_focus == MoodFocus::Grid {
                    app.mood_select_prev();
                }
            }
            KeyCode::Enter => match app.mood_focus {
                MoodFocus::Chips => app.apply_chip(),
                MoodFocus::Grid => {
                    if let Some(id) = app.mood_selected().map(|m| m.id) {
                        app.open_detail(id);
                    }
                }
            },
            _ => {}
        },
    }
    false
}

/// Mouse input drives the hero carousel on the home screen: hover pauses,
/// horizontal scroll steps with a debounce, dots jump, and a click on the
/// hero opens the active movie.
fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    if app.current_screen != CurrentScreen::Home {
        return;
    }
    let position = Position::new(mouse.column, mouse.row);
    let in_hero = app.home.hero_area.is_some_and(|r| r.contains(position));
    let in_grid = app.home.grid_area.is_some_and(|r| r.contains(position));

    match mouse.kind {
        MouseEventKind::Moved => {
            if in_hero {
                app.home.carousel.pointer_enter();
            } else {
                app.home.carousel.pointer_leave(now);
            }
        }
        MouseEventKind::ScrollLeft => {
            if in_hero {
                app.home.carousel.wheel(-WHEEL_STEP, 0.0, now);
            }
        }
        MouseEventKind::ScrollRight => {
            if in_hero {
                app.home.carousel.wheel(WHEEL_STEP, 0.0, now);
            }
        }
        MouseEventKind::ScrollDown => {
            if in_grid {
                app.home_select_next();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_grid {
                app.home_select_prev();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let on_dots = app.home.dots_area.is_some_and(|r| r.contains(position));
            if on_dots {
                let dots = app.home.dots_area.unwrap_or_default();
                let slot = ((position.x - dots.x) / 2) as usize;
                if slot < app.home.carousel.len() {
                    app.home.carousel.go_to(slot as isize);
                }
            } else if in_hero {
                if let Some(id) = app.home.carousel.active().map(|m| m.id) {
                    app.open_detail(id);
                }
            }
        }
        _ => {}
    }
}
