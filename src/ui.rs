mod cards;
mod footer;
mod header;
mod home;
mod loading;
mod mood;
mod movie_detail;
mod search;

use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    // Create the main layout: header, content area, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    header::render_header(frame, app, chunks[0]);

    match app.current_screen {
        CurrentScreen::Home => home::render_home(frame, app, chunks[1]),
        CurrentScreen::Search => search::render_search(frame, app, chunks[1]),
        CurrentScreen::MovieDetail => movie_detail::render_movie_detail(frame, app, chunks[1]),
        CurrentScreen::Mood => mood::render_mood(frame, app, chunks[1]),
    }

    footer::render_footer(frame, app, chunks[2]);
}
