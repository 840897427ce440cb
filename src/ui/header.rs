use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, CurrentScreen};

/// Renders the top bar: app name, current screen, and the live search
/// input when the user is typing a query.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let line = if app.searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.search_term.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])
    } else {
        let screen = match app.current_screen {
            CurrentScreen::Home => "Trending",
            CurrentScreen::Search => "Search",
            CurrentScreen::MovieDetail => "Details",
            CurrentScreen::Mood => "Moods",
        };
        let mut spans = vec![
            Span::styled(
                "cinemood",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::styled(screen, Style::default().fg(Color::White)),
        ];
        if app.current_screen == CurrentScreen::Home
            && let Some(updated) = app.home.last_updated
        {
            spans.push(Span::styled(
                format!("  (updated {})", updated.format("%H:%M:%S")),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
