use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.searching {
        return "(Enter) to search, (Esc) to cancel";
    }
    match app.current_screen {
        CurrentScreen::Home => {
            if app.home.loading {
                "Loading trending movies... (q) to quit"
            } else if app.home.results.is_empty() {
                "(r) to reload, (/) to search, (m) for moods, (q) to quit"
            } else {
                "(↑↓/jk) browse, (Enter) details, (←→/hl) slide, (1-5) jump, (/) search, (m) moods, (r) reload, (q) quit"
            }
        }
        CurrentScreen::Search => {
            "(↑↓/jk) browse, (Enter) details, (n/p) page, (/) new search, (Esc) home, (q) quit"
        }
        CurrentScreen::MovieDetail => {
            "(↑↓/jk) recommendations, (Enter) open, (Esc/b) back, (q) quit"
        }
        CurrentScreen::Mood => {
            "(Tab) focus, (←→/hl) mood, (Enter) apply/open, (w) weather, (n/p) page, (Esc) home, (q) quit"
        }
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default().borders(Borders::ALL).style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default())).block(bottom_block);

    frame.render_widget(bottom, area);
}
