use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

/// Renders a loading panel: animated spinner line on top, the most recent
/// progress messages below it.
pub fn render_loading(
    frame: &mut Frame,
    throbber: &mut ThrobberState,
    area: Rect,
    label: &str,
    messages: &[String],
) {
    let block = Block::default().title("Loading").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let spinner = Throbber::default()
        .label(label.to_string())
        .style(Style::default().fg(Color::Cyan))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
    frame.render_stateful_widget(spinner, chunks[0], throbber);

    // Show the tail of the progress log, most recent last.
    let lines: Vec<Line> = messages
        .iter()
        .rev()
        .take(5)
        .rev()
        .map(|message| Line::from(message.clone()))
        .collect();

    let progress = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(progress, chunks[1]);
}
