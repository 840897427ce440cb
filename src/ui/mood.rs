use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::{cards, loading};
use crate::app::mood::{MOODS, MoodSelection};
use crate::app::{App, MoodFocus};

/// Renders the mood screen: chip row, optional error panel with the
/// attempted endpoints, recommendation grid, pager.
pub fn render_mood(frame: &mut Frame, app: &mut App, area: Rect) {
    let error_height = app
        .mood
        .error
        .as_ref()
        .map(|_| 3 + app.mood.tried.len() as u16)
        .unwrap_or(0);
    let has_pager = app.mood.error.is_none() && app.mood.can_pager();

    let mut constraints = vec![Constraint::Length(3)];
    if error_height > 0 {
        constraints.push(Constraint::Length(error_height));
    }
    constraints.push(Constraint::Min(1));
    if has_pager {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_chips(frame, app, chunks[0]);

    let mut next = 1;
    if let Some(error) = &app.mood.error {
        let mut lines = vec![Line::from(Span::styled(
            error.message(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))];
        for url in &app.mood.tried {
            lines.push(Line::from(Span::styled(
                format!("  tried {url}"),
                Style::default().fg(Color::Gray),
            )));
        }
        let block = Block::default().borders(Borders::ALL).style(Style::default().fg(Color::Red));
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), chunks[next]);
        next += 1;
    }

    if app.mood.loading {
        loading::render_loading(
            frame,
            &mut app.throbber,
            chunks[next],
            "Fetching recommendations...",
            &[],
        );
        return;
    }

    render_grid(frame, app, chunks[next]);
    next += 1;

    if has_pager {
        let pager = Line::from(Span::styled(
            format!("(p) ← Page {} / {} → (n)", app.mood.page, app.mood.total_pages),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(pager).centered(), chunks[next]);
    }
}

fn render_chips(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (i, mood) in MOODS.iter().enumerate() {
        let applied = app.mood.selected_key() == Some(mood.key);
        let focused = app.mood_focus == MoodFocus::Chips && app.mood_chip == i;

        let mut style = Style::default().fg(Color::White);
        if applied {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if focused {
            style = style.bg(Color::DarkGray);
        }
        spans.push(Span::styled(format!(" {} ", mood.label), style));
        spans.push(Span::raw(" "));
    }

    if let MoodSelection::Weather(tag) = &app.mood.selection {
        spans.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
    } else {
        spans.push(Span::styled(" (w) by weather ", Style::default().fg(Color::Cyan)));
    }

    let title = match app.mood_focus {
        MoodFocus::Chips => "Pick a mood (Tab for grid)",
        MoodFocus::Grid => "Pick a mood",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.mood.results.is_empty() {
        let block = Block::default().title("Recommendations").borders(Borders::ALL);
        let hint = Paragraph::new(Line::from(Span::styled(
            "No recommendations yet. Apply a mood with (Enter).",
            Style::default().fg(Color::Gray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let title = match &app.mood.selection {
        MoodSelection::Key(key) => {
            let label = MOODS
                .iter()
                .find(|m| m.key == key.as_str())
                .map(|m| m.label)
                .unwrap_or(key.as_str());
            format!("Mood: {label}")
        }
        MoodSelection::Weather(tag) => format!("Weather pick: {tag}"),
        MoodSelection::None => "Recommendations".to_string(),
    };

    let items: Vec<ListItem> = app.mood.results.iter().map(cards::movie_card).collect();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(cards::highlight_style())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.mood_list);
}
