use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::{cards, loading};
use crate::app::App;
use crate::app::api::FetchFailure;

/// Renders the search screen: diagnostic block after a failure, result
/// grid, pager line when there is more than one page.
pub fn render_search(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.search.loading {
        loading::render_loading(frame, &mut app.throbber, area, "Searching...", &[]);
        return;
    }

    let has_error = app.search.error.is_some();
    let has_pager = app.search.error.is_none() && app.search.total_pages > 1;

    let mut constraints = Vec::new();
    if has_error {
        constraints.push(Constraint::Length(7));
    }
    constraints.push(Constraint::Min(1));
    if has_pager {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if let Some(failure) = &app.search.error {
        render_debug_block(frame, chunks[next], failure);
        next += 1;
    }

    render_results(frame, app, chunks[next]);
    next += 1;

    if has_pager {
        let pager = Line::from(Span::styled(
            format!(
                "(p) ← Page {} / {} → (n)",
                app.search.page, app.search.total_pages
            ),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(pager).centered(), chunks[next]);
    }
}

/// Full diagnostics for a rejected request, the development-oriented
/// counterpart of the inline reason token.
fn render_debug_block(frame: &mut Frame, area: Rect, failure: &FetchFailure) {
    let value_style = Style::default().fg(Color::White);
    let lines = vec![
        Line::from(Span::styled(
            format!("Error: {}", failure.reason()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("URL: ", Style::default().fg(Color::Gray)),
            Span::styled(failure.url.clone(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(
                failure.status.map_or_else(|| "-".to_string(), |s| s.to_string()),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Content-Type: ", Style::default().fg(Color::Gray)),
            Span::styled(
                failure.content_type.clone().unwrap_or_else(|| "-".to_string()),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Preview: ", Style::default().fg(Color::Gray)),
            Span::styled(
                if failure.preview.is_empty() { "-".to_string() } else { failure.preview.clone() },
                value_style,
            ),
        ]),
    ];

    let block = Block::default()
        .title("Request failed")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.search.results.is_empty() {
        let hint = if app.search.query.is_empty() {
            "Start a search with (/)".to_string()
        } else if app.search.error.is_none() {
            format!("No results for “{}”.", app.search.query)
        } else {
            String::new()
        };
        let block = Block::default().title("Search").borders(Borders::ALL);
        let hint = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let title = format!("Results for “{}”", app.search.query);
    let items: Vec<ListItem> = app.search.results.iter().map(cards::movie_card).collect();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(cards::highlight_style())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.search.list);
}
