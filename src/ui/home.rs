use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

use super::{cards, loading};
use crate::app::App;

/// Renders the home screen: hero carousel on top, trending grid below,
/// with an inline error line between them after a failed (re)load.
pub fn render_home(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.home.loading {
        app.home.hero_area = None;
        app.home.dots_area = None;
        app.home.grid_area = None;
        loading::render_loading(
            frame,
            &mut app.throbber,
            area,
            "Loading trending movies...",
            &app.home.messages,
        );
        return;
    }

    let has_hero = !app.home.carousel.is_empty();
    let has_error = app.home.error.is_some();

    let mut constraints = Vec::new();
    if has_hero {
        constraints.push(Constraint::Length(8));
    }
    if has_error {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if has_hero {
        render_hero(frame, app, chunks[next]);
        next += 1;
    } else {
        app.home.hero_area = None;
        app.home.dots_area = None;
    }

    if let Some(failure) = &app.home.error {
        let line = Paragraph::new(Line::from(Span::styled(
            format!("Failed to load trending movies ({})", failure.reason()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(line, chunks[next]);
        next += 1;
    }

    render_grid(frame, app, chunks[next]);
}

/// The auto-advancing hero. Also records the hit-test rects the mouse
/// handler needs for hover, wheel, and dot clicks.
fn render_hero(frame: &mut Frame, app: &mut App, area: Rect) {
    app.home.hero_area = Some(area);

    let (title, vote, year, index, len, paused) = {
        let carousel = &app.home.carousel;
        let Some(active) = carousel.active() else {
            return;
        };
        (
            active.display_title().to_string(),
            active.vote_label(),
            active.year_label().to_string(),
            carousel.index(),
            carousel.len(),
            carousel.is_paused(),
        )
    };

    let block_title = if paused { "Trending (paused)" } else { "Trending" };
    let block = Block::default().borders(Borders::ALL).title(block_title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Big title
            Constraint::Length(1), // Meta line
            Constraint::Length(1), // Controls + dots
        ])
        .split(inner);

    let big_title = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .lines(vec![fit_big_text(&title, inner.width).into()])
        .build();
    frame.render_widget(big_title, chunks[0]);

    let meta = Line::from(vec![
        Span::styled(format!("★ {vote}"), Style::default().fg(Color::Yellow)),
        Span::raw("  •  "),
        Span::styled(year, Style::default().fg(Color::Cyan)),
        Span::raw("  •  "),
        Span::styled("Popular this week", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(meta), chunks[1]);

    // Controls row: position counter on the left, one dot per slide next
    // to it. The dots rect is kept for click-to-jump.
    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Length((len * 2) as u16),
            Constraint::Min(0),
        ])
        .split(chunks[2]);

    let counter = Line::from(Span::styled(
        format!("‹ {}/{} ›", index + 1, len),
        Style::default().fg(Color::Gray),
    ));
    frame.render_widget(Paragraph::new(counter), controls[0]);

    let dots: Vec<Span> = (0..len)
        .map(|slot| {
            if slot == index {
                Span::styled("● ", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(dots)), controls[1]);
    app.home.dots_area = Some(controls[1]);
}

fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    app.home.grid_area = Some(area);

    if app.home.results.is_empty() {
        let empty_block = Block::default()
            .title("No movies loaded - press 'r' to reload")
            .borders(Borders::ALL);
        frame.render_widget(empty_block, area);
        return;
    }

    let title = format!("Popular movies ({})", app.home.results.len());
    let items: Vec<ListItem> = app.home.results.iter().map(cards::movie_card).collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(cards::highlight_style())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.home.list);
}

/// Quadrant glyphs are four columns wide; anything longer than the hero
/// width gets cut with an ellipsis.
fn fit_big_text(title: &str, width: u16) -> String {
    let max = (width / 4).saturating_sub(1) as usize;
    if title.chars().count() <= max {
        title.to_string()
    } else {
        let mut cut: String = title.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
