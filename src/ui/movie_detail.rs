use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};
use tui_big_text::{BigText, PixelSize};

use super::{cards, loading};
use crate::app::App;
use crate::app::api::FetchFailure;

/// Renders the movie detail screen
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.detail.loading {
        loading::render_loading(
            frame,
            &mut app.throbber,
            area,
            "Fetching movie details...",
            &[],
        );
        return;
    }

    if let Some(failure) = app.detail.error.clone() {
        render_error_state(frame, area, &failure);
        return;
    }

    if app.detail.movie.is_some() {
        render_movie_info(frame, area, app);
    } else {
        render_empty_state(frame, area);
    }
}

/// Renders error state with diagnostics and a way back
fn render_error_state(frame: &mut Frame, area: Rect, failure: &FetchFailure) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Big text
            Constraint::Min(5),    // Details
        ])
        .split(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec!["UNAVAILABLE".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big_text, chunks[0]);

    let error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Could not load this movie (error: {})", failure.reason()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("URL: {}", failure.url),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let error_paragraph = Paragraph::new(error_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, chunks[1]);
}

/// Renders empty state
fn render_empty_state(frame: &mut Frame, area: Rect) {
    let empty_block = Block::default().title("Movie Details").borders(Borders::ALL);

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No movie details available",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let empty_paragraph = Paragraph::new(empty_text)
        .block(empty_block)
        .alignment(Alignment::Center);

    frame.render_widget(empty_paragraph, area);
}

/// Renders movie information
fn render_movie_info(frame: &mut Frame, area: Rect, app: &mut App) {
    // Copy the display data out first so the poster and recommendation
    // widgets can borrow the app mutably afterwards.
    let (title, meta_lines, rec_items) = {
        let Some(movie) = app.detail.movie.as_deref() else {
            return;
        };
        (
            movie.summary.display_title().to_string(),
            build_meta_lines(movie),
            movie
                .top_recommendations()
                .iter()
                .map(cards::movie_card)
                .collect::<Vec<ListItem>>(),
        )
    };

    let outer_block = Block::default()
        .title(format!("Movie Details - {title}"))
        .borders(Borders::ALL);
    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(14),   // Poster + meta
            Constraint::Length(8), // Recommendations
        ])
        .split(inner_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Poster
            Constraint::Min(20),    // Meta
        ])
        .split(rows[0]);

    render_poster_section(frame, columns[0], app);

    let meta = Paragraph::new(meta_lines).wrap(Wrap { trim: true });
    frame.render_widget(meta, columns[1]);

    let recs = List::new(rec_items)
        .block(Block::default().title("You may also like").borders(Borders::ALL))
        .highlight_style(cards::highlight_style())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(recs, rows[1], &mut app.detail.recs);
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App) {
    let poster_block = Block::default().borders(Borders::ALL).title("Poster");

    if app.detail.loading_poster {
        let inner = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        let spinner = throbber_widgets_tui::Throbber::default()
            .label("Downloading poster...")
            .style(Style::default().fg(Color::Cyan));
        frame.render_stateful_widget(spinner, inner, &mut app.throbber);
    } else if let Some(protocol) = &mut app.detail.poster {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
    } else {
        // Missing poster path or failed download: placeholder, the card
        // stays fully usable.
        let placeholder_text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "No poster available",
                Style::default().fg(Color::Gray),
            )),
        ];
        let placeholder_paragraph = Paragraph::new(placeholder_text)
            .alignment(Alignment::Center)
            .block(poster_block);
        frame.render_widget(placeholder_paragraph, area);
    }
}

fn build_meta_lines(movie: &crate::app::models::MovieDetails) -> Vec<Line<'static>> {
    let summary = &movie.summary;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                summary.display_title().to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(format!("({})", summary.year_label()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(summary.vote_label(), Style::default().fg(Color::White)),
            Span::raw(" | "),
            Span::styled("Genres: ", Style::default().fg(Color::Gray)),
            Span::styled(movie.genre_label(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Synopsis:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            summary.overview_text().to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    if let Some(trailer) = movie.trailer() {
        lines.push(Line::from(vec![
            Span::styled(
                "Trailer: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("https://www.youtube.com/watch?v={}", trailer.key),
                Style::default().fg(Color::Blue),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let cast = movie.top_cast();
    if !cast.is_empty() {
        lines.push(Line::from(Span::styled(
            "Cast:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for member in cast {
            let role = member.character.clone().unwrap_or_else(|| "—".to_string());
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", member.name), Style::default().fg(Color::White)),
                Span::styled(format!(" as {role}"), Style::default().fg(Color::Gray)),
            ]));
        }
    }

    lines
}
