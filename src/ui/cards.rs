use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::app::models::MovieSummary;

const SNIPPET_LEN: usize = 90;

/// Two-line list card shared by the result grids: title with year on top,
/// rating and synopsis snippet below.
pub fn movie_card(movie: &MovieSummary) -> ListItem<'static> {
    let content = vec![
        Line::from(vec![
            Span::styled(
                movie.display_title().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", movie.year_label()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(Span::styled(
            format!("  ★ {} • {}", movie.vote_label(), snippet(movie.overview_text())),
            Style::default().fg(Color::Gray),
        )),
    ];
    ListItem::new(content)
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_LEN {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(SNIPPET_LEN).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(snippet("brief plot"), "brief plot");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let long = "x".repeat(200);
        let cut = snippet(&long);
        assert_eq!(cut.chars().count(), SNIPPET_LEN + 1);
        assert!(cut.ends_with('…'));
    }
}
