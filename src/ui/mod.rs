mod detail;
mod games;
mod help;
mod home;
mod toast;
mod vote;

use crate::app::{App, View};
use game_catalog::game::RatingTier;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.view {
        View::Games => games::render(app, frame),
        View::Home => home::render(app, frame),
    }

    if app.modal_open() {
        detail::render(app, frame);
    }
    if app.quick_vote.is_open() {
        vote::render(app, frame);
    }
    toast::render(app, frame);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

pub(crate) fn tier_color(tier: Option<RatingTier>) -> Color {
    match tier {
        Some(RatingTier::Good) => Color::Green,
        Some(RatingTier::Ok) => Color::Yellow,
        Some(RatingTier::Bad) => Color::Red,
        None => Color::DarkGray,
    }
}

pub(crate) fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Judgment", 20), "Judgment");
        assert_eq!(truncate_str("Stardew Valley", 8), "Stardew…");
        // wide characters count double
        assert_eq!(truncate_str("ゲームカタログ", 5), "ゲー…");
    }
}
