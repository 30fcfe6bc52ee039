use super::{centered_rect, key_hint, tier_color};
use crate::app::App;
use game_catalog::dom::{ElementRef, find_first};
use game_catalog::game::RatingTier;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Detail overlay, drawn from whatever the modal controller wrote into
/// the page.
pub fn render(app: &App, frame: &mut Frame) {
    let Some(modal) = app.active_modal() else {
        return;
    };
    let els = modal.elements();
    let text = |el: &ElementRef| el.borrow().text_content();

    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", text(&els.title)))
        .title_bottom(Line::from(vec![key_hint(" Esc"), Span::raw(" Close ")]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(inner);

    let label = |name: &'static str| Span::styled(name, Style::default().fg(Color::DarkGray));
    let mut rating_line = vec![label(" Rating:    ")];
    if let Some(rating) = &els.rating {
        let tier = find_first(rating, &|e| e.has_class("rating")).and_then(|badge| {
            let badge = badge.borrow();
            badge.classes().iter().find_map(|c| RatingTier::from_class(c))
        });
        rating_line.push(Span::styled(
            text(rating),
            Style::default().fg(tier_color(tier)).add_modifier(Modifier::BOLD),
        ));
    }

    let cover = els.cover.borrow().attr("src").unwrap_or("").to_string();
    let meta = vec![
        Line::from(vec![
            label(" Genre:     "),
            Span::styled(text(&els.genre), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            label(" Publisher: "),
            Span::styled(text(&els.publisher), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            label(" Platforms: "),
            Span::styled(text(&els.platforms), Style::default().fg(Color::White)),
        ]),
        Line::from(rating_line),
        Line::from(vec![
            label(" Cover:     "),
            Span::styled(cover, Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)),
        ]),
    ];
    frame.render_widget(Paragraph::new(meta), chunks[0]);

    // Summary lines are separated by `br` elements; text_content keeps them
    // as newlines.
    let summary = Paragraph::new(text(&els.summary))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(summary, chunks[1]);
}
