use super::key_hint;
use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const PANEL_WIDTH: u16 = 36;

/// Quick vote panel, docked to the right edge like the slide-in aside.
pub fn render(app: &App, frame: &mut Frame) {
    let vote = &app.quick_vote;
    let area = frame.area();
    let width = PANEL_WIDTH.min(area.width);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height,
    };
    frame.render_widget(Clear, rect);

    let selected = vote.selected_genre();
    let mut lines = vec![
        Line::from(Span::styled(
            " Favourite genre",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, genre) in vote.genres().iter().enumerate() {
        let checked = selected.as_deref() == Some(genre.as_str());
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", i + 1), Style::default().fg(Color::Yellow)),
            Span::raw(if checked { "(•) " } else { "( ) " }),
            Span::styled(
                genre.clone(),
                if checked {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  s ", Style::default().fg(Color::Yellow)),
        Span::raw(if vote.is_subscribed() { "[x] " } else { "[ ] " }),
        Span::raw("Subscribe to the newsletter"),
    ]));

    let email_row = lines.len() as u16;
    let email = vote.email();
    if vote.is_email_visible() {
        lines.push(Line::from(vec![
            Span::styled("  Email: ", Style::default().fg(Color::DarkGray)),
            Span::styled(email.clone(), Style::default().fg(Color::White)),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Quick vote ")
            .title_bottom(Line::from(vec![
                key_hint(" Enter"),
                Span::raw(" Vote  "),
                key_hint("Esc"),
                Span::raw(" Close "),
            ])),
    );
    frame.render_widget(panel, rect);

    if app.input_mode == InputMode::Email && vote.is_email_visible() {
        let cursor_x = rect.x + 1 + "  Email: ".len() as u16 + unicode_width::UnicodeWidthStr::width(email.as_str()) as u16;
        frame.set_cursor_position((cursor_x.min(rect.right().saturating_sub(2)), rect.y + 1 + email_row));
    }
}
