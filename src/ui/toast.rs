use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

const TOAST_WIDTH: u16 = 40;

/// Transient notice in the top-right corner while it is showing.
pub fn render(app: &App, frame: &mut Frame) {
    let Some(message) = app.games.notice().message() else {
        return;
    };
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let height = (message.lines().count() as u16 + 2).min(area.height);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let toast = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(toast, rect);
}
