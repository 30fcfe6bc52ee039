use super::{key_hint, tier_color};
use crate::app::App;
use game_catalog::dom::find_first;
use game_catalog::game::RatingTier;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let header = Paragraph::new(" GameHub · Featured games")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // Each card reads back title, meta line and summary from the page.
    let items: Vec<ListItem> = app
        .home
        .featured_cards()
        .iter()
        .map(|card| {
            let card = card.borrow();
            if card.has_class("load-warning") {
                return ListItem::new(Line::from(Span::styled(
                    card.text_content(),
                    Style::default().fg(Color::Red),
                )));
            }
            let text_of = |tag: &str| {
                card.child_elements()
                    .into_iter()
                    .find(|e| e.borrow().tag() == tag)
                    .map(|e| e.borrow().text_content())
                    .unwrap_or_default()
            };
            let tier = card
                .child_elements()
                .iter()
                .find_map(|e| find_first(e, &|x| x.has_class("rating")))
                .and_then(|badge| {
                    let badge = badge.borrow();
                    badge.classes().iter().find_map(|c| RatingTier::from_class(c))
                });
            let meta = card
                .child_elements()
                .into_iter()
                .find(|e| e.borrow().has_class("featured-meta"))
                .map(|e| e.borrow().text_content())
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(Span::styled(
                    text_of("h3"),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(format!("  {}", meta), Style::default().fg(tier_color(tier)))),
                Line::from(Span::styled(format!("  {}", text_of("p")), Style::default().fg(Color::DarkGray))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Featured ")
                .title_bottom(Line::from(format!(" © {} GameHub ", app.year)).alignment(Alignment::Right)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.featured_selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let status = Line::from(vec![
        key_hint(" ↑↓"),
        Span::raw(" Navigate  "),
        key_hint("Enter"),
        Span::raw(" Details  "),
        key_hint("v"),
        Span::raw(" Vote  "),
        key_hint("Tab"),
        Span::raw(" Games  "),
        key_hint("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[2]);
}
