use super::{key_hint, tier_color, truncate_str};
use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + filter(3) + table(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let rows = app.visible_rows();
    let total = app.games.rows().len();

    // ── Header ──
    let header = Paragraph::new(format!(" GameHub · Games   [{} of {} shown]", rows.len(), total))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar + category ──
    let editing = app.input_mode == InputMode::Search;
    let search_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_label = if editing {
        " 🔍 Search (Enter/Esc to finish): "
    } else {
        " 🔍 Search (/): "
    };
    let search_text = app.games.search_text();
    let category = app.games.current_category();
    let search_bar = Paragraph::new(format!("{}{}", search_label, search_text))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search ")
                .title_bottom(
                    Line::from(format!(
                        " category (c): {} ",
                        if category.is_empty() { "All" } else { category.as_str() }
                    ))
                    .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(search_bar, chunks[1]);

    if editing {
        let cursor_x = chunks[1].x
            + unicode_width::UnicodeWidthStr::width(search_label) as u16
            + unicode_width::UnicodeWidthStr::width(search_text.as_str()) as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }

    // ── Table ──
    let title_width = (area.width as usize).saturating_sub(50).max(12);
    let table_rows: Vec<Row> = if app.games.catalog().failure().is_some() {
        // the single load-warning row
        app.games
            .rows()
            .first()
            .map(|w| Row::new(vec![Cell::from(w.borrow().text_content())]).style(Style::default().fg(Color::Red)))
            .into_iter()
            .collect()
    } else {
        rows.iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(truncate_str(&r.title, title_width)),
                    Cell::from(r.genre.clone()),
                    Cell::from(truncate_str(&r.publisher, 18)),
                    Cell::from(r.released.clone()),
                    Cell::from(Span::styled(
                        format!("{:>4}", r.rating),
                        Style::default().fg(tier_color(r.tier)).add_modifier(Modifier::BOLD),
                    )),
                ])
            })
            .collect()
    };

    let table = Table::new(
        table_rows,
        [
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(11),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Title", "Genre", "Publisher", "Released", "Rating"])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Games ")
            .title_bottom(Line::from(format!(" © {} GameHub ", app.year)).alignment(Alignment::Right)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, chunks[2], &mut state);

    // ── Status bar ──
    let mut hints = vec![
        key_hint(" ↑↓"),
        Span::raw(" Navigate  "),
        key_hint("Enter"),
        Span::raw(" Details  "),
        key_hint("x"),
        Span::raw(" Clear  "),
        key_hint("a"),
        Span::raw(" Add sample  "),
        key_hint("Tab"),
        Span::raw(" Home  "),
        key_hint("?"),
        Span::raw(" Help  "),
    ];
    if app.to_top.as_ref().is_some_and(|t| t.is_visible()) {
        hints.push(key_hint("t"));
        hints.push(Span::raw(" Top  "));
    }
    hints.push(Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(hints)), chunks[3]);
}
