use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit application"),
            ("Tab", "Switch between Games and Home"),
            ("v", "Open or close the quick vote panel"),
        ],
    ),
    (
        "Games",
        &[
            ("↑/k ↓/j", "Navigate rows"),
            ("PgUp/PgDn", "Scroll a page"),
            ("g/G", "Jump to first/last row"),
            ("/", "Search titles (Enter/Esc to finish)"),
            ("c", "Next category"),
            ("x", "Clear search and category"),
            ("a", "Add the sample row"),
            ("Enter", "Open game details"),
            ("t", "Back to top (once scrolled)"),
        ],
    ),
    (
        "Home",
        &[("↑/k ↓/j", "Navigate featured games"), ("Enter", "Open game details")],
    ),
    ("Details", &[("Esc", "Close")]),
    (
        "Quick vote",
        &[
            ("1-4", "Pick a genre"),
            ("s", "Toggle newsletter (then type your email)"),
            ("Enter", "Submit vote"),
            ("Esc", "Close panel"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (section, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", section),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (key, action) in *keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help · Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
