use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("j/k \u{2193}/\u{2191}", "move cursor"),
    ("Enter", "open subject / chapter"),
    ("Esc", "up one level"),
    ("g", "back to subjects"),
    ("a", "add at this level"),
    ("c", "mark topic complete"),
    ("r", "log a revision"),
    ("t", "study timers"),
    ("S", "sign out"),
    ("q", "quit"),
];

/// Render the key reference overlay
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup = centered_rect(44, KEYS.len() as u16 + 3, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .title(Span::styled(
            " Keys ",
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));

    let mut lines: Vec<Line> = Vec::new();
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<12}", key),
                Style::default().fg(theme.highlight).bg(theme.background),
            ),
            Span::styled(
                action.to_string(),
                Style::default().fg(theme.text).bg(theme.background),
            ),
        ]));
    }
    lines.push(Line::from(Span::styled(
        " any key to close",
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup);
}
