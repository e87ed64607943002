use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Bottom row: the freshest toast, or key hints for the current view
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some(toast) = app.toasts.last() {
        Line::from(vec![
            Span::styled(
                format!(" {} ", toast.title),
                Style::default()
                    .fg(theme.background)
                    .bg(theme.green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", toast.body),
                Style::default().fg(theme.text).bg(theme.background),
            ),
        ])
    } else {
        let hints = match app.view {
            View::Subjects => " Enter open \u{00B7} a add subject \u{00B7} t timers \u{00B7} ? help \u{00B7} q quit",
            View::Chapters { .. } => " Enter open \u{00B7} a add chapter \u{00B7} Esc back \u{00B7} ? help",
            View::Topics { .. } => " c complete \u{00B7} r revision \u{00B7} a add topic \u{00B7} Esc back \u{00B7} ? help",
        };
        Line::from(Span::styled(
            hints,
            Style::default().fg(theme.dim).bg(theme.background),
        ))
    };

    frame.render_widget(
        Paragraph::new(vec![line]).style(Style::default().bg(theme.background)),
        area,
    );
}
