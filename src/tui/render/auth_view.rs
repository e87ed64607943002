use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, AuthTab};

use super::centered_rect;

/// Placeholder while the identity provider resolves
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup = centered_rect(30, 3, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "loading session\u{2026}",
        Style::default().fg(theme.dim).bg(theme.background),
    )))
    .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup);
}

/// The credential gate: sign-in / sign-up tabs
pub fn render_auth(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let form = &app.auth_form;

    let height = form.fields.len() as u16 + 8;
    let popup = centered_rect(48, height, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .title(Span::styled(
            " Study Tracker ",
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));

    let tab_style = |active: bool| {
        if active {
            Style::default()
                .fg(theme.background)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(theme.background)
        }
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " Master your academics with organized study planning",
            Style::default().fg(theme.dim).bg(theme.background),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ", Style::default().bg(theme.background)),
            Span::styled(" Sign In ", tab_style(form.tab == AuthTab::SignIn)),
            Span::styled("  ", Style::default().bg(theme.background)),
            Span::styled(" Sign Up ", tab_style(form.tab == AuthTab::SignUp)),
        ]),
        Line::from(""),
    ];

    for (i, field) in form.fields.iter().enumerate() {
        let active = i == form.active;
        let marker = if active { "\u{276F} " } else { "  " };
        let label_style = if active {
            Style::default().fg(theme.highlight).bg(theme.background)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        let shown = if field.masked {
            "\u{2022}".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if active { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<18}", marker, field.label), label_style),
            Span::styled(
                format!("{}{}", shown, cursor),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(theme.red).bg(theme.background),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " \u{2190}/\u{2192} switch tab \u{00B7} Enter submit \u{00B7} Esc quit",
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup);
}
