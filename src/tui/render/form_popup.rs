use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

/// Render the add dialog for the current level
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let height = form.fields.len() as u16 + 4;
    let popup = centered_rect(52, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let active = i == form.active;
        let label_style = if active {
            Style::default().fg(theme.highlight).bg(theme.background)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        let marker = if active { "\u{276F} " } else { "  " };
        let shown = if field.masked {
            "\u{2022}".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if active { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<12}", marker, field.label), label_style),
            Span::styled(
                format!("{}{}", shown, cursor),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter next/submit \u{00B7} Tab fields \u{00B7} Esc cancel",
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, popup);
}
