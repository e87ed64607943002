use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;

use super::{pad_line, progress_bar};

/// Render the chapters of the selected subject
pub fn render_chapters_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(subject) = app.current_subject() else {
        return;
    };
    let accent = theme.subject_color(&subject.color);
    let mut lines: Vec<Line> = vec![Line::from("")];

    if subject.chapters.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" No chapters yet. Press a to organize {}", subject.name),
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    for (i, chapter) in subject.chapters.iter().enumerate() {
        let is_cursor = i == app.chapters_cursor;
        let bg = if is_cursor {
            theme.selection_bg
        } else {
            theme.background
        };
        let completed = chapter.topics.iter().filter(|t| t.completed).count();
        let progress = stats::chapter_progress(chapter);

        let mut spans: Vec<Span> = vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled("\u{25B8} ", Style::default().fg(accent).bg(bg)),
            Span::styled(
                format!("{:<28}", chapter.name),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(if is_cursor { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!("{:>3}/{:<3} topics  ", completed, chapter.topics.len()),
                Style::default().fg(theme.text).bg(bg),
            ),
            Span::styled(
                progress_bar(progress / 100.0, 12),
                Style::default().fg(theme.green).bg(bg),
            ),
            Span::styled(
                format!(" {:>3.0}%", progress),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
        ];
        if !chapter.topics.is_empty() && completed == chapter.topics.len() {
            spans.push(Span::styled(
                "  \u{2713} complete",
                Style::default().fg(theme.green).bg(bg),
            ));
        }
        if is_cursor {
            pad_line(&mut spans, area.width, bg);
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
