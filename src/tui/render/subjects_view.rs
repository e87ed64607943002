use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::stats;
use crate::tui::app::App;

use super::{pad_line, progress_bar};

/// Render the subject list with the stats header above it
pub fn render_subjects_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    render_stat_cards(frame, app, chunks[0]);
    render_subject_list(frame, app, chunks[1]);
}

fn render_stat_cards(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let totals = stats::study_totals(&app.data);

    let cards: [(&str, String, ratatui::style::Color); 4] = [
        (
            "Topics Completed",
            format!("{}/{}", totals.topics_completed, totals.total_topics),
            theme.green,
        ),
        (
            "Study Time",
            stats::format_minutes(totals.study_time_minutes),
            theme.blue,
        ),
        ("Revisions", totals.total_revisions.to_string(), theme.purple),
        (
            "Progress",
            format!("{:.0}%", totals.overall_progress),
            theme.yellow,
        ),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    for (i, (label, value, color)) in cards.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dim).bg(theme.background))
            .title(Span::styled(
                format!(" {} ", label),
                Style::default().fg(theme.text).bg(theme.background),
            ));
        let value_line = Line::from(Span::styled(
            format!(" {}", value),
            Style::default()
                .fg(*color)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));
        let paragraph = Paragraph::new(vec![value_line])
            .block(block)
            .style(Style::default().bg(theme.background));
        frame.render_widget(paragraph, columns[i]);
    }
}

fn render_subject_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    if app.data.subjects.is_empty() {
        lines.push(Line::from(Span::styled(
            " No subjects yet. Press a to add your first subject",
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    for (i, subject) in app.data.subjects.iter().enumerate() {
        let is_cursor = i == app.subjects_cursor;
        let bg = if is_cursor {
            theme.selection_bg
        } else {
            theme.background
        };
        let (completed, total) = stats::subject_topic_counts(subject);
        let progress = stats::subject_progress(subject);

        let mut spans: Vec<Span> = vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(
                "\u{25CF} ",
                Style::default().fg(theme.subject_color(&subject.color)).bg(bg),
            ),
            Span::styled(
                format!("{:<26}", subject.name),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(if is_cursor { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!("{:>2} chapters  ", subject.chapters.len()),
                Style::default().fg(theme.text).bg(bg),
            ),
            Span::styled(
                format!("{:>3}/{:<3} topics  ", completed, total),
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
        if total > 0 && completed == total {
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
