use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::study::{Priority, Topic};
use crate::tui::app::App;

use super::pad_line;

/// Render the topics of the selected chapter, with a detail pane for the
/// topic under the cursor
pub fn render_topics_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(chapter) = app.current_chapter() else {
        return;
    };
    let selected = chapter.topics.get(app.topics_cursor);

    let constraints = if selected.is_some() {
        vec![Constraint::Min(1), Constraint::Length(7)]
    } else {
        vec![Constraint::Min(1)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_topic_list(frame, app, chunks[0]);
    if let Some(topic) = selected {
        render_topic_detail(frame, app, chunks[1], topic);
    }
}

fn priority_color(app: &App, priority: Priority) -> ratatui::style::Color {
    match priority {
        Priority::Low => app.theme.dim,
        Priority::Medium => app.theme.yellow,
        Priority::High => app.theme.red,
    }
}

fn stars(difficulty: u8) -> String {
    let filled = difficulty.clamp(1, 5) as usize;
    let mut s = "\u{2605}".repeat(filled);
    s.push_str(&"\u{2606}".repeat(5 - filled));
    s
}

fn render_topic_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(chapter) = app.current_chapter() else {
        return;
    };
    let mut lines: Vec<Line> = vec![Line::from("")];

    if chapter.topics.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" No topics yet. Press a to start studying {}", chapter.name),
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    for (i, topic) in chapter.topics.iter().enumerate() {
        let is_cursor = i == app.topics_cursor;
        let bg = if is_cursor {
            theme.selection_bg
        } else {
            theme.background
        };

        let (badge, badge_color) = if topic.completed {
            ("[\u{2713}]", theme.green)
        } else {
            ("[ ]", theme.dim)
        };

        let mut spans: Vec<Span> = vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(badge, Style::default().fg(badge_color).bg(bg)),
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(
                format!("{:<26}", topic.name),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(if is_cursor { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!("{:<7}", topic.priority.to_string()),
                Style::default().fg(priority_color(app, topic.priority)).bg(bg),
            ),
            Span::styled(
                format!(" {} ", stars(topic.difficulty)),
                Style::default().fg(theme.yellow).bg(bg),
            ),
            Span::styled(
                format!(" {:<10}", topic.study_mode.to_string()),
                Style::default().fg(theme.cyan).bg(bg),
            ),
        ];
        if !topic.revisions.is_empty() {
            spans.push(Span::styled(
                format!(" \u{21BB}{}", topic.revisions.len()),
                Style::default().fg(theme.purple).bg(bg),
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

fn render_topic_detail(frame: &mut Frame, app: &App, area: Rect, topic: &Topic) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .title(Span::styled(
            format!(" {} ", topic.name),
            Style::default().fg(theme.text_bright).bg(theme.background),
        ));

    let mut lines: Vec<Line> = Vec::new();

    let mut meta: Vec<Span> = Vec::new();
    if let Some(date) = topic.study_date {
        meta.push(Span::styled(
            format!(" studied {}", date),
            Style::default().fg(theme.text).bg(theme.background),
        ));
    }
    if let Some(date) = topic.completed_date {
        meta.push(Span::styled(
            format!("  \u{2713} completed {}", date),
            Style::default().fg(theme.green).bg(theme.background),
        ));
    }
    if topic.time_spent > 0 {
        meta.push(Span::styled(
            format!("  {}m spent", topic.time_spent),
            Style::default().fg(theme.text).bg(theme.background),
        ));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }

    if let Some(last) = topic.revisions.last() {
        lines.push(Line::from(Span::styled(
            format!(
                " {} revisions, last on {}",
                topic.revisions.len(),
                last.date
            ),
            Style::default().fg(theme.purple).bg(theme.background),
        )));
    }

    if !topic.notes.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", topic.notes),
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " no notes yet",
            Style::default().fg(theme.dim).bg(theme.background),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
