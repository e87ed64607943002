pub mod auth_view;
pub mod chapters_view;
pub mod form_popup;
pub mod help_overlay;
pub mod status_row;
pub mod subjects_view;
pub mod timers_panel;
pub mod topics_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::identity::AuthState;

use super::app::{App, View};

/// Main render function: gate first, then the tracker
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    match app.auth.clone() {
        AuthState::Loading => auth_view::render_loading(frame, app, area),
        AuthState::SignedOut => auth_view::render_auth(frame, app, area),
        AuthState::SignedIn(user) => render_tracker(frame, app, area, &user.name),
    }
}

fn render_tracker(frame: &mut Frame, app: &mut App, area: Rect, user_name: &str) {
    app.clamp_cursors();

    // Layout: title + breadcrumb (2 rows) | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0], user_name);

    let view = app.view.clone();
    match &view {
        View::Subjects => subjects_view::render_subjects_view(frame, app, chunks[1]),
        View::Chapters { .. } => chapters_view::render_chapters_view(frame, app, chunks[1]),
        View::Topics { .. } => topics_view::render_topics_view(frame, app, chunks[1]),
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, topmost last
    if app.timers.is_some() {
        timers_panel::render_timers_panel(frame, app, area);
    }
    if app.form.is_some() {
        form_popup::render_form_popup(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect, user_name: &str) {
    let theme = &app.theme;
    let bg = theme.background;

    let mut title_spans = vec![Span::styled(
        " syllabus",
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let right = format!("{} ", user_name);
    let used: usize = " syllabus".width() + right.width();
    if (area.width as usize) > used {
        title_spans.push(Span::styled(
            " ".repeat(area.width as usize - used),
            Style::default().bg(bg),
        ));
    }
    title_spans.push(Span::styled(right, Style::default().fg(theme.dim).bg(bg)));

    // Breadcrumb: root segment, then the selected subject and chapter
    let mut crumb_spans = vec![Span::styled(
        " Study Tracker",
        Style::default().fg(theme.text_bright).bg(bg),
    )];
    if let Some(subject) = app.current_subject() {
        crumb_spans.push(Span::styled(" \u{276F} ", Style::default().fg(theme.dim).bg(bg)));
        crumb_spans.push(Span::styled(
            subject.name.clone(),
            Style::default()
                .fg(theme.subject_color(&subject.color))
                .bg(bg),
        ));
    }
    if let Some(chapter) = app.current_chapter() {
        crumb_spans.push(Span::styled(" \u{276F} ", Style::default().fg(theme.dim).bg(bg)));
        crumb_spans.push(Span::styled(
            chapter.name.clone(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(title_spans), Line::from(crumb_spans)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// A fixed-size rect centered in `area`, clamped to fit
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Text progress bar: `████░░░░░░` scaled to `width` cells
pub(super) fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled.min(width) {
        bar.push('\u{2588}');
    }
    for _ in filled.min(width)..width {
        bar.push('\u{2591}');
    }
    bar
}

/// Pad a span list with background-colored spaces to the row width, so a
/// cursor row is highlighted edge to edge.
pub(super) fn pad_line(spans: &mut Vec<Span<'_>>, width: u16, bg: ratatui::style::Color) {
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let w = width as usize;
    if content_width < w {
        spans.push(Span::styled(
            " ".repeat(w - content_width),
            Style::default().bg(bg),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_full_width() {
        assert_eq!(progress_bar(0.0, 10), "\u{2591}".repeat(10));
        assert_eq!(progress_bar(1.0, 10), "\u{2588}".repeat(10));
        let half = progress_bar(0.5, 10);
        assert_eq!(half.chars().filter(|&c| c == '\u{2588}').count(), 5);
        assert_eq!(half.chars().count(), 10);
        // out-of-range fractions clamp instead of overflowing
        assert_eq!(progress_bar(3.0, 4), "\u{2588}".repeat(4));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(60, 16, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.x, 10);
        let oversized = centered_rect(200, 100, area);
        assert_eq!(oversized.width, 80);
        assert_eq!(oversized.height, 24);
    }
}
