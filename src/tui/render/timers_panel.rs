use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use crate::timer::countdown::Phase;
use crate::timer::stopwatch::{self, StopwatchState};
use crate::tui::app::{App, TimerTab};

use super::centered_rect;

/// Render the study timers overlay (countdown cycle + focus stopwatch)
pub fn render_timers_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(panel) = app.timers.as_ref() else {
        return;
    };

    let popup = centered_rect(64, 16, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .title(Span::styled(
            " Study Timers ",
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    frame.render_widget(
        Paragraph::new("").block(block).style(Style::default().bg(theme.background)),
        popup,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_tabs(frame, app, chunks[0]);
    match panel.tab {
        TimerTab::Pomodoro => render_pomodoro(frame, app, chunks[1]),
        TimerTab::Stopwatch => render_stopwatch(frame, app, chunks[1]),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = app.timers.as_ref().unwrap();

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
    let line = Line::from(vec![
        Span::styled(" ", Style::default().bg(theme.background)),
        Span::styled(" Pomodoro ", tab_style(panel.tab == TimerTab::Pomodoro)),
        Span::styled("  ", Style::default().bg(theme.background)),
        Span::styled(" Stopwatch ", tab_style(panel.tab == TimerTab::Stopwatch)),
        Span::styled(
            "   Tab switch \u{00B7} Esc close",
            Style::default().fg(theme.dim).bg(theme.background),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(vec![line]).style(Style::default().bg(theme.background)),
        area,
    );
}

fn render_pomodoro(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = app.timers.as_ref().unwrap();
    let cycle = &panel.countdown;

    let phase_color = match cycle.phase() {
        Phase::Work => theme.highlight,
        Phase::ShortBreak => theme.green,
        Phase::LongBreak => theme.yellow,
    };
    let state = if cycle.is_running() { "running" } else { "paused" };

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ", Style::default().bg(theme.background)),
            Span::styled(
                cycle.phase().title(),
                Style::default()
                    .fg(phase_color)
                    .bg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", state),
                Style::default().fg(theme.dim).bg(theme.background),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}", cycle.format_remaining()),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // completed-session dots toward the long break
    let mut dots: Vec<Span> = vec![Span::styled(
        " sessions ",
        Style::default().fg(theme.text).bg(theme.background),
    )];
    let cadence = cycle.sessions_until_long_break();
    let filled = cycle.sessions_completed() % cadence;
    for i in 0..cadence {
        let (symbol, color) = if i < filled {
            ("\u{25CF} ", theme.green)
        } else {
            ("\u{25CB} ", theme.dim)
        };
        dots.push(Span::styled(symbol, Style::default().fg(color).bg(theme.background)));
    }
    dots.push(Span::styled(
        format!(" {} completed", cycle.sessions_completed()),
        Style::default().fg(theme.text).bg(theme.background),
    ));
    lines.push(Line::from(dots));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " space start/pause \u{00B7} r reset",
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        chunks[0],
    );

    let gauge = Gauge::default()
        .ratio(cycle.progress())
        .gauge_style(Style::default().fg(phase_color).bg(theme.selection_bg))
        .label(Span::styled(
            format!("{:.0}%", cycle.progress() * 100.0),
            Style::default().fg(theme.text_bright),
        ));
    frame.render_widget(gauge, chunks[1]);
}

fn render_stopwatch(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let panel = app.timers.as_ref().unwrap();
    let sw = &panel.stopwatch;

    let state_label = match sw.state() {
        StopwatchState::Idle => ("idle", theme.dim),
        StopwatchState::Running => ("focusing", theme.green),
        StopwatchState::Paused => ("paused", theme.yellow),
    };

    let subject_hint = if sw.state() == StopwatchState::Idle {
        "  \u{2190}/\u{2192} change subject"
    } else {
        ""
    };

    let elapsed_ms = sw.elapsed().as_millis() as u64;
    let today = chrono::Local::now().date_naive();
    let today_count = stopwatch::today_sessions(&panel.sessions, today).len();
    let today_total = stopwatch::today_total_ms(&panel.sessions, today);

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" subject ", Style::default().fg(theme.text).bg(theme.background)),
            Span::styled(
                sw.subject().to_string(),
                Style::default()
                    .fg(theme.cyan)
                    .bg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(subject_hint, Style::default().fg(theme.dim).bg(theme.background)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("   {}", stopwatch::format_elapsed(elapsed_ms)),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", state_label.0),
                Style::default().fg(state_label.1).bg(theme.background),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                " today: {} sessions, {}",
                today_count,
                stopwatch::format_duration(today_total)
            ),
            Style::default().fg(theme.text).bg(theme.background),
        )),
    ];

    // last few logged sessions, newest first
    for session in panel.sessions.iter().rev().take(3) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {:<24}", session.subject),
                Style::default().fg(theme.text).bg(theme.background),
            ),
            Span::styled(
                stopwatch::format_duration(session.duration),
                Style::default().fg(theme.dim).bg(theme.background),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " space start/pause \u{00B7} s stop & log \u{00B7} r reset",
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        area,
    );
}
