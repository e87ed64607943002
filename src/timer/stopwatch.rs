use std::time::{Duration, Instant};

use chrono::{NaiveDate, TimeZone};

use crate::model::session::FocusSession;

/// Stopwatch lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Idle,
    Running,
    Paused,
}

/// Free-running focus stopwatch attributed to one subject label.
///
/// Elapsed time accumulates from the monotonic clock while running and
/// freezes while paused; the wall-clock start is only captured for the
/// session record. Stopping under one second discards the interval (a
/// guard against spurious starts).
#[derive(Debug)]
pub struct Stopwatch {
    subject: String,
    state: StopwatchState,
    accumulated: Duration,
    started_at: Option<Instant>,
    wall_start_ms: Option<i64>,
}

impl Stopwatch {
    pub fn new(subject: impl Into<String>) -> Self {
        Stopwatch {
            subject: subject.into(),
            state: StopwatchState::Idle,
            accumulated: Duration::ZERO,
            started_at: None,
            wall_start_ms: None,
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The subject can only change while idle. Returns whether it did.
    pub fn set_subject(&mut self, subject: &str) -> bool {
        if self.state != StopwatchState::Idle {
            return false;
        }
        self.subject = subject.to_string();
        true
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map(|t| t.elapsed())
                .unwrap_or(Duration::ZERO)
    }

    /// Idle → Running (records the wall start); Paused → Running
    /// (resumes from the frozen value). No effect while Running.
    pub fn start(&mut self) {
        match self.state {
            StopwatchState::Idle => {
                self.wall_start_ms = Some(chrono::Local::now().timestamp_millis());
                self.started_at = Some(Instant::now());
                self.state = StopwatchState::Running;
            }
            StopwatchState::Paused => {
                self.started_at = Some(Instant::now());
                self.state = StopwatchState::Running;
            }
            StopwatchState::Running => {}
        }
    }

    /// Freeze the elapsed value. No effect unless Running.
    pub fn pause(&mut self) {
        if self.state != StopwatchState::Running {
            return;
        }
        if let Some(started) = self.started_at.take() {
            self.accumulated += started.elapsed();
        }
        self.state = StopwatchState::Paused;
    }

    /// End the interval. Under one second of elapsed time the session is
    /// discarded; otherwise the completed record is returned for the
    /// caller to persist. Elapsed resets to zero either way.
    pub fn stop(&mut self) -> Option<FocusSession> {
        if self.state == StopwatchState::Idle {
            return None;
        }
        let elapsed = self.elapsed();
        let session = if elapsed < Duration::from_secs(1) {
            None
        } else {
            let end_ms = chrono::Local::now().timestamp_millis();
            Some(FocusSession {
                subject: self.subject.clone(),
                start_time: self.wall_start_ms.unwrap_or(end_ms),
                end_time: end_ms,
                duration: elapsed.as_millis() as u64,
            })
        };
        self.clear();
        session
    }

    /// Discard the current interval without logging, from any state.
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.state = StopwatchState::Idle;
        self.accumulated = Duration::ZERO;
        self.started_at = None;
        self.wall_start_ms = None;
    }
}

/// `HH:MM:SS` at an hour or more, else `MM:SS.cc` with centiseconds.
pub fn format_elapsed(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        let centis = (ms % 1_000) / 10;
        format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
    }
}

/// "1h 23m" / "45m" for the session list
pub fn format_duration(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

fn session_day(session: &FocusSession) -> Option<NaiveDate> {
    chrono::Local
        .timestamp_millis_opt(session.start_time)
        .single()
        .map(|dt| dt.date_naive())
}

/// Sessions whose start timestamp falls on `today` (local calendar day)
pub fn today_sessions<'a>(log: &'a [FocusSession], today: NaiveDate) -> Vec<&'a FocusSession> {
    log.iter()
        .filter(|s| session_day(s) == Some(today))
        .collect()
}

/// Total focused milliseconds logged today
pub fn today_total_ms(log: &[FocusSession], today: NaiveDate) -> u64 {
    today_sessions(log, today).iter().map(|s| s.duration).sum()
}

/// Cumulative focused milliseconds for one subject label, all time
pub fn subject_total_ms(log: &[FocusSession], subject: &str) -> u64 {
    log.iter()
        .filter(|s| s.subject == subject)
        .map(|s| s.duration)
        .sum()
}
