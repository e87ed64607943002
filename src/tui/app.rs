use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::identity::{AuthState, IdentityProvider, LocalIdentity};
use crate::io::config_io;
use crate::io::session_io;
use crate::io::store::StudyStore;
use crate::model::config::AppConfig;
use crate::model::session::FocusSession;
use crate::model::study::{Chapter, StudyData, Subject};
use crate::timer::countdown::{CountdownCycle, PhaseEnd};
use crate::timer::stopwatch::Stopwatch;
use crate::timer::ticker::Ticker;

use super::input;
use super::render;
use super::theme::Theme;

/// Which level of the hierarchy is displayed. Never persisted; every
/// launch starts at `Subjects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Subjects,
    Chapters { subject_id: String },
    Topics { subject_id: String, chapter_id: String },
}

/// Which timer tab the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTab {
    Pomodoro,
    Stopwatch,
}

/// The timers overlay. Owns its ticker, so closing the panel (dropping
/// it) cancels the periodic callback with it.
pub struct TimersPanel {
    pub tab: TimerTab,
    pub countdown: CountdownCycle,
    pub stopwatch: Stopwatch,
    /// Loaded session log, refreshed when a session is appended
    pub sessions: Vec<FocusSession>,
    /// Index into the configured subject list
    pub subject_idx: usize,
    pub second_ticker: Ticker,
}

impl TimersPanel {
    pub fn open(config: &AppConfig, data_dir: &Path) -> Self {
        let subjects = &config.stopwatch.subjects;
        let first = subjects.first().cloned().unwrap_or_else(|| "General".to_string());
        TimersPanel {
            tab: TimerTab::Pomodoro,
            countdown: CountdownCycle::new(config.timer.clone()),
            stopwatch: Stopwatch::new(first),
            sessions: session_io::read_sessions(data_dir),
            subject_idx: 0,
            second_ticker: Ticker::spawn(Duration::from_secs(1)),
        }
    }

    /// Drain pending ticks into the countdown, collecting transitions.
    pub fn poll(&mut self) -> Vec<PhaseEnd> {
        let mut events = Vec::new();
        for _ in 0..self.second_ticker.drain() {
            if let Some(end) = self.countdown.tick() {
                events.push(end);
            }
        }
        events
    }
}

/// One transient status-row notification
pub struct Toast {
    pub title: String,
    pub body: String,
    pub created: Instant,
}

const TOAST_SECS: u64 = 4;

/// A single-line text field in the add/auth forms
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        FormField { label, value: String::new(), masked: false }
    }

    pub fn with_value(label: &'static str, value: &str) -> Self {
        FormField { label, value: value.to_string(), masked: false }
    }

    pub fn masked(label: &'static str) -> Self {
        FormField { label, value: String::new(), masked: true }
    }
}

/// What the add dialog creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Subject,
    Chapter,
    Topic,
}

/// The add dialog for the current level
pub struct AddForm {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub active: usize,
}

impl AddForm {
    pub fn for_kind(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::Subject => vec![
                FormField::new("Name"),
                FormField::with_value("Color", "#3B82F6"),
            ],
            FormKind::Chapter => vec![FormField::new("Name")],
            FormKind::Topic => vec![
                FormField::new("Name"),
                FormField::new("Notes"),
                FormField::with_value("Priority", "Medium"),
                FormField::with_value("Difficulty", "3"),
                FormField::with_value("Mode", "Theory"),
            ],
        };
        AddForm { kind, fields, active: 0 }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Subject => "Add Subject",
            FormKind::Chapter => "Add Chapter",
            FormKind::Topic => "Add Topic",
        }
    }
}

/// Which credential form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    SignIn,
    SignUp,
}

/// The credential form shown while signed out
pub struct AuthForm {
    pub tab: AuthTab,
    pub fields: Vec<FormField>,
    pub active: usize,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new(tab: AuthTab) -> Self {
        let fields = match tab {
            AuthTab::SignIn => vec![FormField::new("Email"), FormField::masked("Password")],
            AuthTab::SignUp => vec![
                FormField::new("Full Name"),
                FormField::new("Email"),
                FormField::masked("Password"),
                FormField::masked("Confirm Password"),
            ],
        };
        AuthForm { tab, fields, active: 0, error: None }
    }

    pub fn switch_tab(&mut self) {
        let next = match self.tab {
            AuthTab::SignIn => AuthTab::SignUp,
            AuthTab::SignUp => AuthTab::SignIn,
        };
        *self = AuthForm::new(next);
    }
}

/// Main application state
pub struct App {
    pub data_dir: PathBuf,
    pub store: StudyStore,
    /// Last tree read from the store; refreshed after every mutation
    pub data: StudyData,
    pub config: AppConfig,
    pub identity: LocalIdentity,
    pub auth: AuthState,
    pub auth_form: AuthForm,
    pub view: View,
    pub subjects_cursor: usize,
    pub chapters_cursor: usize,
    pub topics_cursor: usize,
    pub form: Option<AddForm>,
    pub timers: Option<TimersPanel>,
    pub toasts: Vec<Toast>,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(data_dir: &Path) -> Self {
        let store = StudyStore::open(data_dir);
        let data = store.load();
        let config = config_io::read_config(data_dir);
        let theme = Theme::from_config(&config.ui);
        App {
            data_dir: data_dir.to_path_buf(),
            store,
            data,
            config,
            identity: LocalIdentity::new(data_dir),
            auth: AuthState::Loading,
            auth_form: AuthForm::new(AuthTab::SignIn),
            view: View::Subjects,
            subjects_cursor: 0,
            chapters_cursor: 0,
            topics_cursor: 0,
            form: None,
            timers: None,
            toasts: Vec::new(),
            show_help: false,
            should_quit: false,
            theme,
        }
    }

    /// Re-read the tree after a mutation; local tree state is never kept
    /// across a write.
    pub fn refresh(&mut self) {
        self.data = self.store.load();
        // a selection can only vanish if the slot was replaced externally
        if let View::Chapters { subject_id } | View::Topics { subject_id, .. } = &self.view
            && self.data.subject(subject_id).is_none()
        {
            self.view = View::Subjects;
        }
        if let View::Topics { subject_id, chapter_id } = &self.view
            && self
                .data
                .subject(subject_id)
                .and_then(|s| s.chapter(chapter_id))
                .is_none()
        {
            let subject_id = subject_id.clone();
            self.view = View::Chapters { subject_id };
        }
        self.clamp_cursors();
    }

    pub fn clamp_cursors(&mut self) {
        let subjects = self.data.subjects.len();
        self.subjects_cursor = self.subjects_cursor.min(subjects.saturating_sub(1));
        let chapters = self.current_subject().map_or(0, |s| s.chapters.len());
        self.chapters_cursor = self.chapters_cursor.min(chapters.saturating_sub(1));
        let topics = self.current_chapter().map_or(0, |c| c.topics.len());
        self.topics_cursor = self.topics_cursor.min(topics.saturating_sub(1));
    }

    pub fn current_subject(&self) -> Option<&Subject> {
        match &self.view {
            View::Subjects => None,
            View::Chapters { subject_id } | View::Topics { subject_id, .. } => {
                self.data.subject(subject_id)
            }
        }
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        match &self.view {
            View::Topics { subject_id, chapter_id } => self
                .data
                .subject(subject_id)
                .and_then(|s| s.chapter(chapter_id)),
            _ => None,
        }
    }

    /// Descend into the item under the cursor.
    pub fn enter_selected(&mut self) {
        match &self.view {
            View::Subjects => {
                if let Some(subject) = self.data.subjects.get(self.subjects_cursor) {
                    self.view = View::Chapters { subject_id: subject.id.clone() };
                    self.chapters_cursor = 0;
                }
            }
            View::Chapters { subject_id } => {
                let subject_id = subject_id.clone();
                if let Some(chapter) = self
                    .data
                    .subject(&subject_id)
                    .and_then(|s| s.chapters.get(self.chapters_cursor))
                {
                    self.view = View::Topics {
                        subject_id,
                        chapter_id: chapter.id.clone(),
                    };
                    self.topics_cursor = 0;
                }
            }
            View::Topics { .. } => {}
        }
    }

    /// One breadcrumb level up; selections below the target are cleared.
    pub fn go_up(&mut self) {
        match &self.view {
            View::Subjects => {}
            View::Chapters { .. } => {
                self.view = View::Subjects;
                self.chapters_cursor = 0;
                self.topics_cursor = 0;
            }
            View::Topics { subject_id, .. } => {
                self.view = View::Chapters { subject_id: subject_id.clone() };
                self.topics_cursor = 0;
            }
        }
    }

    /// The breadcrumb's root segment: back to the subject list.
    pub fn go_home(&mut self) {
        self.view = View::Subjects;
        self.chapters_cursor = 0;
        self.topics_cursor = 0;
    }

    /// Fire-and-forget notification; rendering and expiry happen in the
    /// status row, and pushing never fails the caller.
    pub fn push_toast(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.toasts.push(Toast {
            title: title.into(),
            body: body.into(),
            created: Instant::now(),
        });
    }

    pub fn expire_toasts(&mut self) {
        self.toasts
            .retain(|t| t.created.elapsed() < Duration::from_secs(TOAST_SECS));
    }

    /// Per-loop bookkeeping: resolve the identity gate, advance timers,
    /// expire toasts.
    pub fn on_tick(&mut self) {
        if self.auth == AuthState::Loading {
            self.identity.load();
            self.auth = self.identity.state();
        }
        let mut ended = Vec::new();
        if let Some(panel) = &mut self.timers {
            ended = panel.poll();
        }
        for end in ended {
            let (title, body) = end.message();
            if self.config.timer.sound {
                ring_bell();
            }
            self.push_toast(title, body);
        }
        self.expire_toasts();
    }

    pub fn toggle_timers(&mut self) {
        if self.timers.is_some() {
            // dropping the panel cancels its ticker
            self.timers = None;
        } else {
            self.timers = Some(TimersPanel::open(&self.config, &self.data_dir));
        }
    }
}

/// Audible cue for phase completion. Must never block the timer, so it
/// is a single byte to stdout, errors ignored.
fn ring_bell() {
    use std::io::Write;
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(data_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.on_tick();
        terminal.draw(|frame| render::render(frame, app))?;

        // refresh faster while a timer display is on screen
        let poll_timeout = if app.timers.is_some() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(250)
        };
        if event::poll(poll_timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let app = App::new(tmp.path());
        (tmp, app)
    }

    #[test]
    fn starts_at_the_subject_list() {
        let (_tmp, app) = test_app();
        assert_eq!(app.view, View::Subjects);
        // the store seeded the sample data
        assert_eq!(app.data.subjects.len(), 2);
    }

    #[test]
    fn enter_descends_and_escape_climbs() {
        let (_tmp, mut app) = test_app();
        app.enter_selected();
        assert!(matches!(app.view, View::Chapters { .. }));
        app.enter_selected();
        assert!(matches!(app.view, View::Topics { .. }));
        // topics is the deepest level
        app.enter_selected();
        assert!(matches!(app.view, View::Topics { .. }));
        app.go_up();
        assert!(matches!(app.view, View::Chapters { .. }));
        app.go_up();
        assert_eq!(app.view, View::Subjects);
    }

    #[test]
    fn home_clears_selections_below() {
        let (_tmp, mut app) = test_app();
        app.subjects_cursor = 0;
        app.enter_selected();
        app.chapters_cursor = 1;
        app.enter_selected();
        app.topics_cursor = 1;
        app.go_home();
        assert_eq!(app.view, View::Subjects);
        assert_eq!(app.chapters_cursor, 0);
        assert_eq!(app.topics_cursor, 0);
    }

    #[test]
    fn auth_gate_resolves_on_first_tick() {
        let (_tmp, mut app) = test_app();
        assert_eq!(app.auth, AuthState::Loading);
        app.on_tick();
        assert_eq!(app.auth, AuthState::SignedOut);
    }

    #[test]
    fn toggling_timers_acquires_and_releases_the_panel() {
        let (_tmp, mut app) = test_app();
        assert!(app.timers.is_none());
        app.toggle_timers();
        assert!(app.timers.is_some());
        app.toggle_timers();
        assert!(app.timers.is_none());
    }

    #[test]
    fn toasts_expire_but_not_immediately() {
        let (_tmp, mut app) = test_app();
        app.push_toast("Subject Added", "Mathematics has been added");
        app.expire_toasts();
        assert_eq!(app.toasts.len(), 1);
        app.toasts[0].created = Instant::now() - Duration::from_secs(TOAST_SECS + 1);
        app.expire_toasts();
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn refresh_rereads_the_tree_from_the_store() {
        let (_tmp, mut app) = test_app();
        let before = app.data.subjects.len();
        app.store
            .add_subject(crate::ops::study_ops::NewSubject {
                name: "Chemistry".into(),
                color: "#F59E0B".into(),
            })
            .unwrap();
        // local state is stale until refreshed
        assert_eq!(app.data.subjects.len(), before);
        app.refresh();
        assert_eq!(app.data.subjects.len(), before + 1);
    }
}
