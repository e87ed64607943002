use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::identity::{AuthState, IdentityProvider};
use crate::io::session_io;
use crate::model::study::{Priority, StudyMode};
use crate::ops::study_ops::{NewChapter, NewSubject, NewTopic};
use crate::timer::stopwatch::StopwatchState;

use super::app::{AddForm, App, AuthTab, FormKind, TimerTab, View};

/// Handle a key event, routed by gate state and open overlays
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.auth {
        AuthState::Loading => {
            if key.code == KeyCode::Char('q') {
                app.should_quit = true;
            }
            return;
        }
        AuthState::SignedOut => {
            handle_auth(app, key);
            return;
        }
        AuthState::SignedIn(_) => {}
    }

    if app.show_help {
        app.show_help = false;
        return;
    }
    if app.form.is_some() {
        handle_form(app, key);
        return;
    }
    if app.timers.is_some() {
        handle_timers(app, key);
        return;
    }
    handle_navigate(app, key);
}

// ---------------------------------------------------------------------------
// Browsing the hierarchy
// ---------------------------------------------------------------------------

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.enter_selected(),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => app.go_up(),
        KeyCode::Char('g') | KeyCode::Home => app.go_home(),
        KeyCode::Char('a') => open_add_form(app),
        KeyCode::Char('c') => complete_selected(app),
        KeyCode::Char('r') => revise_selected(app),
        KeyCode::Char('t') => app.toggle_timers(),
        KeyCode::Char('S') => sign_out(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i64) {
    let (cursor, len) = match &app.view {
        View::Subjects => (&mut app.subjects_cursor, app.data.subjects.len()),
        View::Chapters { subject_id } => {
            let len = app
                .data
                .subject(subject_id)
                .map_or(0, |s| s.chapters.len());
            (&mut app.chapters_cursor, len)
        }
        View::Topics { subject_id, chapter_id } => {
            let len = app
                .data
                .subject(subject_id)
                .and_then(|s| s.chapter(chapter_id))
                .map_or(0, |c| c.topics.len());
            (&mut app.topics_cursor, len)
        }
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    let max = len as i64 - 1;
    *cursor = (*cursor as i64 + delta).clamp(0, max) as usize;
}

fn open_add_form(app: &mut App) {
    let kind = match app.view {
        View::Subjects => FormKind::Subject,
        View::Chapters { .. } => FormKind::Chapter,
        View::Topics { .. } => FormKind::Topic,
    };
    app.form = Some(AddForm::for_kind(kind));
}

/// Path of the topic under the cursor in the topics view
fn selected_topic(app: &App) -> Option<(String, String, String)> {
    let View::Topics { subject_id, chapter_id } = &app.view else {
        return None;
    };
    let topic = app
        .data
        .subject(subject_id)?
        .chapter(chapter_id)?
        .topics
        .get(app.topics_cursor)?;
    Some((subject_id.clone(), chapter_id.clone(), topic.id.clone()))
}

fn complete_selected(app: &mut App) {
    let Some((s, c, t)) = selected_topic(app) else {
        return;
    };
    match app.store.mark_topic_complete(&s, &c, &t) {
        Ok(()) => {
            app.refresh();
            app.push_toast("Topic Completed", "Great job! Keep up the momentum!");
        }
        Err(e) => app.push_toast("Not saved", e.to_string()),
    }
}

fn revise_selected(app: &mut App) {
    let Some((s, c, t)) = selected_topic(app) else {
        return;
    };
    match app.store.add_revision(&s, &c, &t) {
        Ok(count) => {
            app.refresh();
            app.push_toast(
                "Revision Added",
                format!("Revision #{} logged. Consistent revision leads to mastery!", count),
            );
        }
        Err(e) => app.push_toast("Not saved", e.to_string()),
    }
}

fn sign_out(app: &mut App) {
    app.identity.sign_out();
    app.auth = app.identity.state();
    app.timers = None;
    app.go_home();
}

// ---------------------------------------------------------------------------
// Add dialog
// ---------------------------------------------------------------------------

fn handle_form(app: &mut App, key: KeyEvent) {
    if app.form.is_none() {
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.form = None;
            return;
        }
        KeyCode::Enter => {
            let at_last = {
                let form = app.form.as_ref().unwrap();
                form.active + 1 >= form.fields.len()
            };
            if at_last {
                submit_form(app);
            } else {
                app.form.as_mut().unwrap().active += 1;
            }
            return;
        }
        _ => {}
    }
    let form = app.form.as_mut().unwrap();
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.active = (form.active + 1) % form.fields.len();
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.active = (form.active + form.fields.len() - 1) % form.fields.len();
        }
        KeyCode::Backspace => {
            form.fields[form.active].value.pop();
        }
        KeyCode::Char(c) => {
            form.fields[form.active].value.push(c);
        }
        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let (kind, values) = {
        let Some(form) = app.form.as_ref() else { return };
        let values: Vec<String> = form.fields.iter().map(|f| f.value.clone()).collect();
        (form.kind, values)
    };

    let name = values[0].trim().to_string();
    if name.is_empty() {
        // validation failure blocks submission before any store call
        let what = match kind {
            FormKind::Subject => "Subject",
            FormKind::Chapter => "Chapter",
            FormKind::Topic => "Topic",
        };
        app.push_toast("Name required", format!("{} name must not be empty", what));
        return;
    }

    let result = match kind {
        FormKind::Subject => {
            let color = values[1].trim().to_string();
            app.store
                .add_subject(NewSubject { name: name.clone(), color })
                .map(|_| format!("{} has been added to your study plan!", name))
        }
        FormKind::Chapter => {
            let View::Chapters { subject_id } = &app.view else { return };
            let subject_id = subject_id.clone();
            app.store
                .add_chapter(&subject_id, NewChapter { name: name.clone() })
                .map(|_| format!("{} has been added!", name))
        }
        FormKind::Topic => {
            let Some(priority) = Priority::parse(values[2].trim()) else {
                app.push_toast("Invalid priority", "Use Low, Medium or High");
                return;
            };
            let Ok(difficulty) = values[3].trim().parse::<u8>() else {
                app.push_toast("Invalid difficulty", "Use a number from 1 to 5");
                return;
            };
            if !(1..=5).contains(&difficulty) {
                app.push_toast("Invalid difficulty", "Use a number from 1 to 5");
                return;
            }
            let Some(study_mode) = StudyMode::parse(values[4].trim()) else {
                app.push_toast(
                    "Invalid mode",
                    "Use Theory, Practical, Assignment, Lab Work or Revision",
                );
                return;
            };
            let View::Topics { subject_id, chapter_id } = &app.view else { return };
            let (subject_id, chapter_id) = (subject_id.clone(), chapter_id.clone());
            app.store
                .add_topic(
                    &subject_id,
                    &chapter_id,
                    NewTopic {
                        name: name.clone(),
                        notes: values[1].clone(),
                        study_date: Some(chrono::Local::now().date_naive()),
                        priority,
                        difficulty,
                        study_mode,
                    },
                )
                .map(|_| format!("{} has been added to your study list!", name))
        }
    };

    match result {
        Ok(body) => {
            let title = match kind {
                FormKind::Subject => "Subject Added",
                FormKind::Chapter => "Chapter Added",
                FormKind::Topic => "Topic Added",
            };
            app.form = None;
            app.refresh();
            app.push_toast(title, body);
        }
        Err(e) => app.push_toast("Not saved", e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Timers panel
// ---------------------------------------------------------------------------

fn handle_timers(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('t') => app.toggle_timers(),
        KeyCode::Tab => {
            if let Some(panel) = app.timers.as_mut() {
                panel.tab = match panel.tab {
                    TimerTab::Pomodoro => TimerTab::Stopwatch,
                    TimerTab::Stopwatch => TimerTab::Pomodoro,
                };
            }
        }
        KeyCode::Char(' ') => {
            let Some(panel) = app.timers.as_mut() else { return };
            match panel.tab {
                TimerTab::Pomodoro => panel.countdown.toggle(),
                TimerTab::Stopwatch => match panel.stopwatch.state() {
                    StopwatchState::Running => panel.stopwatch.pause(),
                    StopwatchState::Idle | StopwatchState::Paused => panel.stopwatch.start(),
                },
            }
        }
        KeyCode::Char('s') => stop_stopwatch(app),
        KeyCode::Char('r') => {
            let Some(panel) = app.timers.as_mut() else { return };
            match panel.tab {
                TimerTab::Pomodoro => panel.countdown.reset(),
                TimerTab::Stopwatch => panel.stopwatch.reset(),
            }
        }
        KeyCode::Left | KeyCode::Char('j') => select_stopwatch_subject(app, -1),
        KeyCode::Right | KeyCode::Char('k') => select_stopwatch_subject(app, 1),
        _ => {}
    }
}

fn select_stopwatch_subject(app: &mut App, delta: i64) {
    let subjects = app.config.stopwatch.subjects.clone();
    let Some(panel) = app.timers.as_mut() else { return };
    if panel.tab != TimerTab::Stopwatch || subjects.is_empty() {
        return;
    }
    // the label is fixed once a session is running
    if panel.stopwatch.state() != StopwatchState::Idle {
        return;
    }
    let len = subjects.len() as i64;
    let idx = ((panel.subject_idx as i64 + delta) % len + len) % len;
    panel.subject_idx = idx as usize;
    panel.stopwatch.set_subject(&subjects[panel.subject_idx]);
}

fn stop_stopwatch(app: &mut App) {
    let Some(panel) = app.timers.as_mut() else { return };
    if panel.tab != TimerTab::Stopwatch {
        return;
    }
    let Some(session) = panel.stopwatch.stop() else {
        // under a second: discarded without a log entry
        return;
    };
    let minutes = session.duration / 60_000;
    let seconds = (session.duration % 60_000) / 1_000;
    let subject = session.subject.clone();
    match session_io::append_session(&app.data_dir, session) {
        Ok(()) => {
            if let Some(panel) = app.timers.as_mut() {
                panel.sessions = session_io::read_sessions(&app.data_dir);
            }
            app.push_toast(
                "Focus Session Complete",
                format!("You focused on {} for {}m {}s.", subject, minutes, seconds),
            );
        }
        Err(e) => app.push_toast("Not saved", e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Credential form
// ---------------------------------------------------------------------------

fn handle_auth(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Right => app.auth_form.switch_tab(),
        KeyCode::Tab | KeyCode::Down => {
            let form = &mut app.auth_form;
            form.active = (form.active + 1) % form.fields.len();
        }
        KeyCode::BackTab | KeyCode::Up => {
            let form = &mut app.auth_form;
            form.active = (form.active + form.fields.len() - 1) % form.fields.len();
        }
        KeyCode::Enter => {
            if app.auth_form.active + 1 < app.auth_form.fields.len() {
                app.auth_form.active += 1;
            } else {
                submit_auth(app);
            }
        }
        KeyCode::Backspace => {
            let form = &mut app.auth_form;
            form.fields[form.active].value.pop();
        }
        KeyCode::Char(c) => {
            let form = &mut app.auth_form;
            form.fields[form.active].value.push(c);
        }
        _ => {}
    }
}

fn submit_auth(app: &mut App) {
    app.auth_form.error = None;
    let tab = app.auth_form.tab;
    let values: Vec<String> = app
        .auth_form
        .fields
        .iter()
        .map(|f| f.value.trim().to_string())
        .collect();

    let result = match tab {
        AuthTab::SignIn => {
            let (email, password) = (&values[0], &values[1]);
            if email.is_empty() || password.is_empty() {
                app.auth_form.error = Some("email and password are required".into());
                return;
            }
            app.identity.sign_in(email, password)
        }
        AuthTab::SignUp => {
            let (name, email, password, confirm) = (&values[0], &values[1], &values[2], &values[3]);
            if name.is_empty() || email.is_empty() || password.is_empty() {
                app.auth_form.error = Some("all fields are required".into());
                return;
            }
            if password != confirm {
                // mismatch blocks submission before the provider is called
                app.auth_form.error = Some("passwords do not match".into());
                return;
            }
            app.identity.sign_up(email, password, name)
        }
    };

    match result {
        Ok(profile) => {
            app.auth = app.identity.state();
            app.push_toast("Welcome", format!("Signed in as {}", profile.name));
        }
        Err(e) => app.auth_form.error = Some(e.to_string()),
    }
}
