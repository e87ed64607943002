use std::path::Path;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::session_io;
use crate::io::store::{StudyStore, resolve_data_dir};
use crate::io::config_io;
use crate::model::study::{Chapter, Priority, StudyData, StudyMode, Subject, Topic};
use crate::ops::stats;
use crate::ops::study_ops::{NewChapter, NewSubject, NewTopic, StudyError, TopicPatch};
use crate::timer::stopwatch;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref().map(Path::new));

    let Some(command) = cli.command else {
        // no subcommand launches the TUI; main.rs handles that path
        return Ok(());
    };

    match command {
        Commands::Init => cmd_init(&data_dir),
        Commands::Subjects => cmd_subjects(&data_dir, json),
        Commands::Chapters(args) => cmd_chapters(&data_dir, args, json),
        Commands::Topics(args) => cmd_topics(&data_dir, args, json),
        Commands::AddSubject(args) => cmd_add_subject(&data_dir, args, json),
        Commands::AddChapter(args) => cmd_add_chapter(&data_dir, args, json),
        Commands::AddTopic(args) => cmd_add_topic(&data_dir, args, json),
        Commands::Complete(args) => cmd_complete(&data_dir, args, json),
        Commands::Revise(args) => cmd_revise(&data_dir, args, json),
        Commands::UpdateTopic(args) => cmd_update_topic(&data_dir, args, json),
        Commands::Stats => cmd_stats(&data_dir, json),
        Commands::Sessions => cmd_sessions(&data_dir, json),
    }
}

// ---------------------------------------------------------------------------
// Lookup by id or exact name
// ---------------------------------------------------------------------------

fn resolve_subject<'a>(data: &'a StudyData, key: &str) -> Result<&'a Subject, StudyError> {
    data.subjects
        .iter()
        .find(|s| s.id == key)
        .or_else(|| data.subjects.iter().find(|s| s.name == key))
        .ok_or_else(|| StudyError::SubjectNotFound(key.to_string()))
}

fn resolve_chapter<'a>(subject: &'a Subject, key: &str) -> Result<&'a Chapter, StudyError> {
    subject
        .chapters
        .iter()
        .find(|c| c.id == key)
        .or_else(|| subject.chapters.iter().find(|c| c.name == key))
        .ok_or_else(|| StudyError::ChapterNotFound(key.to_string()))
}

fn resolve_topic<'a>(chapter: &'a Chapter, key: &str) -> Result<&'a Topic, StudyError> {
    chapter
        .topics
        .iter()
        .find(|t| t.id == key)
        .or_else(|| chapter.topics.iter().find(|t| t.name == key))
        .ok_or_else(|| StudyError::TopicNotFound(key.to_string()))
}

/// Resolve `(subject_id, chapter_id, topic_id)` from id-or-name keys
fn resolve_path(
    data: &StudyData,
    path: &TopicPathArgs,
) -> Result<(String, String, String), StudyError> {
    let subject = resolve_subject(data, &path.subject)?;
    let chapter = resolve_chapter(subject, &path.chapter)?;
    let topic = resolve_topic(chapter, &path.topic)?;
    Ok((subject.id.clone(), chapter.id.clone(), topic.id.clone()))
}

fn parse_priority(s: &str) -> Result<Priority, Box<dyn std::error::Error>> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority: {} (use Low, Medium or High)", s).into())
}

fn parse_mode(s: &str) -> Result<StudyMode, Box<dyn std::error::Error>> {
    StudyMode::parse(s).ok_or_else(|| {
        format!(
            "unknown study mode: {} (use Theory, Practical, Assignment, \"Lab Work\" or Revision)",
            s
        )
        .into()
    })
}

fn check_difficulty(d: u8) -> Result<(), Box<dyn std::error::Error>> {
    if (1..=5).contains(&d) {
        Ok(())
    } else {
        Err(format!("difficulty must be 1-5, got {}", d).into())
    }
}

fn nonempty(value: &str, what: &str) -> Result<String, Box<dyn std::error::Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} must not be empty", what).into());
    }
    Ok(trimmed.to_string())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_init(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let wrote_config = config_io::write_default_config(data_dir)?;
    let store = StudyStore::open(data_dir);
    let data = store.load(); // seeds on first access
    println!("initialized {}", data_dir.display());
    if wrote_config {
        println!("  wrote {}", config_io::CONFIG_FILE);
    }
    println!("  {} subjects in {}", data.subjects.len(), crate::io::store::STUDY_FILE);
    Ok(())
}

fn cmd_subjects(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = StudyStore::open(data_dir).load();
    if json {
        let subjects: Vec<SubjectJson> = data.subjects.iter().map(subject_to_json).collect();
        return print_json(&subjects);
    }
    if data.subjects.is_empty() {
        println!("no subjects yet");
        return Ok(());
    }
    for subject in &data.subjects {
        let (completed, total) = stats::subject_topic_counts(subject);
        println!(
            "{:<28} {:>2} chapters  {:>3}/{:<3} topics  {:>3.0}%",
            subject.name,
            subject.chapters.len(),
            completed,
            total,
            stats::subject_progress(subject),
        );
    }
    Ok(())
}

fn cmd_chapters(
    data_dir: &Path,
    args: ChaptersArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = StudyStore::open(data_dir).load();
    let subject = resolve_subject(&data, &args.subject)?;
    if json {
        let chapters: Vec<ChapterJson> = subject.chapters.iter().map(chapter_to_json).collect();
        return print_json(&chapters);
    }
    if subject.chapters.is_empty() {
        println!("no chapters in {}", subject.name);
        return Ok(());
    }
    for chapter in &subject.chapters {
        let completed = chapter.topics.iter().filter(|t| t.completed).count();
        println!(
            "{:<28} {:>3}/{:<3} topics  {:>3.0}%",
            chapter.name,
            completed,
            chapter.topics.len(),
            stats::chapter_progress(chapter),
        );
    }
    Ok(())
}

fn cmd_topics(
    data_dir: &Path,
    args: TopicsArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = StudyStore::open(data_dir).load();
    let subject = resolve_subject(&data, &args.subject)?;
    let chapter = resolve_chapter(subject, &args.chapter)?;
    if json {
        let topics: Vec<TopicJson> = chapter.topics.iter().map(topic_to_json).collect();
        return print_json(&topics);
    }
    if chapter.topics.is_empty() {
        println!("no topics in {}", chapter.name);
        return Ok(());
    }
    for topic in &chapter.topics {
        let badge = if topic.completed { "[x]" } else { "[ ]" };
        let mut line = format!(
            "{} {:<28} {:<8} difficulty {}  {}",
            badge, topic.name, topic.priority, topic.difficulty, topic.study_mode
        );
        if !topic.revisions.is_empty() {
            line.push_str(&format!("  ({} revisions)", topic.revisions.len()));
        }
        if let Some(date) = topic.completed_date {
            line.push_str(&format!("  done {}", date));
        }
        println!("{}", line);
    }
    Ok(())
}

fn cmd_add_subject(
    data_dir: &Path,
    args: AddSubjectArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = nonempty(&args.name, "subject name")?;
    let mut store = StudyStore::open(data_dir);
    let id = store.add_subject(NewSubject {
        name: name.clone(),
        color: args.color,
    })?;
    if json {
        return print_json(&serde_json::json!({ "id": id }));
    }
    println!("added subject {} ({})", name, id);
    Ok(())
}

fn cmd_add_chapter(
    data_dir: &Path,
    args: AddChapterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = nonempty(&args.name, "chapter name")?;
    let mut store = StudyStore::open(data_dir);
    let subject_id = resolve_subject(&store.load(), &args.subject)?.id.clone();
    let id = store.add_chapter(&subject_id, NewChapter { name: name.clone() })?;
    if json {
        return print_json(&serde_json::json!({ "id": id }));
    }
    println!("added chapter {} ({})", name, id);
    Ok(())
}

fn cmd_add_topic(
    data_dir: &Path,
    args: AddTopicArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = nonempty(&args.name, "topic name")?;
    let priority = parse_priority(&args.priority)?;
    let study_mode = parse_mode(&args.study_mode)?;
    check_difficulty(args.difficulty)?;

    let mut store = StudyStore::open(data_dir);
    let data = store.load();
    let subject = resolve_subject(&data, &args.subject)?;
    let chapter_id = resolve_chapter(subject, &args.chapter)?.id.clone();
    let subject_id = subject.id.clone();

    let id = store.add_topic(
        &subject_id,
        &chapter_id,
        NewTopic {
            name: name.clone(),
            notes: args.notes,
            study_date: Some(chrono::Local::now().date_naive()),
            priority,
            difficulty: args.difficulty,
            study_mode,
        },
    )?;
    if json {
        return print_json(&serde_json::json!({ "id": id }));
    }
    println!("added topic {} ({})", name, id);
    Ok(())
}

fn cmd_complete(
    data_dir: &Path,
    args: TopicPathArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = StudyStore::open(data_dir);
    let (s, c, t) = resolve_path(&store.load(), &args)?;
    store.mark_topic_complete(&s, &c, &t)?;
    if json {
        return print_json(&serde_json::json!({ "completed": true }));
    }
    println!("marked complete");
    Ok(())
}

fn cmd_revise(
    data_dir: &Path,
    args: TopicPathArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = StudyStore::open(data_dir);
    let (s, c, t) = resolve_path(&store.load(), &args)?;
    let count = store.add_revision(&s, &c, &t)?;
    if json {
        return print_json(&serde_json::json!({ "count": count }));
    }
    println!("logged revision #{}", count);
    Ok(())
}

fn cmd_update_topic(
    data_dir: &Path,
    args: UpdateTopicArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut patch = TopicPatch::default();
    if let Some(name) = args.name {
        patch.name = Some(nonempty(&name, "topic name")?);
    }
    patch.notes = args.notes;
    patch.time_spent = args.time_spent;
    if let Some(difficulty) = args.difficulty {
        check_difficulty(difficulty)?;
        patch.difficulty = Some(difficulty);
    }
    if let Some(priority) = &args.priority {
        patch.priority = Some(parse_priority(priority)?);
    }
    if let Some(mode) = &args.study_mode {
        patch.study_mode = Some(parse_mode(mode)?);
    }
    if let Some(date) = &args.study_date {
        patch.study_date = Some(NaiveDate::parse_from_str(date, "%Y-%m-%d")?);
    }

    if patch.name.is_none()
        && patch.notes.is_none()
        && patch.time_spent.is_none()
        && patch.difficulty.is_none()
        && patch.priority.is_none()
        && patch.study_mode.is_none()
        && patch.study_date.is_none()
    {
        return Err("nothing to update".into());
    }

    let mut store = StudyStore::open(data_dir);
    let (s, c, t) = resolve_path(&store.load(), &args.path)?;
    store.update_topic(&s, &c, &t, patch)?;
    if json {
        return print_json(&serde_json::json!({ "updated": true }));
    }
    println!("updated topic");
    Ok(())
}

fn cmd_stats(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = StudyStore::open(data_dir).load();
    let totals = stats::study_totals(&data);
    if json {
        return print_json(&totals_to_json(&totals));
    }
    println!("topics completed   {}/{}", totals.topics_completed, totals.total_topics);
    println!("study time         {}", stats::format_minutes(totals.study_time_minutes));
    println!("revisions          {}", totals.total_revisions);
    println!("overall progress   {:.0}%", totals.overall_progress);
    Ok(())
}

fn cmd_sessions(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log = session_io::read_sessions(data_dir);
    let today = chrono::Local::now().date_naive();

    let mut subjects: Vec<&str> = log.iter().map(|s| s.subject.as_str()).collect();
    subjects.sort_unstable();
    subjects.dedup();

    if json {
        let out = SessionsJson {
            today_count: stopwatch::today_sessions(&log, today).len(),
            today_ms: stopwatch::today_total_ms(&log, today),
            per_subject: subjects
                .iter()
                .map(|name| SubjectTimeJson {
                    subject: name.to_string(),
                    total_ms: stopwatch::subject_total_ms(&log, name),
                })
                .collect(),
            sessions: log.iter().map(session_to_json).collect(),
        };
        return print_json(&out);
    }

    if log.is_empty() {
        println!("no focus sessions logged");
        return Ok(());
    }
    println!(
        "today: {} sessions, {}",
        stopwatch::today_sessions(&log, today).len(),
        stopwatch::format_duration(stopwatch::today_total_ms(&log, today)),
    );
    for name in &subjects {
        println!(
            "  {:<28} {}",
            name,
            stopwatch::format_duration(stopwatch::subject_total_ms(&log, name)),
        );
    }
    println!();
    for session in log.iter().rev().take(10) {
        println!(
            "{:<28} {}",
            session.subject,
            stopwatch::format_duration(session.duration),
        );
    }
    Ok(())
}
