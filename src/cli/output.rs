use chrono::NaiveDate;
use serde::Serialize;

use crate::model::session::FocusSession;
use crate::model::study::{Chapter, Subject, Topic};
use crate::ops::stats::{self, StudyTotals};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SubjectJson {
    pub id: String,
    pub name: String,
    pub color: String,
    pub chapters: usize,
    pub topics: usize,
    pub completed: usize,
    pub progress: f64,
}

#[derive(Serialize)]
pub struct ChapterJson {
    pub id: String,
    pub name: String,
    pub topics: usize,
    pub completed: usize,
    pub progress: f64,
}

#[derive(Serialize)]
pub struct TopicJson {
    pub id: String,
    pub name: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_date: Option<NaiveDate>,
    pub revisions: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub time_spent: u32,
    pub difficulty: u8,
    pub priority: String,
    pub study_mode: String,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub topics_completed: usize,
    pub total_topics: usize,
    pub study_time_minutes: u64,
    pub total_revisions: usize,
    pub overall_progress: f64,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub subject: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_ms: u64,
}

#[derive(Serialize)]
pub struct SubjectTimeJson {
    pub subject: String,
    pub total_ms: u64,
}

#[derive(Serialize)]
pub struct SessionsJson {
    pub today_count: usize,
    pub today_ms: u64,
    pub per_subject: Vec<SubjectTimeJson>,
    pub sessions: Vec<SessionJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn subject_to_json(subject: &Subject) -> SubjectJson {
    let (completed, topics) = stats::subject_topic_counts(subject);
    SubjectJson {
        id: subject.id.clone(),
        name: subject.name.clone(),
        color: subject.color.clone(),
        chapters: subject.chapters.len(),
        topics,
        completed,
        progress: stats::subject_progress(subject),
    }
}

pub fn chapter_to_json(chapter: &Chapter) -> ChapterJson {
    let completed = chapter.topics.iter().filter(|t| t.completed).count();
    ChapterJson {
        id: chapter.id.clone(),
        name: chapter.name.clone(),
        topics: chapter.topics.len(),
        completed,
        progress: stats::chapter_progress(chapter),
    }
}

pub fn topic_to_json(topic: &Topic) -> TopicJson {
    TopicJson {
        id: topic.id.clone(),
        name: topic.name.clone(),
        completed: topic.completed,
        completed_date: topic.completed_date,
        study_date: topic.study_date,
        revisions: topic.revisions.len(),
        notes: topic.notes.clone(),
        time_spent: topic.time_spent,
        difficulty: topic.difficulty,
        priority: topic.priority.to_string(),
        study_mode: topic.study_mode.to_string(),
    }
}

pub fn totals_to_json(totals: &StudyTotals) -> StatsJson {
    StatsJson {
        topics_completed: totals.topics_completed,
        total_topics: totals.total_topics,
        study_time_minutes: totals.study_time_minutes,
        total_revisions: totals.total_revisions,
        overall_progress: totals.overall_progress,
    }
}

pub fn session_to_json(session: &FocusSession) -> SessionJson {
    SessionJson {
        subject: session.subject.clone(),
        start_time: session.start_time,
        end_time: session.end_time,
        duration_ms: session.duration,
    }
}
