use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::io::journal::{self, JournalCategory, JournalEntry};
use crate::model::study::{
    Chapter, Priority, Revision, StudyData, StudyMode, Subject, Topic,
};
use crate::ops::study_ops::{
    self, IdAllocator, NewChapter, NewSubject, NewTopic, StudyError, TopicPatch,
};

/// Name of the tree slot inside the data directory
pub const STUDY_FILE: &str = "study.json";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize study data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Study(#[from] StudyError),
}

/// Resolve the data directory: explicit flag, then `SYLLABUS_DIR`, then
/// `~/.syllabus`.
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var("SYLLABUS_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".syllabus")
}

/// The persistence store: one JSON slot holding the whole study tree.
///
/// Every mutator is read → pure op → write-whole-tree; callers re-read
/// after a mutation instead of holding the tree. Writes are atomic and
/// unconditional (last writer wins).
pub struct StudyStore {
    data_dir: PathBuf,
    ids: IdAllocator,
}

impl StudyStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let _ = fs::create_dir_all(&data_dir);
        StudyStore {
            data_dir,
            ids: IdAllocator::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn study_path(&self) -> PathBuf {
        self.data_dir.join(STUDY_FILE)
    }

    /// Read the current tree. A missing slot seeds the sample dataset;
    /// an unparsable slot falls back to the sample dataset, preserving
    /// the bad content in the journal. Never fails.
    pub fn load(&self) -> StudyData {
        let path = self.study_path();
        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(data) => data,
                Err(e) => {
                    journal::log_journal(
                        &self.data_dir,
                        JournalEntry::now(
                            JournalCategory::Storage,
                            format!("{} unreadable, reseeding: {}", STUDY_FILE, e),
                            text,
                        ),
                    );
                    self.seed()
                }
            },
            Err(_) => self.seed(),
        }
    }

    fn seed(&self) -> StudyData {
        let data = seed_data();
        if let Err(e) = self.save(&data) {
            journal::log_journal(
                &self.data_dir,
                JournalEntry::now(
                    JournalCategory::Storage,
                    format!("could not write seed dataset: {}", e),
                    String::new(),
                ),
            );
        }
        data
    }

    /// Replace the stored tree with `data`, atomically.
    pub fn save(&self, data: &StudyData) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(data)?;
        let path = self.study_path();
        journal::atomic_write(&path, content.as_bytes())
            .map_err(|source| StoreError::WriteError { path, source })
    }

    pub fn add_subject(&mut self, new: NewSubject) -> Result<String, StoreError> {
        let mut data = self.load();
        let id = study_ops::add_subject(&mut data, &mut self.ids, new);
        self.save(&data)?;
        Ok(id)
    }

    pub fn add_chapter(&mut self, subject_id: &str, new: NewChapter) -> Result<String, StoreError> {
        let mut data = self.load();
        let id = study_ops::add_chapter(&mut data, &mut self.ids, subject_id, new)?;
        self.save(&data)?;
        Ok(id)
    }

    pub fn add_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        new: NewTopic,
    ) -> Result<String, StoreError> {
        let mut data = self.load();
        let id = study_ops::add_topic(&mut data, &mut self.ids, subject_id, chapter_id, new)?;
        self.save(&data)?;
        Ok(id)
    }

    pub fn update_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
        patch: TopicPatch,
    ) -> Result<(), StoreError> {
        let mut data = self.load();
        study_ops::update_topic(&mut data, subject_id, chapter_id, topic_id, patch)?;
        self.save(&data)
    }

    /// Append a revision dated today; returns the new count.
    pub fn add_revision(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
    ) -> Result<u32, StoreError> {
        let mut data = self.load();
        let count =
            study_ops::add_revision(&mut data, subject_id, chapter_id, topic_id, today())?;
        self.save(&data)?;
        Ok(count)
    }

    pub fn mark_topic_complete(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
    ) -> Result<(), StoreError> {
        let mut data = self.load();
        study_ops::mark_topic_complete(&mut data, subject_id, chapter_id, topic_id, today())?;
        self.save(&data)
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

/// The fixed sample dataset written on first access.
pub fn seed_data() -> StudyData {
    StudyData {
        subjects: vec![
            Subject {
                id: "1".into(),
                name: "Mathematics".into(),
                color: "#3B82F6".into(),
                chapters: vec![
                    Chapter {
                        id: "1-1".into(),
                        name: "Calculus".into(),
                        topics: vec![
                            Topic {
                                id: "1-1-1".into(),
                                name: "Derivatives".into(),
                                study_date: Some(date(2025, 9, 18)),
                                completed: true,
                                completed_date: Some(date(2025, 9, 20)),
                                revisions: vec![
                                    Revision { date: date(2025, 9, 22), count: 1 },
                                    Revision { date: date(2025, 9, 25), count: 2 },
                                ],
                                notes: "Important rules: Product rule, Chain rule, Quotient rule. \
                                        Applications in optimization problems."
                                    .into(),
                                time_spent: 120,
                                difficulty: 4,
                                priority: Priority::High,
                                study_mode: StudyMode::Theory,
                            },
                            Topic {
                                id: "1-1-2".into(),
                                name: "Integration".into(),
                                study_date: Some(date(2025, 9, 19)),
                                completed: false,
                                completed_date: None,
                                revisions: vec![],
                                notes: "Basic integration techniques and applications.".into(),
                                time_spent: 90,
                                difficulty: 3,
                                priority: Priority::Medium,
                                study_mode: StudyMode::Theory,
                            },
                        ],
                    },
                    Chapter {
                        id: "1-2".into(),
                        name: "Linear Algebra".into(),
                        topics: vec![Topic {
                            id: "1-2-1".into(),
                            name: "Matrices".into(),
                            study_date: Some(date(2025, 9, 17)),
                            completed: true,
                            completed_date: Some(date(2025, 9, 19)),
                            revisions: vec![Revision { date: date(2025, 9, 21), count: 1 }],
                            notes: "Matrix operations, determinants, and inverse matrices.".into(),
                            time_spent: 150,
                            difficulty: 3,
                            priority: Priority::High,
                            study_mode: StudyMode::Theory,
                        }],
                    },
                ],
            },
            Subject {
                id: "2".into(),
                name: "Physics".into(),
                color: "#10B981".into(),
                chapters: vec![Chapter {
                    id: "2-1".into(),
                    name: "Mechanics".into(),
                    topics: vec![Topic {
                        id: "2-1-1".into(),
                        name: "Newton's Laws".into(),
                        study_date: Some(date(2025, 9, 16)),
                        completed: true,
                        completed_date: Some(date(2025, 9, 18)),
                        revisions: vec![],
                        notes: "Three laws of motion and their applications in problem solving."
                            .into(),
                        time_spent: 100,
                        difficulty: 2,
                        priority: Priority::Medium,
                        study_mode: StudyMode::Theory,
                    }],
                }],
            },
        ],
    }
}
