use chrono::{NaiveDate, Utc};

use crate::model::study::{
    Chapter, Priority, Revision, StudyData, StudyMode, Subject, Topic,
};

/// Error type for tree operations. A missing path segment surfaces as an
/// error and leaves the tree untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudyError {
    #[error("subject not found: {0}")]
    SubjectNotFound(String),
    #[error("chapter not found: {0}")]
    ChapterNotFound(String),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
}

/// Issues record ids derived from the clock, but never the same value
/// twice: when the clock has not advanced past the last issued id, the
/// allocator steps past it instead. Ids stay unique even for records
/// created within one millisecond.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let id = if now > self.last { now } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }
}

/// A subject as submitted by the user, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewChapter {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
    pub notes: String,
    pub study_date: Option<NaiveDate>,
    pub priority: Priority,
    pub difficulty: u8,
    pub study_mode: StudyMode,
}

/// Fields of a topic that may be rewritten after creation. `None` fields
/// are left alone; the merge is a shallow field overwrite.
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub study_date: Option<NaiveDate>,
    pub time_spent: Option<u32>,
    pub difficulty: Option<u8>,
    pub priority: Option<Priority>,
    pub study_mode: Option<StudyMode>,
}

/// Append a subject with a freshly assigned id. Returns the id.
pub fn add_subject(data: &mut StudyData, ids: &mut IdAllocator, new: NewSubject) -> String {
    let id = ids.next_id();
    data.subjects.push(Subject {
        id: id.clone(),
        name: new.name,
        color: new.color,
        chapters: Vec::new(),
    });
    id
}

/// Append a chapter under the addressed subject. Returns the new id.
pub fn add_chapter(
    data: &mut StudyData,
    ids: &mut IdAllocator,
    subject_id: &str,
    new: NewChapter,
) -> Result<String, StudyError> {
    let subject = data
        .subject_mut(subject_id)
        .ok_or_else(|| StudyError::SubjectNotFound(subject_id.to_string()))?;
    let id = ids.next_id();
    subject.chapters.push(Chapter {
        id: id.clone(),
        name: new.name,
        topics: Vec::new(),
    });
    Ok(id)
}

/// Append a topic under the addressed chapter. Returns the new id.
pub fn add_topic(
    data: &mut StudyData,
    ids: &mut IdAllocator,
    subject_id: &str,
    chapter_id: &str,
    new: NewTopic,
) -> Result<String, StudyError> {
    let chapter = chapter_mut(data, subject_id, chapter_id)?;
    let id = ids.next_id();
    chapter.topics.push(Topic {
        id: id.clone(),
        name: new.name,
        study_date: new.study_date,
        completed: false,
        completed_date: None,
        revisions: Vec::new(),
        notes: new.notes,
        time_spent: 0,
        difficulty: new.difficulty,
        priority: new.priority,
        study_mode: new.study_mode,
    });
    Ok(id)
}

/// Shallow-merge the patch into the addressed topic.
pub fn update_topic(
    data: &mut StudyData,
    subject_id: &str,
    chapter_id: &str,
    topic_id: &str,
    patch: TopicPatch,
) -> Result<(), StudyError> {
    let topic = topic_mut(data, subject_id, chapter_id, topic_id)?;
    if let Some(name) = patch.name {
        topic.name = name;
    }
    if let Some(notes) = patch.notes {
        topic.notes = notes;
    }
    if let Some(date) = patch.study_date {
        topic.study_date = Some(date);
    }
    if let Some(minutes) = patch.time_spent {
        topic.time_spent = minutes;
    }
    if let Some(difficulty) = patch.difficulty {
        topic.difficulty = difficulty;
    }
    if let Some(priority) = patch.priority {
        topic.priority = priority;
    }
    if let Some(mode) = patch.study_mode {
        topic.study_mode = mode;
    }
    Ok(())
}

/// Append a revision entry dated `today`. `count` continues the topic's
/// 1-based sequence. Returns the new count.
pub fn add_revision(
    data: &mut StudyData,
    subject_id: &str,
    chapter_id: &str,
    topic_id: &str,
    today: NaiveDate,
) -> Result<u32, StudyError> {
    let topic = topic_mut(data, subject_id, chapter_id, topic_id)?;
    let count = topic.revisions.len() as u32 + 1;
    topic.revisions.push(Revision { date: today, count });
    Ok(count)
}

/// Mark the addressed topic complete as of `today`. Calling again keeps
/// `completed` true and moves `completed_date` to the new day.
pub fn mark_topic_complete(
    data: &mut StudyData,
    subject_id: &str,
    chapter_id: &str,
    topic_id: &str,
    today: NaiveDate,
) -> Result<(), StudyError> {
    let topic = topic_mut(data, subject_id, chapter_id, topic_id)?;
    topic.completed = true;
    topic.completed_date = Some(today);
    Ok(())
}

fn chapter_mut<'a>(
    data: &'a mut StudyData,
    subject_id: &str,
    chapter_id: &str,
) -> Result<&'a mut Chapter, StudyError> {
    let subject = data
        .subject_mut(subject_id)
        .ok_or_else(|| StudyError::SubjectNotFound(subject_id.to_string()))?;
    subject
        .chapter_mut(chapter_id)
        .ok_or_else(|| StudyError::ChapterNotFound(chapter_id.to_string()))
}

fn topic_mut<'a>(
    data: &'a mut StudyData,
    subject_id: &str,
    chapter_id: &str,
    topic_id: &str,
) -> Result<&'a mut Topic, StudyError> {
    chapter_mut(data, subject_id, chapter_id)?
        .topic_mut(topic_id)
        .ok_or_else(|| StudyError::TopicNotFound(topic_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    fn tree_with_topic() -> (StudyData, String, String, String) {
        let mut data = StudyData::default();
        let mut ids = IdAllocator::new();
        let s = add_subject(
            &mut data,
            &mut ids,
            NewSubject {
                name: "Mathematics".into(),
                color: "#3B82F6".into(),
            },
        );
        let c = add_chapter(&mut data, &mut ids, &s, NewChapter { name: "Calculus".into() }).unwrap();
        let t = add_topic(
            &mut data,
            &mut ids,
            &s,
            &c,
            NewTopic {
                name: "Derivatives".into(),
                notes: String::new(),
                study_date: Some(today()),
                priority: Priority::High,
                difficulty: 4,
                study_mode: StudyMode::Theory,
            },
        )
        .unwrap();
        (data, s, c, t)
    }

    #[test]
    fn add_subject_appends_with_fresh_id() {
        let mut data = StudyData::default();
        let mut ids = IdAllocator::new();
        let id = add_subject(
            &mut data,
            &mut ids,
            NewSubject {
                name: "Physics".into(),
                color: "#10B981".into(),
            },
        );
        assert_eq!(data.subjects.len(), 1);
        let subject = &data.subjects[0];
        assert_eq!(subject.id, id);
        assert_eq!(subject.name, "Physics");
        assert_eq!(subject.color, "#10B981");
        assert!(subject.chapters.is_empty());
    }

    #[test]
    fn id_allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn id_allocator_ids_are_strictly_increasing() {
        let mut ids = IdAllocator::new();
        let a: u64 = ids.next_id().parse().unwrap();
        let b: u64 = ids.next_id().parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn add_chapter_to_missing_subject_is_an_error() {
        let mut data = StudyData::default();
        let mut ids = IdAllocator::new();
        let err = add_chapter(&mut data, &mut ids, "999", NewChapter { name: "Waves".into() })
            .unwrap_err();
        assert_eq!(err, StudyError::SubjectNotFound("999".into()));
        assert!(data.subjects.is_empty());
    }

    #[test]
    fn add_topic_reports_which_segment_is_missing() {
        let (mut data, s, _, _) = tree_with_topic();
        let mut ids = IdAllocator::new();
        let new = NewTopic {
            name: "Integration".into(),
            notes: String::new(),
            study_date: None,
            priority: Priority::Medium,
            difficulty: 3,
            study_mode: StudyMode::Theory,
        };
        let before = data.clone();
        let err = add_topic(&mut data, &mut ids, "nope", "x", new.clone()).unwrap_err();
        assert_eq!(err, StudyError::SubjectNotFound("nope".into()));
        let err = add_topic(&mut data, &mut ids, &s, "x", new).unwrap_err();
        assert_eq!(err, StudyError::ChapterNotFound("x".into()));
        assert_eq!(data, before);
    }

    #[test]
    fn revisions_count_one_to_n_in_order() {
        let (mut data, s, c, t) = tree_with_topic();
        for _ in 0..5 {
            add_revision(&mut data, &s, &c, &t, today()).unwrap();
        }
        let revisions = &data.subject(&s).unwrap().chapter(&c).unwrap().topic(&t).unwrap().revisions;
        assert_eq!(revisions.len(), 5);
        let counts: Vec<u32> = revisions.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn mark_complete_sets_flag_and_date() {
        let (mut data, s, c, t) = tree_with_topic();
        mark_topic_complete(&mut data, &s, &c, &t, today()).unwrap();
        let topic = data.subject(&s).unwrap().chapter(&c).unwrap().topic(&t).unwrap();
        assert!(topic.completed);
        assert_eq!(topic.completed_date, Some(today()));
    }

    #[test]
    fn mark_complete_again_overwrites_the_date() {
        let (mut data, s, c, t) = tree_with_topic();
        mark_topic_complete(&mut data, &s, &c, &t, today()).unwrap();
        let later = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
        mark_topic_complete(&mut data, &s, &c, &t, later).unwrap();
        let topic = data.subject(&s).unwrap().chapter(&c).unwrap().topic(&t).unwrap();
        assert!(topic.completed);
        assert_eq!(topic.completed_date, Some(later));
    }

    #[test]
    fn update_topic_merges_only_given_fields() {
        let (mut data, s, c, t) = tree_with_topic();
        update_topic(
            &mut data,
            &s,
            &c,
            &t,
            TopicPatch {
                notes: Some("Chain rule first.".into()),
                time_spent: Some(45),
                ..Default::default()
            },
        )
        .unwrap();
        let topic = data.subject(&s).unwrap().chapter(&c).unwrap().topic(&t).unwrap();
        assert_eq!(topic.notes, "Chain rule first.");
        assert_eq!(topic.time_spent, 45);
        // untouched fields keep their values
        assert_eq!(topic.name, "Derivatives");
        assert_eq!(topic.priority, Priority::High);
        assert_eq!(topic.difficulty, 4);
    }

    #[test]
    fn update_missing_topic_is_an_error_and_leaves_tree_unchanged() {
        let (mut data, s, c, _) = tree_with_topic();
        let before = data.clone();
        let err = update_topic(&mut data, &s, &c, "ghost", TopicPatch::default()).unwrap_err();
        assert_eq!(err, StudyError::TopicNotFound("ghost".into()));
        assert_eq!(data, before);
    }
}
