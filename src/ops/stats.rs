use crate::model::study::{Chapter, StudyData, Subject};

/// Whole-tree totals shown in the stats header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StudyTotals {
    pub topics_completed: usize,
    pub total_topics: usize,
    pub study_time_minutes: u64,
    pub total_revisions: usize,
    /// `100 * completed / total`, 0 for an empty tree
    pub overall_progress: f64,
}

/// Completion percentage for one chapter. 0 when the chapter has no
/// topics (never divides by zero).
pub fn chapter_progress(chapter: &Chapter) -> f64 {
    let total = chapter.topics.len();
    if total == 0 {
        return 0.0;
    }
    let completed = chapter.topics.iter().filter(|t| t.completed).count();
    100.0 * completed as f64 / total as f64
}

/// Completion percentage across all of a subject's topics.
pub fn subject_progress(subject: &Subject) -> f64 {
    let (completed, total) = subject_topic_counts(subject);
    if total == 0 {
        return 0.0;
    }
    100.0 * completed as f64 / total as f64
}

/// `(completed, total)` topic counts for a subject
pub fn subject_topic_counts(subject: &Subject) -> (usize, usize) {
    let mut completed = 0;
    let mut total = 0;
    for chapter in &subject.chapters {
        total += chapter.topics.len();
        completed += chapter.topics.iter().filter(|t| t.completed).count();
    }
    (completed, total)
}

/// Recompute the header totals from scratch.
pub fn study_totals(data: &StudyData) -> StudyTotals {
    let mut totals = StudyTotals::default();
    for subject in &data.subjects {
        for chapter in &subject.chapters {
            for topic in &chapter.topics {
                totals.total_topics += 1;
                if topic.completed {
                    totals.topics_completed += 1;
                }
                totals.study_time_minutes += topic.time_spent as u64;
                totals.total_revisions += topic.revisions.len();
            }
        }
    }
    if totals.total_topics > 0 {
        totals.overall_progress =
            100.0 * totals.topics_completed as f64 / totals.total_topics as f64;
    }
    totals
}

/// "3h 25m" for display in the stats header
pub fn format_minutes(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
