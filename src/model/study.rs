use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Topic priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl Priority {
    /// Parse the stored string form (`Low`, `Medium`, `High`)
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "Low" | "low" => Some(Priority::Low),
            "Medium" | "medium" => Some(Priority::Medium),
            "High" | "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// How a topic is studied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StudyMode {
    #[default]
    Theory,
    Practical,
    Assignment,
    /// Stored as `"Lab Work"` (with the space) in the persisted schema
    #[serde(rename = "Lab Work")]
    LabWork,
    Revision,
}

impl std::fmt::Display for StudyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyMode::Theory => write!(f, "Theory"),
            StudyMode::Practical => write!(f, "Practical"),
            StudyMode::Assignment => write!(f, "Assignment"),
            StudyMode::LabWork => write!(f, "Lab Work"),
            StudyMode::Revision => write!(f, "Revision"),
        }
    }
}

impl StudyMode {
    pub fn parse(s: &str) -> Option<StudyMode> {
        match s {
            "Theory" | "theory" => Some(StudyMode::Theory),
            "Practical" | "practical" => Some(StudyMode::Practical),
            "Assignment" | "assignment" => Some(StudyMode::Assignment),
            "Lab Work" | "lab-work" | "lab work" => Some(StudyMode::LabWork),
            "Revision" | "revision" => Some(StudyMode::Revision),
            _ => None,
        }
    }
}

/// One logged re-study of a topic. `count` is the 1-based sequence number
/// of the revision within its topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub date: NaiveDate,
    pub count: u32,
}

/// A single unit of study material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_date: Option<NaiveDate>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    pub revisions: Vec<Revision>,
    pub notes: String,
    /// Minutes invested
    pub time_spent: u32,
    /// 1-5
    pub difficulty: u8,
    pub priority: Priority,
    pub study_mode: StudyMode,
}

/// A chapter groups topics within one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub topics: Vec<Topic>,
}

impl Chapter {
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }
}

/// A subject owns chapters; `color` is a `#RRGGBB` hex string used by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
    pub chapters: Vec<Chapter>,
}

impl Subject {
    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    pub fn chapter_mut(&mut self, chapter_id: &str) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.id == chapter_id)
    }
}

/// The whole study tree, persisted as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StudyData {
    pub subjects: Vec<Subject>,
}

impl StudyData {
    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    pub fn subject_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_topic() -> Topic {
        Topic {
            id: "1-1-1".into(),
            name: "Derivatives".into(),
            study_date: Some(NaiveDate::from_ymd_opt(2025, 9, 18).unwrap()),
            completed: true,
            completed_date: Some(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()),
            revisions: vec![Revision {
                date: NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
                count: 1,
            }],
            notes: "Product rule, chain rule.".into(),
            time_spent: 120,
            difficulty: 4,
            priority: Priority::High,
            study_mode: StudyMode::Theory,
        }
    }

    #[test]
    fn topic_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_topic()).unwrap();
        assert_eq!(json["studyDate"], "2025-09-18");
        assert_eq!(json["completedDate"], "2025-09-20");
        assert_eq!(json["timeSpent"], 120);
        assert_eq!(json["studyMode"], "Theory");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["revisions"][0]["count"], 1);
    }

    #[test]
    fn optional_dates_are_omitted_when_absent() {
        let mut topic = sample_topic();
        topic.study_date = None;
        topic.completed = false;
        topic.completed_date = None;
        let json = serde_json::to_value(&topic).unwrap();
        assert!(json.get("studyDate").is_none());
        assert!(json.get("completedDate").is_none());
    }

    #[test]
    fn lab_work_round_trips_with_space() {
        let json = serde_json::to_string(&StudyMode::LabWork).unwrap();
        assert_eq!(json, "\"Lab Work\"");
        let mode: StudyMode = serde_json::from_str("\"Lab Work\"").unwrap();
        assert_eq!(mode, StudyMode::LabWork);
    }

    #[test]
    fn deserializes_a_stored_document() {
        // a fragment in the exact persisted slot shape
        let raw = r##"{
            "subjects": [{
                "id": "1",
                "name": "Mathematics",
                "color": "#3B82F6",
                "chapters": [{
                    "id": "1-1",
                    "name": "Calculus",
                    "topics": [{
                        "id": "1-1-2",
                        "name": "Integration",
                        "studyDate": "2025-09-19",
                        "completed": false,
                        "revisions": [],
                        "notes": "Basic techniques.",
                        "timeSpent": 90,
                        "difficulty": 3,
                        "priority": "Medium",
                        "studyMode": "Theory"
                    }]
                }]
            }]
        }"##;
        let data: StudyData = serde_json::from_str(raw).unwrap();
        let topic = &data.subjects[0].chapters[0].topics[0];
        assert_eq!(topic.name, "Integration");
        assert!(!topic.completed);
        assert!(topic.completed_date.is_none());
        assert_eq!(topic.time_spent, 90);
        assert_eq!(topic.study_mode, StudyMode::Theory);
    }

    #[test]
    fn lookup_helpers_find_by_id() {
        let data = StudyData {
            subjects: vec![Subject {
                id: "s1".into(),
                name: "Physics".into(),
                color: "#10B981".into(),
                chapters: vec![Chapter {
                    id: "c1".into(),
                    name: "Mechanics".into(),
                    topics: vec![sample_topic()],
                }],
            }],
        };
        assert!(data.subject("s1").is_some());
        assert!(data.subject("nope").is_none());
        let chapter = data.subject("s1").unwrap().chapter("c1").unwrap();
        assert!(chapter.topic("1-1-1").is_some());
        assert!(chapter.topic("1-1-9").is_none());
    }
}
