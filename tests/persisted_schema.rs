//! The persisted slots are an external interface: one JSON document for
//! the study tree, one JSON array for the stopwatch log, with camelCase
//! keys. These tests pin the on-disk shape end to end through the store.

use std::fs;

use syllabus::io::session_io;
use syllabus::io::store::StudyStore;
use syllabus::model::session::FocusSession;
use syllabus::model::study::{Priority, StudyData, StudyMode};
use syllabus::ops::study_ops::{NewChapter, NewSubject, NewTopic, TopicPatch};

#[test]
fn study_slot_uses_the_camel_case_schema() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut store = StudyStore::open(tmp.path());
    store.save(&StudyData::default()).unwrap();

    let s = store
        .add_subject(NewSubject {
            name: "Chemistry".into(),
            color: "#F59E0B".into(),
        })
        .unwrap();
    let c = store
        .add_chapter(&s, NewChapter { name: "Organic".into() })
        .unwrap();
    let t = store
        .add_topic(
            &s,
            &c,
            NewTopic {
                name: "Alkanes".into(),
                notes: "Nomenclature first.".into(),
                study_date: Some(chrono::Local::now().date_naive()),
                priority: Priority::High,
                difficulty: 2,
                study_mode: StudyMode::LabWork,
            },
        )
        .unwrap();
    store.mark_topic_complete(&s, &c, &t).unwrap();
    store.add_revision(&s, &c, &t).unwrap();
    store
        .update_topic(&s, &c, &t, TopicPatch { time_spent: Some(40), ..Default::default() })
        .unwrap();

    let raw = fs::read_to_string(tmp.path().join("study.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let topic = &doc["subjects"][0]["chapters"][0]["topics"][0];

    // camelCase keys are the on-disk contract
    assert!(topic.get("studyDate").is_some());
    assert!(topic.get("completedDate").is_some());
    assert_eq!(topic["timeSpent"], 40);
    assert_eq!(topic["studyMode"], "Lab Work");
    assert_eq!(topic["priority"], "High");
    assert_eq!(topic["completed"], true);
    assert_eq!(topic["revisions"][0]["count"], 1);
    // snake_case must not leak into the slot
    assert!(topic.get("study_date").is_none());
    assert!(topic.get("time_spent").is_none());

    // and the whole document round-trips through a fresh handle
    let reopened = StudyStore::open(tmp.path()).load();
    assert_eq!(reopened.subjects[0].chapters[0].topics[0].time_spent, 40);
}

#[test]
fn session_slot_matches_the_stopwatch_log_schema() {
    let tmp = tempfile::TempDir::new().unwrap();
    session_io::append_session(
        tmp.path(),
        FocusSession {
            subject: "Physics".into(),
            start_time: 1_758_800_000_000,
            end_time: 1_758_800_090_000,
            duration: 90_000,
        },
    )
    .unwrap();

    let raw = fs::read_to_string(tmp.path().join("sessions.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(doc.is_array());
    assert_eq!(doc[0]["subject"], "Physics");
    assert_eq!(doc[0]["startTime"], 1_758_800_000_000i64);
    assert_eq!(doc[0]["endTime"], 1_758_800_090_000i64);
    assert_eq!(doc[0]["duration"], 90_000);

    let log = session_io::read_sessions(tmp.path());
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].duration, 90_000);
}

#[test]
fn a_hand_written_document_loads_unchanged() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(tmp.path()).unwrap();
    // a document in the documented slot format
    fs::write(
        tmp.path().join("study.json"),
        r##"{
  "subjects": [
    {
      "id": "1",
      "name": "Mathematics",
      "color": "#3B82F6",
      "chapters": [
        {
          "id": "1-1",
          "name": "Calculus",
          "topics": [
            {
              "id": "1-1-1",
              "name": "Derivatives",
              "studyDate": "2025-09-18",
              "completed": true,
              "completedDate": "2025-09-20",
              "revisions": [
                { "date": "2025-09-22", "count": 1 },
                { "date": "2025-09-25", "count": 2 }
              ],
              "notes": "Product rule, chain rule.",
              "timeSpent": 120,
              "difficulty": 4,
              "priority": "High",
              "studyMode": "Theory"
            }
          ]
        }
      ]
    }
  ]
}"##,
    )
    .unwrap();

    let data = StudyStore::open(tmp.path()).load();
    let topic = &data.subjects[0].chapters[0].topics[0];
    assert_eq!(topic.name, "Derivatives");
    assert!(topic.completed);
    assert_eq!(topic.revisions.len(), 2);
    assert_eq!(topic.revisions[1].count, 2);
    assert_eq!(topic.time_spent, 120);
    assert_eq!(topic.priority, Priority::High);
}
