use std::fs;
use std::path::Path;

use crate::io::journal::{self, JournalCategory, JournalEntry};
use crate::io::store::StoreError;
use crate::model::session::FocusSession;

/// Name of the stopwatch log slot inside the data directory. Independent
/// of the study tree slot.
pub const SESSIONS_FILE: &str = "sessions.json";

/// Read the session log. Missing slot → empty log; unparsable slot →
/// empty log with the bad content preserved in the journal.
pub fn read_sessions(data_dir: &Path) -> Vec<FocusSession> {
    let path = data_dir.join(SESSIONS_FILE);
    let Ok(text) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    match serde_json::from_str(&text) {
        Ok(sessions) => sessions,
        Err(e) => {
            journal::log_journal(
                data_dir,
                JournalEntry::now(
                    JournalCategory::Storage,
                    format!("{} unreadable, starting empty: {}", SESSIONS_FILE, e),
                    text,
                ),
            );
            Vec::new()
        }
    }
}

/// Append one completed session and rewrite the whole log atomically.
pub fn append_session(data_dir: &Path, session: FocusSession) -> Result<(), StoreError> {
    let mut sessions = read_sessions(data_dir);
    sessions.push(session);
    let content = serde_json::to_string_pretty(&sessions)?;
    let path = data_dir.join(SESSIONS_FILE);
    journal::atomic_write(&path, content.as_bytes())
        .map_err(|source| StoreError::WriteError { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(subject: &str, start: i64, duration: u64) -> FocusSession {
        FocusSession {
            subject: subject.into(),
            start_time: start,
            end_time: start + duration as i64,
            duration,
        }
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_sessions(tmp.path()).is_empty());
    }

    #[test]
    fn append_then_read_preserves_order() {
        let tmp = TempDir::new().unwrap();
        append_session(tmp.path(), session("Mathematics", 1_000, 60_000)).unwrap();
        append_session(tmp.path(), session("Physics", 2_000, 30_000)).unwrap();

        let log = read_sessions(tmp.path());
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].subject, "Mathematics");
        assert_eq!(log[1].subject, "Physics");
        assert_eq!(log[1].duration, 30_000);
    }

    #[test]
    fn corrupt_log_reads_as_empty_and_journals() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SESSIONS_FILE), "[{broken").unwrap();
        assert!(read_sessions(tmp.path()).is_empty());
        let journal =
            fs::read_to_string(tmp.path().join(crate::io::journal::JOURNAL_FILE)).unwrap();
        assert!(journal.contains("sessions.json unreadable"));
    }
}
