use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Name of the diagnostics journal inside the data directory
pub const JOURNAL_FILE: &str = "journal.md";

/// What part of the system produced a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalCategory {
    Storage,
    Config,
    Identity,
}

impl std::fmt::Display for JournalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalCategory::Storage => write!(f, "storage"),
            JournalCategory::Config => write!(f, "config"),
            JournalCategory::Identity => write!(f, "identity"),
        }
    }
}

/// One diagnostics entry. `body` carries salvaged content (e.g. the
/// unparsable document) so a bad slot is never silently discarded.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub category: JournalCategory,
    pub description: String,
    pub body: String,
}

impl JournalEntry {
    pub fn now(category: JournalCategory, description: impl Into<String>, body: impl Into<String>) -> Self {
        JournalEntry {
            timestamp: chrono::Utc::now(),
            category,
            description: description.into(),
            body: body.into(),
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} — {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push('\n');
        out
    }
}

/// Append an entry to journal.md. Failures are swallowed: diagnostics
/// must never fail the operation that produced them.
pub fn log_journal(data_dir: &Path, entry: JournalEntry) {
    let _ = append_entry(data_dir, &entry);
}

fn append_entry(data_dir: &Path, entry: &JournalEntry) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(JOURNAL_FILE))?;
    file.write_all(entry.to_markdown().as_bytes())
}

/// Write a file via a temp file in the same directory, then rename over
/// the target. A reader sees either the old content or the new, never a
/// partial write.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
