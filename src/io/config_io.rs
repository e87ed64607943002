use std::fs;
use std::io;
use std::path::Path;

use crate::io::journal::{self, JournalCategory, JournalEntry};
use crate::model::config::AppConfig;

/// Name of the config slot inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Read config.toml. A missing file yields the defaults; a malformed
/// file yields the defaults plus a journal entry.
pub fn read_config(data_dir: &Path) -> AppConfig {
    let path = data_dir.join(CONFIG_FILE);
    let Ok(text) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            journal::log_journal(
                data_dir,
                JournalEntry::now(
                    JournalCategory::Config,
                    format!("{} unreadable, using defaults: {}", CONFIG_FILE, e),
                    text,
                ),
            );
            AppConfig::default()
        }
    }
}

/// Write the default config, for `sy init`. Does not overwrite an
/// existing file.
pub fn write_default_config(data_dir: &Path) -> io::Result<bool> {
    let path = data_dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(data_dir)?;
    let content = toml::to_string_pretty(&AppConfig::default())
        .expect("default config serializes");
    fs::write(&path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_config(tmp.path()), AppConfig::default());
    }

    #[test]
    fn init_writes_defaults_once() {
        let tmp = TempDir::new().unwrap();
        assert!(write_default_config(tmp.path()).unwrap());
        assert!(!write_default_config(tmp.path()).unwrap());

        let written = read_config(tmp.path());
        assert_eq!(written, AppConfig::default());
    }

    #[test]
    fn malformed_config_falls_back_and_journals() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "timer = \"oops").unwrap();
        assert_eq!(read_config(tmp.path()), AppConfig::default());
        let journal =
            fs::read_to_string(tmp.path().join(crate::io::journal::JOURNAL_FILE)).unwrap();
        assert!(journal.contains("config.toml unreadable"));
    }

    #[test]
    fn overrides_are_read_back() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[timer]\nwork_minutes = 45\n",
        )
        .unwrap();
        let config = read_config(tmp.path());
        assert_eq!(config.timer.work_minutes, 45);
        assert_eq!(config.timer.short_break_minutes, 5);
    }
}
