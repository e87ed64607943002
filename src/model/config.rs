use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml. Every field has a default so a
/// missing or partial file still yields a working config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub stopwatch: StopwatchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Countdown cycle durations (minutes) and cadence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
    /// Ring the terminal bell on phase completion
    #[serde(default = "default_true")]
    pub sound: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
            sound: true,
        }
    }
}

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_sessions_until_long_break() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

/// Subject labels offered by the focus stopwatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopwatchConfig {
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        StopwatchConfig {
            subjects: default_subjects(),
        }
    }
}

fn default_subjects() -> Vec<String> {
    [
        "Mathematics",
        "Physics",
        "Chemistry",
        "Computer Science",
        "Engineering Graphics",
        "English",
        "Environmental Science",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Named color overrides (hex strings like "#FF4444")
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.timer.work_minutes, 25);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.timer.long_break_minutes, 15);
        assert_eq!(config.timer.sessions_until_long_break, 4);
        assert!(config.timer.sound);
        assert_eq!(config.stopwatch.subjects.len(), 7);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[timer]
work_minutes = 50

[stopwatch]
subjects = ["Algorithms"]
"#,
        )
        .unwrap();
        assert_eq!(config.timer.work_minutes, 50);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.stopwatch.subjects, vec!["Algorithms"]);
    }
}
