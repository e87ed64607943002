use serde::{Deserialize, Serialize};

/// One completed stopwatch interval, attributed to a subject label.
/// Timestamps are epoch milliseconds; `duration` is milliseconds of
/// focused time (monotonic, so pauses are excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub subject: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration: u64,
}
