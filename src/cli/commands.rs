use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sy", about = concat!("[=] syllabus v", env!("CARGO_PKG_VERSION"), " - your studies in plain view"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory with default config and sample data
    Init,
    /// List subjects with their progress
    Subjects,
    /// List chapters of a subject
    Chapters(ChaptersArgs),
    /// List topics of a chapter
    Topics(TopicsArgs),
    /// Add a subject
    AddSubject(AddSubjectArgs),
    /// Add a chapter under a subject
    AddChapter(AddChapterArgs),
    /// Add a topic under a chapter
    AddTopic(AddTopicArgs),
    /// Mark a topic complete
    Complete(TopicPathArgs),
    /// Log a revision of a topic
    Revise(TopicPathArgs),
    /// Rewrite fields of a topic
    UpdateTopic(UpdateTopicArgs),
    /// Show study statistics
    Stats,
    /// Show the stopwatch session log and totals
    Sessions,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ChaptersArgs {
    /// Subject id or exact name
    pub subject: String,
}

#[derive(Args)]
pub struct TopicsArgs {
    /// Subject id or exact name
    pub subject: String,
    /// Chapter id or exact name
    pub chapter: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddSubjectArgs {
    /// Subject name
    pub name: String,
    /// Card color as #RRGGBB
    #[arg(long, default_value = "#3B82F6")]
    pub color: String,
}

#[derive(Args)]
pub struct AddChapterArgs {
    /// Subject id or exact name
    pub subject: String,
    /// Chapter name
    pub name: String,
}

#[derive(Args)]
pub struct AddTopicArgs {
    /// Subject id or exact name
    pub subject: String,
    /// Chapter id or exact name
    pub chapter: String,
    /// Topic name
    pub name: String,
    /// Study notes
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Low, Medium or High
    #[arg(long, default_value = "Medium")]
    pub priority: String,
    /// 1-5
    #[arg(long, default_value_t = 3)]
    pub difficulty: u8,
    /// Theory, Practical, Assignment, "Lab Work" or Revision
    #[arg(long = "mode", default_value = "Theory")]
    pub study_mode: String,
}

#[derive(Args)]
pub struct TopicPathArgs {
    /// Subject id or exact name
    pub subject: String,
    /// Chapter id or exact name
    pub chapter: String,
    /// Topic id or exact name
    pub topic: String,
}

#[derive(Args)]
pub struct UpdateTopicArgs {
    #[command(flatten)]
    pub path: TopicPathArgs,
    /// New topic name
    #[arg(long)]
    pub name: Option<String>,
    /// Replace the notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Minutes invested
    #[arg(long = "time-spent")]
    pub time_spent: Option<u32>,
    /// 1-5
    #[arg(long)]
    pub difficulty: Option<u8>,
    /// Low, Medium or High
    #[arg(long)]
    pub priority: Option<String>,
    /// Theory, Practical, Assignment, "Lab Work" or Revision
    #[arg(long = "mode")]
    pub study_mode: Option<String>,
    /// Study date as YYYY-MM-DD
    #[arg(long = "study-date")]
    pub study_date: Option<String>,
}
