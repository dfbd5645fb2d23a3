use serde::Serialize;
use std::path::PathBuf;

/// Ingest summary returned after reading a calendar source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub records_read: usize,
    pub records_filtered: usize,
    pub events_inserted: usize,
    pub non_positive_durations: usize,
    /// Allow-list entries that name no calendar in the store.
    pub unmatched_calendars: Vec<String>,
    pub issues: Vec<IngestIssue>,
}

impl IngestStats {
    pub fn issues_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}

/// Non-fatal issues encountered during ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestIssue {
    pub source: String,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    UnreadableFile,
    MalformedBlock,
    InvalidTimestamp,
    EmptyCategory,
    EmptyLabel,
}

/// Errors that abort an ingest run.
#[derive(Debug)]
pub enum IngestError {
    SourceUnavailable { path: PathBuf, reason: String },
    Db(tracker_db::DbError),
}

impl IngestError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable { path, reason } => {
                write!(f, "source unavailable: {}: {}", path.display(), reason)
            }
            Self::Db(err) => write!(f, "db error: {}", err),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<tracker_db::DbError> for IngestError {
    fn from(err: tracker_db::DbError) -> Self {
        Self::Db(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
