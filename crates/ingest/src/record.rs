use thiserror::Error;

use crate::types::IssueKind;

/// A VEVENT block as read from an `.ics` file, values still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub category: String,
    pub start_text: String,
    pub end_text: String,
    pub label: String,
}

/// A calendar store item with instants already shifted to Unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    pub category: String,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub label: String,
}

/// Raw record handed from either source reader to the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    File(FileRecord),
    Store(StoreRecord),
}

impl RawRecord {
    pub fn category(&self) -> &str {
        match self {
            Self::File(record) => &record.category,
            Self::Store(record) => &record.category,
        }
    }
}

impl From<FileRecord> for RawRecord {
    fn from(record: FileRecord) -> Self {
        Self::File(record)
    }
}

impl From<StoreRecord> for RawRecord {
    fn from(record: StoreRecord) -> Self {
        Self::Store(record)
    }
}

/// Per-record failures. The offending record is skipped; the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed block at line {line}: {reason}")]
    MalformedBlock { line: usize, reason: String },
    #[error("invalid {field} timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("event has no category")]
    EmptyCategory,
}

impl RecordError {
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::MalformedBlock { .. } => IssueKind::MalformedBlock,
            Self::InvalidTimestamp { .. } => IssueKind::InvalidTimestamp,
            Self::EmptyCategory => IssueKind::EmptyCategory,
        }
    }
}
