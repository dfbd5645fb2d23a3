mod calendar_store;
mod ics;
mod normalize;
mod pipeline;
mod record;
mod types;

pub use calendar_store::{AllowList, STORE_EPOCH_OFFSET_SECS, store_record, store_seconds_to_unix};
pub use ics::{
    BEGIN_EVENT, ContentLine, END_EVENT, IcsEvents, category_for_path, parse_property,
    read_content_lines, unescape_text,
};
pub use normalize::{
    COMPACT_TIMESTAMP_FORMAT, DEFAULT_STORE_UTC_OFFSET_HOURS, Normalizer, offset_from_hours,
    parse_compact_timestamp,
};
pub use pipeline::{ingest_calendar_store, ingest_ics_dir};
pub use record::{FileRecord, RawRecord, RecordError, StoreRecord};
pub use types::{IngestError, IngestIssue, IngestStats, IssueKind, Result};
