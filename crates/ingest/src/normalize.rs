use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use tracker_core::Event;

use crate::record::{FileRecord, RawRecord, RecordError, StoreRecord};

/// Compact iCalendar date-time, e.g. `20240115T090000`.
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

const SECONDS_PER_HOUR: i32 = 3600;
pub const DEFAULT_STORE_UTC_OFFSET_HOURS: i32 = 9;

/// Converts raw source records into [`Event`]s.
///
/// File timestamps carry no zone and are kept as wall-clock time labeled
/// `+00:00`. Store instants are absolute and are shifted into `store_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    store_offset: FixedOffset,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            store_offset: offset_from_hours(DEFAULT_STORE_UTC_OFFSET_HOURS)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl Normalizer {
    pub fn new(store_offset: FixedOffset) -> Self {
        Self { store_offset }
    }

    pub fn store_offset(&self) -> FixedOffset {
        self.store_offset
    }

    pub fn normalize(&self, record: RawRecord) -> Result<Event, RecordError> {
        if record.category().trim().is_empty() {
            return Err(RecordError::EmptyCategory);
        }
        match record {
            RawRecord::File(record) => self.normalize_file(record),
            RawRecord::Store(record) => self.normalize_store(record),
        }
    }

    fn normalize_file(&self, record: FileRecord) -> Result<Event, RecordError> {
        let start = file_timestamp("DTSTART", &record.start_text)?;
        let end = file_timestamp("DTEND", &record.end_text)?;
        Ok(Event::new(start, end, record.category, &record.label))
    }

    fn normalize_store(&self, record: StoreRecord) -> Result<Event, RecordError> {
        let start = self.store_instant("start", record.start_epoch)?;
        let end = self.store_instant("end", record.end_epoch)?;
        Ok(Event::new(start, end, record.category, &record.label))
    }

    fn store_instant(
        &self,
        field: &'static str,
        epoch: i64,
    ) -> Result<DateTime<FixedOffset>, RecordError> {
        DateTime::from_timestamp(epoch, 0)
            .map(|instant| instant.with_timezone(&self.store_offset))
            .ok_or_else(|| RecordError::InvalidTimestamp {
                field,
                value: epoch.to_string(),
            })
    }
}

pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(SECONDS_PER_HOUR)?)
}

/// Parses a compact date-time; a trailing `Z` is tolerated.
pub fn parse_compact_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value.strip_suffix('Z').unwrap_or(value);
    NaiveDateTime::parse_from_str(value, COMPACT_TIMESTAMP_FORMAT).ok()
}

fn file_timestamp(field: &'static str, value: &str) -> Result<DateTime<FixedOffset>, RecordError> {
    parse_compact_timestamp(value)
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| RecordError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
