use std::collections::BTreeSet;

use tracker_db::StoreItem;

use crate::record::{RecordError, StoreRecord};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the store's epoch.
pub const STORE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Calendar titles whose items are kept; everything else is dropped at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated list such as `"Work, Personal"`.
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn allows(&self, calendar: Option<&str>) -> bool {
        calendar.is_some_and(|name| self.names.contains(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Store seconds (since 2001) to Unix seconds; fractions are truncated.
pub fn store_seconds_to_unix(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    (truncated as i64).checked_add(STORE_EPOCH_OFFSET_SECS)
}

/// Converts one allow-listed store item into a raw record.
pub fn store_record(item: StoreItem) -> Result<StoreRecord, RecordError> {
    let start_epoch = epoch_field("start", item.start_date)?;
    let end_epoch = epoch_field("end", item.end_date)?;
    Ok(StoreRecord {
        category: item.calendar.unwrap_or_default(),
        start_epoch,
        end_epoch,
        label: item.summary.unwrap_or_default(),
    })
}

fn epoch_field(field: &'static str, value: Option<f64>) -> Result<i64, RecordError> {
    value
        .and_then(store_seconds_to_unix)
        .ok_or_else(|| RecordError::InvalidTimestamp {
            field,
            value: value.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string()),
        })
}
