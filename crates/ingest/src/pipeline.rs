use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info, warn};
use tracker_core::EventStore;
use tracker_db::CalendarDb;
use walkdir::WalkDir;

use crate::calendar_store::{AllowList, store_record};
use crate::ics::{IcsEvents, category_for_path, is_ics_path};
use crate::normalize::Normalizer;
use crate::record::{RawRecord, RecordError};
use crate::types::{IngestError, IngestIssue, IngestStats, IssueKind, Result};

/// Reads every `*.ics` file directly under `dir` into `store`.
///
/// Bad blocks and unreadable files are recorded in the returned stats; only a
/// missing or unreadable directory aborts the run.
pub fn ingest_ics_dir(
    dir: &Path,
    normalizer: &Normalizer,
    store: &mut EventStore,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();
    fs::read_dir(dir).map_err(|err| IngestError::unavailable(dir, err))?;

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let source = err
                    .path()
                    .map(|path| path.to_string_lossy().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                record_issue(&mut stats, source, IssueKind::UnreadableFile, err.to_string());
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_ics_path(path) {
            continue;
        }
        stats.files_scanned += 1;
        let source = path.to_string_lossy().to_string();
        let events = match File::open(path)
            .and_then(|file| IcsEvents::from_reader(category_for_path(path), BufReader::new(file)))
        {
            Ok(events) => events,
            Err(err) => {
                stats.files_skipped += 1;
                record_issue(&mut stats, source, IssueKind::UnreadableFile, err.to_string());
                continue;
            }
        };
        let before = stats.events_inserted;
        for block in events {
            push_record(block.map(RawRecord::from), &source, normalizer, store, &mut stats);
        }
        debug!(
            file = %source,
            events = stats.events_inserted - before,
            "ingested ics file"
        );
    }

    log_summary("ics", &stats);
    Ok(stats)
}

/// Reads allow-listed items from the calendar store at `path` into `store`.
pub fn ingest_calendar_store(
    path: &Path,
    allow_list: &AllowList,
    normalizer: &Normalizer,
    store: &mut EventStore,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();
    if !path.is_file() {
        return Err(IngestError::unavailable(path, "no such file"));
    }
    let db = CalendarDb::open(path).map_err(|err| IngestError::unavailable(path, err))?;
    if allow_list.is_empty() {
        warn!(store = %path.display(), "calendar allow-list is empty; no items will be kept");
    } else {
        let titles = db.calendar_titles()?;
        stats.unmatched_calendars = allow_list
            .names()
            .filter(|name| !titles.iter().any(|title| title == name))
            .map(str::to_string)
            .collect();
        if !stats.unmatched_calendars.is_empty() {
            warn!(
                store = %path.display(),
                calendars = ?stats.unmatched_calendars,
                "allow-listed calendars not found in store"
            );
        }
    }

    let source = path.to_string_lossy().to_string();
    for item in db.list_items()? {
        if !allow_list.allows(item.calendar.as_deref()) {
            stats.records_filtered += 1;
            continue;
        }
        push_record(
            store_record(item).map(RawRecord::from),
            &source,
            normalizer,
            store,
            &mut stats,
        );
    }

    log_summary("calendar store", &stats);
    Ok(stats)
}

fn push_record(
    record: std::result::Result<RawRecord, RecordError>,
    source: &str,
    normalizer: &Normalizer,
    store: &mut EventStore,
    stats: &mut IngestStats,
) {
    stats.records_read += 1;
    let event = match record.and_then(|record| normalizer.normalize(record)) {
        Ok(event) => event,
        Err(err) => {
            record_issue(stats, source.to_string(), err.kind(), err.to_string());
            return;
        }
    };
    if event.has_empty_label() {
        record_issue(
            stats,
            source.to_string(),
            IssueKind::EmptyLabel,
            format!("event starting {} has an empty label", event.start().to_rfc3339()),
        );
    }
    if event.duration() <= 0.0 {
        stats.non_positive_durations += 1;
        warn!(
            source = %source,
            start = %event.start().to_rfc3339(),
            end = %event.end().to_rfc3339(),
            duration = event.duration(),
            "event has non-positive duration"
        );
    }
    store.push(event);
    stats.events_inserted += 1;
}

fn record_issue(stats: &mut IngestStats, source: String, kind: IssueKind, message: String) {
    warn!(source = %source, kind = ?kind, "{}", message);
    stats.issues.push(IngestIssue {
        source,
        kind,
        message,
    });
}

fn log_summary(source_kind: &str, stats: &IngestStats) {
    info!(
        source = source_kind,
        files = stats.files_scanned,
        skipped = stats.files_skipped,
        records = stats.records_read,
        filtered = stats.records_filtered,
        events = stats.events_inserted,
        issues = stats.issues.len(),
        "ingest finished"
    );
}
