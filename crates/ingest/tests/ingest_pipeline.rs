mod support;

use std::fs;

use ingest::{
    AllowList, IngestError, IssueKind, Normalizer, ingest_calendar_store, ingest_ics_dir,
};
use support::{calendar, create_store, insert_calendar, insert_item, vevent, write_ics};
use tempfile::tempdir;
use tracker_core::{Aggregates, EventStore};

#[test]
fn ingest_ics_dir_reads_one_category_per_file() {
    let dir = tempdir().expect("temp dir");
    write_ics(
        dir.path(),
        "Work.ics",
        &calendar(&[
            vevent("20240115T090000", "20240115T103000", "Meeting:Standup"),
            vevent("20240116T130000", "20240116T160000", "Focus"),
        ]),
    );
    write_ics(
        dir.path(),
        "Home.ics",
        &calendar(&[vevent("20240120T100000", "20240120T110000", "Chores:Laundry")]),
    );
    fs::write(dir.path().join("notes.txt"), "BEGIN:VEVENT\n").expect("write txt");

    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.events_inserted, 3);
    assert!(stats.issues.is_empty());

    // Files are visited in name order, so Home comes first.
    let events = store.events();
    assert_eq!(events[0].category(), "Home");
    assert_eq!(events[0].subcategory(), "Chores");
    assert_eq!(events[0].name(), "Laundry");
    assert_eq!(events[1].category(), "Work");
    assert_eq!(events[1].duration(), 1.5);
    assert_eq!(events[2].subcategory(), "Focus");
    assert_eq!(events[2].name(), "Focus");
}

#[test]
fn malformed_block_is_skipped_and_later_files_still_load() {
    let dir = tempdir().expect("temp dir");
    let broken = "BEGIN:VEVENT\r\nDTSTART:20240102T090000\r\nSUMMARY:Broken\r\nEND:VEVENT\r\n".to_string();
    write_ics(
        dir.path(),
        "a.ics",
        &calendar(&[
            vevent("20240101T090000", "20240101T100000", "Good"),
            broken,
        ]),
    );
    write_ics(
        dir.path(),
        "b.ics",
        &calendar(&[vevent("20240103T090000", "20240103T093000", "Later")]),
    );

    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(store.len(), 2);
    assert_eq!(store.events()[0].subcategory(), "Good");
    assert_eq!(store.events()[1].category(), "b");
    assert_eq!(stats.records_read, 3);
    assert_eq!(stats.issues_of(IssueKind::MalformedBlock), 1);
}

#[test]
fn invalid_timestamp_is_reported_and_skipped() {
    let dir = tempdir().expect("temp dir");
    write_ics(
        dir.path(),
        "Work.ics",
        &calendar(&[
            vevent("20240101", "20240102", "All day"),
            vevent("20240101T090000", "20240101T100000", "Timed"),
        ]),
    );
    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(store.len(), 1);
    assert_eq!(stats.issues_of(IssueKind::InvalidTimestamp), 1);
}

#[test]
fn empty_label_and_negative_duration_are_kept() {
    let dir = tempdir().expect("temp dir");
    write_ics(
        dir.path(),
        "Work.ics",
        &calendar(&[
            vevent("20240101T090000", "20240101T100000", ""),
            vevent("20240101T120000", "20240101T110000", "Backwards"),
        ]),
    );
    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(store.len(), 2);
    assert_eq!(stats.issues_of(IssueKind::EmptyLabel), 1);
    assert_eq!(stats.non_positive_durations, 1);
    assert!(store.total_duration().abs() < 1e-9);
}

#[test]
fn unreadable_file_does_not_abort_directory() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("bad.ics"), [0xff, 0xfe, b'\n']).expect("write bad");
    write_ics(
        dir.path(),
        "good.ics",
        &calendar(&[vevent("20240101T090000", "20240101T100000", "Fine")]),
    );
    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(store.len(), 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.issues_of(IssueKind::UnreadableFile), 1);
}

#[test]
fn missing_ics_dir_is_source_unavailable() {
    let dir = tempdir().expect("temp dir");
    let mut store = EventStore::new();
    let result = ingest_ics_dir(
        &dir.path().join("missing"),
        &Normalizer::default(),
        &mut store,
    );
    assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
    assert!(store.is_empty());
}

#[test]
fn repeated_ingest_gives_identical_aggregates() {
    let dir = tempdir().expect("temp dir");
    write_ics(
        dir.path(),
        "Work.ics",
        &calendar(&[
            vevent("20240131T230000", "20240201T010000", "Deploy:Release"),
            vevent("20240205T090000", "20240205T100000", "Meeting:Sync"),
            vevent("20240205T090000", "20240205T100000", "Meeting:Sync"),
        ]),
    );
    let run = || {
        let mut store = EventStore::new();
        ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
        Aggregates::from_store(&store)
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.by_month[0].year_month, "202401");
    assert!((first.by_month[0].duration - 2.0).abs() < 1e-9);
    assert!((first.by_subcategory[0].duration - 2.0).abs() < 1e-9);
    assert!((first.total_duration() - 4.0).abs() < 1e-9);
}

#[test]
fn indented_ics_file_still_yields_events() {
    let dir = tempdir().expect("temp dir");
    let indented: String = calendar(&[vevent("20240115T090000", "20240115T103000", "Meeting:Standup")])
        .lines()
        .map(|line| {
            if line.contains("VCALENDAR") {
                format!("{line}\n")
            } else {
                format!("    {line}\n")
            }
        })
        .collect();
    write_ics(dir.path(), "Work.ics", &indented);

    let mut store = EventStore::new();
    let stats = ingest_ics_dir(dir.path(), &Normalizer::default(), &mut store).expect("ingest");
    assert_eq!(stats.events_inserted, 1);
    assert!(stats.issues.is_empty());
    assert_eq!(store.events()[0].subcategory(), "Meeting");
    assert_eq!(store.events()[0].name(), "Standup");
    assert_eq!(store.events()[0].duration(), 1.5);
}

#[test]
fn calendar_store_keeps_only_allow_listed_calendars() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("Calendar.sqlitedb");
    let conn = create_store(&path);
    let work = insert_calendar(&conn, "Work");
    let personal = insert_calendar(&conn, "Personal");
    insert_item(&conn, work, "Meeting:Standup", 0.0, 1800.0);
    insert_item(&conn, personal, "Gym", 3600.0, 7200.0);
    insert_item(&conn, work, "Focus", 7200.0, 14400.0);

    let mut store = EventStore::new();
    let stats = ingest_calendar_store(
        &path,
        &AllowList::new(["Work"]),
        &Normalizer::default(),
        &mut store,
    )
    .expect("ingest");
    assert_eq!(stats.records_filtered, 1);
    assert_eq!(stats.events_inserted, 2);
    assert!(stats.unmatched_calendars.is_empty());
    assert!(store.iter().all(|event| event.category() == "Work"));

    // Latest end first.
    assert_eq!(store.events()[0].subcategory(), "Focus");
    assert_eq!(
        store.events()[1].start().to_rfc3339(),
        "2001-01-01T09:00:00+09:00"
    );

    let aggregates = Aggregates::from_store(&store);
    assert!(
        aggregates
            .by_subcategory
            .iter()
            .all(|row| row.subcategory != "Gym")
    );
    assert!((aggregates.total_duration() - 2.5).abs() < 1e-9);
}

#[test]
fn allow_list_entries_missing_from_store_are_reported() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("Calendar.sqlitedb");
    let conn = create_store(&path);
    let work = insert_calendar(&conn, "Work");
    insert_item(&conn, work, "Focus", 0.0, 3600.0);

    let mut store = EventStore::new();
    let stats = ingest_calendar_store(
        &path,
        &AllowList::parse("Work, Wrok, Side Project"),
        &Normalizer::default(),
        &mut store,
    )
    .expect("ingest");
    assert_eq!(stats.events_inserted, 1);
    assert_eq!(
        stats.unmatched_calendars,
        vec!["Side Project".to_string(), "Wrok".to_string()]
    );
}

#[test]
fn missing_calendar_store_is_source_unavailable() {
    let dir = tempdir().expect("temp dir");
    let mut store = EventStore::new();
    let result = ingest_calendar_store(
        &dir.path().join("missing.sqlitedb"),
        &AllowList::new(["Work"]),
        &Normalizer::default(),
        &mut store,
    );
    assert!(matches!(result, Err(IngestError::SourceUnavailable { .. })));
}

#[test]
fn calendar_store_without_schema_fails() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("other.sqlitedb");
    rusqlite::Connection::open(&path)
        .expect("create")
        .execute_batch("CREATE TABLE unrelated (id INTEGER);")
        .expect("schema");
    let mut store = EventStore::new();
    let result = ingest_calendar_store(
        &path,
        &AllowList::new(["Work"]),
        &Normalizer::default(),
        &mut store,
    );
    assert!(matches!(result, Err(IngestError::Db(_))));
}
