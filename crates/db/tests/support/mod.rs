#![allow(dead_code)]

use std::path::PathBuf;

use rusqlite::{Connection, params};
use tempfile::TempDir;

pub const SCHEMA: &str = r#"
CREATE TABLE Calendar (
  ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
  title TEXT
);
CREATE TABLE CalendarItem (
  ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
  calendar_id INTEGER,
  summary TEXT,
  start_date REAL,
  end_date REAL
);
"#;

pub struct TestStore {
    pub _dir: TempDir,
    pub conn: Connection,
    pub path: PathBuf,
}

pub fn setup_store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("Calendar.sqlitedb");
    let conn = Connection::open(&path).expect("create store");
    conn.execute_batch(SCHEMA).expect("create schema");
    TestStore {
        _dir: dir,
        conn,
        path,
    }
}

pub fn insert_calendar(conn: &Connection, title: Option<&str>) -> i64 {
    conn.execute("INSERT INTO Calendar (title) VALUES (?1)", params![title])
        .expect("insert calendar");
    conn.last_insert_rowid()
}

pub fn insert_item(
    conn: &Connection,
    calendar_id: i64,
    summary: Option<&str>,
    start_date: f64,
    end_date: f64,
) {
    conn.execute(
        "INSERT INTO CalendarItem (calendar_id, summary, start_date, end_date) VALUES (?1, ?2, ?3, ?4)",
        params![calendar_id, summary, start_date, end_date],
    )
    .expect("insert item");
}
