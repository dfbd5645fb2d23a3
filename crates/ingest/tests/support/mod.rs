#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

pub fn vevent(start: &str, end: &str, summary: &str) -> String {
    format!(
        "BEGIN:VEVENT\r\nDTSTAMP:20240101T000000Z\r\nDTEND:{end}\r\nUID:{start}-{summary}\r\nDTSTART:{start}\r\nCREATED:20240101T000000Z\r\nLAST-MODIFIED:20240101T000000Z\r\nSUMMARY:{summary}\r\nEND:VEVENT\r\n"
    )
}

pub fn calendar(blocks: &[String]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n");
    for block in blocks {
        out.push_str(block);
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

pub fn write_ics(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write ics");
    path
}

pub fn create_store(path: &Path) -> Connection {
    let conn = Connection::open(path).expect("create store");
    conn.execute_batch(
        r#"
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
        "#,
    )
    .expect("create schema");
    conn
}

pub fn insert_calendar(conn: &Connection, title: &str) -> i64 {
    conn.execute("INSERT INTO Calendar (title) VALUES (?1)", params![title])
        .expect("insert calendar");
    conn.last_insert_rowid()
}

pub fn insert_item(conn: &Connection, calendar_id: i64, summary: &str, start: f64, end: f64) {
    conn.execute(
        "INSERT INTO CalendarItem (calendar_id, summary, start_date, end_date) VALUES (?1, ?2, ?3, ?4)",
        params![calendar_id, summary, start, end],
    )
    .expect("insert item");
}
