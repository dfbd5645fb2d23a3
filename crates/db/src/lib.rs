mod error;
mod helpers;
mod items;
mod types;

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

pub use error::{DbError, Result};
pub use types::StoreItem;

/// Read-only handle on a calendar application's SQLite store.
pub struct CalendarDb {
    conn: Connection,
}

impl CalendarDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }
}
