use crate::CalendarDb;
use crate::error::Result;
use crate::helpers::row_to_store_item;
use crate::types::StoreItem;

impl CalendarDb {
    /// Every item with its calendar title, latest end first.
    pub fn list_items(&self) -> Result<Vec<StoreItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.title, ci.summary, ci.start_date, ci.end_date
            FROM CalendarItem ci
            INNER JOIN Calendar c ON ci.calendar_id = c.ROWID
            ORDER BY ci.end_date DESC
            "#,
        )?;
        let rows = stmt.query_map([], row_to_store_item)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn calendar_titles(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT title
            FROM Calendar
            WHERE title IS NOT NULL
            ORDER BY title
            "#,
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
