use rusqlite::Row;

use crate::types::StoreItem;

pub(crate) fn row_to_store_item(row: &Row<'_>) -> std::result::Result<StoreItem, rusqlite::Error> {
    Ok(StoreItem {
        calendar: row.get(0)?,
        summary: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
    })
}
