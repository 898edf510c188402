// Database models (internal, converted to core types at the trait boundary)

use chrono::{NaiveDate, NaiveTime};
use minircp_core::PersistedEvent;
use sqlx::FromRow;

/// One row of the events table
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub time: NaiveTime,
    pub date: NaiveDate,
    pub name: String,
    pub surname: String,
    pub id_point: i64,
}

impl From<EventRow> for PersistedEvent {
    fn from(row: EventRow) -> Self {
        PersistedEvent {
            id: row.id,
            time: row.time,
            date: row.date,
            name: row.name,
            surname: row.surname,
            id_point: row.id_point,
        }
    }
}
