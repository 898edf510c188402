// Database-backed EventStore implementation
//
// Implements the core EventStore trait on top of the repository layer and
// maps sqlx failures into the core storage error.

use async_trait::async_trait;
use chrono::NaiveDate;
use minircp_core::{EventRecord, EventStore, PersistedEvent, RcpError, Result};

use crate::repositories::Database;

/// Durable SQLite-backed event store
#[derive(Clone)]
pub struct DbEventStore {
    db: Database,
}

impl DbEventStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// First calendar day of the month and of the following month, used as the
/// half-open query range.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RcpError::invalid_date(format!("{year}-{month:02}")))?;
    let to = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| RcpError::invalid_date(format!("{year}-{month:02}")))?;
    Ok((from, to))
}

#[async_trait]
impl EventStore for DbEventStore {
    async fn insert_batch(&self, records: &[EventRecord]) -> Result<u64> {
        self.db
            .insert_events(records)
            .await
            .map_err(|e| RcpError::storage(e.to_string()))
    }

    async fn events_on_date(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>> {
        let rows = self
            .db
            .events_on_date(date)
            .await
            .map_err(|e| RcpError::storage(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn events_on_date_ascending(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>> {
        let rows = self
            .db
            .events_on_date_ascending(date)
            .await
            .map_err(|e| RcpError::storage(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn events_in_month(&self, year: i32, month: u32) -> Result<Vec<PersistedEvent>> {
        let (from, to) = month_bounds(year, month)?;
        let rows = self
            .db
            .events_in_range(from, to)
            .await
            .map_err(|e| RcpError::storage(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
