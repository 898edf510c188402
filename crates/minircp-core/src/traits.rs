// Storage trait for pluggable backends

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::event::{EventRecord, PersistedEvent};

/// Durable, append-only persistence for badge events with the ordered point
/// queries the analytics engines consume.
///
/// The store is written by a single periodic ingestion cycle and read by any
/// number of concurrent reporting queries. Duplicate content is tolerated on
/// insert; rows are never updated or deleted.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a batch of records as a unit. Either every record is persisted
    /// or none are. Returns the number of rows inserted.
    async fn insert_batch(&self, records: &[EventRecord]) -> Result<u64>;

    /// All events for a day, ordered by name, surname, then time DESCENDING.
    /// The presence engine depends on this ordering.
    async fn events_on_date(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>>;

    /// All events for a day, ordered by name, surname, then time ascending.
    /// The daily time aggregator depends on this ordering.
    async fn events_on_date_ascending(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>>;

    /// All events of a calendar month, ordered by name, surname, date, then
    /// time ascending. The monthly time aggregator depends on this ordering.
    async fn events_in_month(&self, year: i32, month: u32) -> Result<Vec<PersistedEvent>>;
}
