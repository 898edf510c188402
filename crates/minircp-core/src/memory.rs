// In-memory implementation for examples and testing
//
// Keeps all events in memory and replicates the ordering contracts of the
// SQLite store, so service- and scheduler-level tests run without a database.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::event::{EventRecord, PersistedEvent};
use crate::traits::EventStore;

/// In-memory event store
#[derive(Debug, Default, Clone)]
pub struct MemoryEventStore {
    events: Arc<RwLock<Vec<PersistedEvent>>>,
}

impl MemoryEventStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether the store holds no events
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Clear all events
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }

    fn by_person(a: &PersistedEvent, b: &PersistedEvent) -> Ordering {
        a.name
            .cmp(&b.name)
            .then_with(|| a.surname.cmp(&b.surname))
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert_batch(&self, records: &[EventRecord]) -> Result<u64> {
        let mut events = self.events.write().await;
        for record in records {
            let id = events.len() as i64 + 1;
            events.push(PersistedEvent {
                id,
                time: record.time,
                date: record.date,
                name: record.name.clone(),
                surname: record.surname.clone(),
                id_point: record.id_point,
            });
        }
        Ok(records.len() as u64)
    }

    async fn events_on_date(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>> {
        let mut rows: Vec<PersistedEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();
        rows.sort_by(|a, b| Self::by_person(a, b).then_with(|| b.time.cmp(&a.time)));
        Ok(rows)
    }

    async fn events_on_date_ascending(&self, date: NaiveDate) -> Result<Vec<PersistedEvent>> {
        let mut rows: Vec<PersistedEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();
        rows.sort_by(|a, b| Self::by_person(a, b).then_with(|| a.time.cmp(&b.time)));
        Ok(rows)
    }

    async fn events_in_month(&self, year: i32, month: u32) -> Result<Vec<PersistedEvent>> {
        let mut rows: Vec<PersistedEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            Self::by_person(a, b)
                .then_with(|| a.date.cmp(&b.date))
                .then_with(|| a.time.cmp(&b.time))
        });
        Ok(rows)
    }
}
