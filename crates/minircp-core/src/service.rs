// Attendance service for reporting queries
//
// Thin facade over an EventStore: fetch the contractually ordered rows, run
// the pure analytics functions. Absence of data is never an error — a day or
// month without events yields an empty result.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::{RcpError, Result};
use crate::event::{Person, PointClassifier};
use crate::presence;
use crate::timesheet::{self, TimeSpent};
use crate::traits::EventStore;

pub struct AttendanceService {
    store: Arc<dyn EventStore>,
    classifier: PointClassifier,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn EventStore>, classifier: PointClassifier) -> Self {
        Self { store, classifier }
    }

    /// People whose latest event of the day is an entry. `date` defaults to
    /// the current local calendar day.
    pub async fn on_site(&self, date: Option<NaiveDate>) -> Result<Vec<Person>> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let rows = self.store.events_on_date(date).await?;
        let present = presence::on_site(&rows, &self.classifier);
        tracing::info!(%date, on_site = present.len(), "computed on-site report");
        Ok(present)
    }

    /// Per-person minutes between first entry and last exit for one day.
    pub async fn daily_time_spent(&self, date: NaiveDate) -> Result<Vec<TimeSpent>> {
        let rows = self.store.events_on_date_ascending(date).await?;
        let spent = timesheet::daily_time_spent(&rows, &self.classifier);
        tracing::info!(%date, people = spent.len(), "computed daily time report");
        Ok(spent)
    }

    /// Per-person minutes for one calendar month, as a single span from the
    /// earliest entry to the latest exit across all days.
    pub async fn monthly_time_spent(&self, year: i32, month: u32) -> Result<Vec<TimeSpent>> {
        if !(1..=12).contains(&month) {
            return Err(RcpError::invalid_date(format!("month out of range: {month}")));
        }
        let rows = self.store.events_in_month(year, month).await?;
        let spent = timesheet::monthly_time_spent(&rows, &self.classifier);
        tracing::info!(year, month, people = spent.len(), "computed monthly time report");
        Ok(spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecord;
    use crate::memory::MemoryEventStore;
    use chrono::NaiveTime;

    fn record(name: &str, day: u32, hh: u32, mm: u32, id_point: i64) -> EventRecord {
        EventRecord {
            time: NaiveTime::from_hms_opt(hh, mm, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            name: name.to_string(),
            surname: "Kowalski".to_string(),
            id_point,
        }
    }

    #[tokio::test]
    async fn round_trip_yields_510_minutes() {
        let store = MemoryEventStore::new();
        store
            .insert_batch(&[record("Jan", 1, 8, 0, 1), record("Jan", 1, 16, 30, 2)])
            .await
            .unwrap();
        let service = AttendanceService::new(Arc::new(store), PointClassifier::new([1], [2]));

        let spent = service
            .daily_time_spent(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(spent.len(), 1);
        assert_eq!(spent[0].person, Person::new("Jan", "Kowalski"));
        assert_eq!(spent[0].minutes, 510.0);
    }

    #[tokio::test]
    async fn on_site_reflects_latest_event() {
        let store = MemoryEventStore::new();
        store
            .insert_batch(&[
                record("Jan", 1, 8, 0, 1),
                record("Anna", 1, 8, 0, 1),
                record("Anna", 1, 15, 0, 2),
            ])
            .await
            .unwrap();
        let service = AttendanceService::new(Arc::new(store), PointClassifier::new([1], [2]));

        let present = service
            .on_site(Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
            .await
            .unwrap();
        assert_eq!(present, vec![Person::new("Jan", "Kowalski")]);
    }

    #[tokio::test]
    async fn empty_day_returns_empty_result() {
        let service = AttendanceService::new(
            Arc::new(MemoryEventStore::new()),
            PointClassifier::new([1], [2]),
        );
        let spent = service
            .daily_time_spent(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .await
            .unwrap();
        assert!(spent.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_month_is_rejected() {
        let service = AttendanceService::new(
            Arc::new(MemoryEventStore::new()),
            PointClassifier::new([1], [2]),
        );
        let err = service.monthly_time_spent(2024, 13).await.unwrap_err();
        assert!(matches!(err, RcpError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn monthly_report_uses_single_span() {
        let store = MemoryEventStore::new();
        store
            .insert_batch(&[
                record("Jan", 6, 8, 0, 1),
                record("Jan", 6, 16, 0, 2),
                record("Jan", 7, 8, 0, 1),
                record("Jan", 7, 16, 0, 2),
            ])
            .await
            .unwrap();
        let service = AttendanceService::new(Arc::new(store), PointClassifier::new([1], [2]));

        let spent = service.monthly_time_spent(2024, 5).await.unwrap();
        assert_eq!(spent.len(), 1);
        assert_eq!(spent[0].minutes, 1920.0);
    }
}
