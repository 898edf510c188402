// Repository layer for database operations

use anyhow::Result;
use chrono::NaiveDate;
use minircp_core::EventRecord;
use sqlx::SqlitePool;

use crate::models::EventRow;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the events table if it does not exist yet. Safe to call on
    /// every startup; the schema is a single append-only table.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                time TEXT NOT NULL,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                surname TEXT NOT NULL,
                id_point INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        tracing::debug!("events schema ready");
        Ok(())
    }

    // ============================================
    // Events (append-only)
    // ============================================

    /// Insert a batch of records inside one transaction. A failure rolls the
    /// whole batch back, so a retried cycle cannot double-count rows from a
    /// previous partial attempt. Duplicate content is tolerated.
    pub async fn insert_events(&self, records: &[EventRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO events (time, date, name, surname, id_point)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.time)
            .bind(record.date)
            .bind(&record.name)
            .bind(&record.surname)
            .bind(record.id_point)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(records.len() as u64)
    }

    /// All events for a day, latest event first within each person.
    pub async fn events_on_date(&self, date: NaiveDate) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, time, date, name, surname, id_point
            FROM events
            WHERE date = ?
            ORDER BY name, surname, time DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All events for a day in chronological order within each person.
    pub async fn events_on_date_ascending(&self, date: NaiveDate) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, time, date, name, surname, id_point
            FROM events
            WHERE date = ?
            ORDER BY name, surname, time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All events whose date falls inside [month_start, next_month_start).
    pub async fn events_in_range(
        &self,
        from: NaiveDate,
        to_exclusive: NaiveDate,
    ) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, time, date, name, surname, id_point
            FROM events
            WHERE date >= ? AND date < ?
            ORDER BY name, surname, date, time
            "#,
        )
        .bind(from)
        .bind(to_exclusive)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
