// SQLite storage layer with sqlx
//
// This crate provides the durable implementation of the core EventStore
// trait: one append-only events table, a transactional batch insert and the
// three ordered point queries the analytics engines consume.

pub mod event_store;
pub mod models;
pub mod repositories;

pub use event_store::DbEventStore;
pub use models::EventRow;
pub use repositories::Database;
