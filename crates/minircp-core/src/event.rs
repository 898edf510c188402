// Domain entity types for badge events
//
// These are DB-agnostic types used by the parser, the analytics engines and
// the storage layer alike.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One badge scan as read from the events file.
///
/// Immutable once created; becomes a [`PersistedEvent`] on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Local clock time of the scan, second precision
    pub time: NaiveTime,
    /// Calendar day of the scan
    pub date: NaiveDate,
    pub name: String,
    pub surname: String,
    /// Physical reader point that produced the scan
    pub id_point: i64,
}

/// A stored badge scan with its auto-assigned row id.
///
/// Never updated or deleted after insertion; archiving removes only the
/// source file, not stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEvent {
    pub id: i64,
    pub time: NaiveTime,
    pub date: NaiveDate,
    pub name: String,
    pub surname: String,
    pub id_point: i64,
}

impl PersistedEvent {
    /// The person this scan belongs to
    pub fn person(&self) -> Person {
        Person {
            name: self.name.clone(),
            surname: self.surname.clone(),
        }
    }

    /// Date and time of the scan combined
    pub fn timestamp(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date, self.time)
    }
}

/// A badge holder, identified structurally by the (name, surname) pair.
///
/// There is no stable numeric identity: two people sharing a full name are
/// indistinguishable. This is a known limitation carried over from the badge
/// export format. All analytics traffic in `Person` values, so a stable
/// identifier from the HR directory can replace the pair in this one type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Person {
    pub name: String,
    pub surname: String,
}

impl Person {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

/// Classification of reader points into entry and exit sets.
///
/// Membership is a join against configuration, not an intrinsic property of
/// an event. A point present in neither set is unknown and its events are
/// dropped at ingestion.
#[derive(Debug, Clone, Default)]
pub struct PointClassifier {
    in_ids: HashSet<i64>,
    out_ids: HashSet<i64>,
}

impl PointClassifier {
    pub fn new(in_ids: impl IntoIterator<Item = i64>, out_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            in_ids: in_ids.into_iter().collect(),
            out_ids: out_ids.into_iter().collect(),
        }
    }

    /// Is this an entry reader?
    pub fn is_in(&self, id_point: i64) -> bool {
        self.in_ids.contains(&id_point)
    }

    /// Is this an exit reader?
    pub fn is_out(&self, id_point: i64) -> bool {
        self.out_ids.contains(&id_point)
    }

    /// Is this point in the configured union of entry and exit readers?
    pub fn is_known(&self, id_point: i64) -> bool {
        self.is_in(id_point) || self.is_out(id_point)
    }

    /// Second parser stage: keep only records from configured reader points.
    pub fn filter_known(&self, records: Vec<EventRecord>) -> Vec<EventRecord> {
        let total = records.len();
        let kept: Vec<EventRecord> = records
            .into_iter()
            .filter(|r| self.is_known(r.id_point))
            .collect();
        tracing::debug!(total, kept = kept.len(), "filtered events to configured reader points");
        kept
    }
}
