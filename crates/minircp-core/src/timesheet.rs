// Time-spent aggregation
//
// Daily: per person, the span between their first entry and their last exit
// within one calendar day, whatever happens in between. Monthly: one span
// per person across the whole month, from their earliest entry to their
// latest exit. The monthly rule deliberately does NOT sum daily sessions —
// it mirrors the established report semantics and is pinned by tests.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::{PersistedEvent, Person, PointClassifier};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Minutes a person spent on-site over the aggregation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeSpent {
    pub person: Person,
    /// Fractional minutes between the opening entry and the closing exit
    pub minutes: f64,
}

/// Per-person minutes for one calendar day.
///
/// `rows` must be ordered by name, surname, then time ascending, as returned
/// by [`crate::traits::EventStore::events_on_date_ascending`]. A person with
/// no entry, no exit, or an exit at or before their first entry has no
/// computable session and is omitted.
pub fn daily_time_spent(rows: &[PersistedEvent], classifier: &PointClassifier) -> Vec<TimeSpent> {
    let mut out = Vec::new();
    let mut current: Option<Person> = None;
    let mut first_in: Option<NaiveTime> = None;
    let mut last_out: Option<NaiveTime> = None;

    let close = |person: &Option<Person>,
                 first_in: Option<NaiveTime>,
                 last_out: Option<NaiveTime>,
                 out: &mut Vec<TimeSpent>| {
        if let (Some(person), Some(first_in), Some(last_out)) = (person.as_ref(), first_in, last_out)
        {
            if last_out > first_in {
                let minutes = (last_out - first_in).num_seconds() as f64 / 60.0;
                out.push(TimeSpent {
                    person: person.clone(),
                    minutes,
                });
            }
        }
    };

    for row in rows {
        let person = row.person();
        if current.as_ref() != Some(&person) {
            close(&current, first_in, last_out, &mut out);
            current = Some(person);
            first_in = None;
            last_out = None;
        }
        if classifier.is_in(row.id_point) && first_in.is_none() {
            first_in = Some(row.time);
        }
        if classifier.is_out(row.id_point) {
            last_out = Some(row.time);
        }
    }
    close(&current, first_in, last_out, &mut out);

    out
}

/// Per-person minutes for one calendar month, computed as a single span from
/// the earliest entry to the latest exit across all days combined.
///
/// `rows` must be ordered by name, surname, date, then time ascending, as
/// returned by [`crate::traits::EventStore::events_in_month`].
pub fn monthly_time_spent(rows: &[PersistedEvent], classifier: &PointClassifier) -> Vec<TimeSpent> {
    let mut out = Vec::new();
    let mut current: Option<Person> = None;
    let mut earliest_in: Option<NaiveDateTime> = None;
    let mut latest_out: Option<NaiveDateTime> = None;

    let close = |person: &Option<Person>,
                 earliest_in: Option<NaiveDateTime>,
                 latest_out: Option<NaiveDateTime>,
                 out: &mut Vec<TimeSpent>| {
        if let (Some(person), Some(earliest_in), Some(latest_out)) =
            (person.as_ref(), earliest_in, latest_out)
        {
            if latest_out > earliest_in {
                let minutes = (latest_out - earliest_in).num_seconds() as f64 / 60.0;
                out.push(TimeSpent {
                    person: person.clone(),
                    minutes,
                });
            }
        }
    };

    for row in rows {
        let person = row.person();
        if current.as_ref() != Some(&person) {
            close(&current, earliest_in, latest_out, &mut out);
            current = Some(person);
            earliest_in = None;
            latest_out = None;
        }
        let at = row.timestamp();
        if classifier.is_in(row.id_point) {
            if earliest_in.map_or(true, |e| at < e) {
                earliest_in = Some(at);
            }
        } else if classifier.is_out(row.id_point) && latest_out.map_or(true, |l| at > l) {
            latest_out = Some(at);
        }
    }
    close(&current, earliest_in, latest_out, &mut out);

    out
}
