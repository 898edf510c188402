// Presence engine
//
// Works on rows ordered by person and time DESCENDING: the first row seen
// for a person in that walk is their latest event of the day, and only the
// latest event decides whether they are still on-site. The number of earlier
// in/out cycles that day is irrelevant.

use crate::event::{PersistedEvent, Person, PointClassifier};

/// People whose latest event of the day is an entry.
///
/// `rows` must be ordered by name, surname, then time descending, as
/// returned by [`crate::traits::EventStore::events_on_date`].
pub fn on_site(rows: &[PersistedEvent], classifier: &PointClassifier) -> Vec<Person> {
    let mut present = Vec::new();
    let mut current: Option<Person> = None;

    for row in rows {
        let person = row.person();
        if current.as_ref() != Some(&person) {
            if classifier.is_in(row.id_point) {
                present.push(person.clone());
            }
            current = Some(person);
        }
    }

    present
}
