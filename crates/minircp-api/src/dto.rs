// Response types for the reporting API

use chrono::NaiveDate;
use minircp_core::{Person, TimeSpent};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// People currently on-site for a day
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnSiteResponse {
    pub date: NaiveDate,
    pub people: Vec<Person>,
}

/// One person's aggregated minutes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimeSpentEntry {
    pub name: String,
    pub surname: String,
    /// Fractional minutes between first entry and last exit
    pub minutes: f64,
}

impl From<TimeSpent> for TimeSpentEntry {
    fn from(spent: TimeSpent) -> Self {
        Self {
            name: spent.person.name,
            surname: spent.person.surname,
            minutes: spent.minutes,
        }
    }
}

/// Per-person minutes for one day
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub entries: Vec<TimeSpentEntry>,
}

/// Per-person minutes for one calendar month
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<TimeSpentEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_spent_flattens_person_fields() {
        let entry = TimeSpentEntry::from(TimeSpent {
            person: Person::new("Jan", "Kowalski"),
            minutes: 510.0,
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "Jan");
        assert_eq!(json["surname"], "Kowalski");
        assert_eq!(json["minutes"], 510.0);
    }
}
