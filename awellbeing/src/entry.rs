//! Daily self-reported check-ins.
//!
//! ```rust
//! use awellbeing::{WellbeingEntry, WellbeingErrorKind};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
//! let entry = WellbeingEntry::new("student_123", date, 7, 4, 6).expect("in range");
//! assert_eq!(entry.mood, 7);
//!
//! let error = WellbeingEntry::new("student_123", date, 11, 4, 6).expect_err("mood too high");
//! assert_eq!(error.kind, WellbeingErrorKind::InvalidEntry);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::WellbeingError;

pub const METRIC_MIN: u8 = 0;
pub const METRIC_MAX: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellbeingEntry {
    pub user_id: String,
    pub date: NaiveDate,
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
}

impl WellbeingEntry {
    pub fn new(
        user_id: impl Into<String>,
        date: NaiveDate,
        mood: u8,
        stress: u8,
        sleep: u8,
    ) -> Result<Self, WellbeingError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(WellbeingError::invalid_entry("user_id must not be empty"));
        }

        for (name, value) in [("mood", mood), ("stress", stress), ("sleep", sleep)] {
            if !(METRIC_MIN..=METRIC_MAX).contains(&value) {
                return Err(WellbeingError::invalid_entry(format!(
                    "{name} must be between {METRIC_MIN} and {METRIC_MAX}, got {value}"
                )));
            }
        }

        Ok(Self {
            user_id,
            date,
            mood,
            stress,
            sleep,
        })
    }

    pub(crate) fn to_record(&self) -> DailyRecord {
        DailyRecord {
            date: self.date,
            mood: self.mood,
            stress: self.stress,
            sleep: self.sleep,
        }
    }
}

/// One entry as stored under its user id in the local data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
}

impl DailyRecord {
    pub(crate) fn into_entry(self, user_id: &str) -> WellbeingEntry {
        WellbeingEntry {
            user_id: user_id.to_string(),
            date: self.date,
            mood: self.mood,
            stress: self.stress,
            sleep: self.sleep,
        }
    }
}

/// Wire shape of `POST /api/entries`. `date` defaults to today when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub user_id: String,
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl NewEntry {
    pub fn into_entry(self, today: NaiveDate) -> Result<WellbeingEntry, WellbeingError> {
        WellbeingEntry::new(
            self.user_id,
            self.date.unwrap_or(today),
            self.mood,
            self.stress,
            self.sleep,
        )
    }
}

impl From<&WellbeingEntry> for NewEntry {
    fn from(value: &WellbeingEntry) -> Self {
        Self {
            user_id: value.user_id.clone(),
            mood: value.mood,
            stress: value.stress,
            sleep: value.sleep,
            date: Some(value.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(WellbeingEntry::new("u", date(1), 0, 0, 0).is_ok());
        assert!(WellbeingEntry::new("u", date(1), 10, 10, 10).is_ok());
        assert!(WellbeingEntry::new("u", date(1), 10, 11, 10).is_err());
        assert!(WellbeingEntry::new(" ", date(1), 5, 5, 5).is_err());
    }

    #[test]
    fn new_entry_defaults_date_to_today() {
        let payload: NewEntry =
            serde_json::from_str(r#"{"user_id":"student_123","mood":6,"stress":3,"sleep":8}"#)
                .expect("payload should parse");
        let entry = payload.into_entry(date(9)).expect("entry is valid");
        assert_eq!(entry.date, date(9));
    }

    #[test]
    fn daily_record_serializes_with_iso_date() {
        let entry = WellbeingEntry::new("u", date(5), 1, 2, 3).expect("valid");
        let json = serde_json::to_value(entry.to_record()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"date": "2024-03-05", "mood": 1, "stress": 2, "sleep": 3})
        );
    }
}
