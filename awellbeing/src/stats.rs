//! Dashboard statistics: latest check-in and ISO-week averages.
//!
//! ```rust
//! use awellbeing::{UserStats, WellbeingEntry};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date");
//! let entries = vec![
//!     WellbeingEntry::new("u", day(15), 6, 4, 7).expect("valid"),
//!     WellbeingEntry::new("u", day(16), 7, 5, 8).expect("valid"),
//! ];
//!
//! let stats = UserStats::from_entries(&entries);
//! assert_eq!(stats.latest.mood, 7);
//! assert_eq!(stats.series[0].week, "2024-W03");
//! assert_eq!(stats.series[0].mood, 6.5);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::WellbeingEntry;

/// Raw values of one check-in, serialized as integers (`6`, not `6.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatestMetrics {
    pub mood: u8,
    pub stress: u8,
    pub sleep: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverage {
    pub week: String,
    #[serde(rename = "Mood")]
    pub mood: f64,
    #[serde(rename = "Stress")]
    pub stress: f64,
    #[serde(rename = "Sleep")]
    pub sleep: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub latest: LatestMetrics,
    pub series: Vec<WeeklyAverage>,
}

impl UserStats {
    /// `latest` is the last entry in the given order, or zeros when there is none.
    pub fn from_entries(entries: &[WellbeingEntry]) -> Self {
        let latest = entries
            .last()
            .map(|entry| LatestMetrics {
                mood: entry.mood,
                stress: entry.stress,
                sleep: entry.sleep,
            })
            .unwrap_or_default();

        Self {
            latest,
            series: aggregate_weekly(entries),
        }
    }
}

/// ISO week key such as `2024-W03`; the year is the ISO week-based year.
pub fn week_key(entry: &WellbeingEntry) -> String {
    entry.date.format("%G-W%V").to_string()
}

/// Mean of each metric per ISO week, rounded to two decimals, ordered by week.
pub fn aggregate_weekly(entries: &[WellbeingEntry]) -> Vec<WeeklyAverage> {
    #[derive(Default)]
    struct Totals {
        mood: f64,
        stress: f64,
        sleep: f64,
        count: u32,
    }

    let mut weeks = BTreeMap::<String, Totals>::new();
    for entry in entries {
        let totals = weeks.entry(week_key(entry)).or_default();
        totals.mood += f64::from(entry.mood);
        totals.stress += f64::from(entry.stress);
        totals.sleep += f64::from(entry.sleep);
        totals.count += 1;
    }

    weeks
        .into_iter()
        .map(|(week, totals)| {
            let count = f64::from(totals.count);
            WeeklyAverage {
                week,
                mood: round2(totals.mood / count),
                stress: round2(totals.stress / count),
                sleep: round2(totals.sleep / count),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(year: i32, month: u32, day: u32, mood: u8, stress: u8, sleep: u8) -> WellbeingEntry {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
        WellbeingEntry::new("student_123", date, mood, stress, sleep).expect("valid entry")
    }

    #[test]
    fn averages_are_rounded_to_two_decimals() {
        let entries = vec![
            entry(2024, 3, 4, 5, 2, 7),
            entry(2024, 3, 5, 6, 3, 7),
            entry(2024, 3, 6, 6, 3, 8),
        ];

        let series = aggregate_weekly(&entries);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].week, "2024-W10");
        assert_eq!(series[0].mood, 5.67);
        assert_eq!(series[0].stress, 2.67);
        assert_eq!(series[0].sleep, 7.33);
    }

    #[test]
    fn iso_week_year_crosses_calendar_year_boundary() {
        let entries = vec![
            entry(2024, 12, 30, 4, 4, 4),
            entry(2025, 1, 2, 6, 6, 6),
            entry(2021, 1, 1, 8, 8, 8),
        ];

        let series = aggregate_weekly(&entries);
        let weeks = series
            .iter()
            .map(|row| row.week.as_str())
            .collect::<Vec<_>>();
        assert_eq!(weeks, vec!["2020-W53", "2025-W01"]);
        assert_eq!(series[1].mood, 5.0);
    }

    #[test]
    fn empty_history_yields_zero_latest_and_no_series() {
        let stats = UserStats::from_entries(&[]);
        assert_eq!(stats.latest, LatestMetrics::default());
        assert!(stats.series.is_empty());
    }

    #[test]
    fn latest_follows_insertion_order_not_date_order() {
        let entries = vec![entry(2024, 5, 10, 9, 1, 9), entry(2024, 5, 1, 2, 8, 3)];
        let stats = UserStats::from_entries(&entries);
        assert_eq!(stats.latest.mood, 2);
        assert_eq!(stats.series.len(), 2);
    }

    #[test]
    fn latest_is_integral_and_series_uses_capitalized_names() {
        let stats = UserStats::from_entries(&[entry(2024, 1, 15, 6, 4, 7)]);
        let json = serde_json::to_value(&stats).expect("serialize");
        assert!(json["latest"]["mood"].is_u64());
        assert_eq!(
            json,
            serde_json::json!({
                "latest": {"mood": 6, "stress": 4, "sleep": 7},
                "series": [{"week": "2024-W03", "Mood": 6.0, "Stress": 4.0, "Sleep": 7.0}]
            })
        );
    }
}
