//! Wellbeing check-ins and the statistics behind the dashboard.
//!
//! ```rust
//! use awellbeing::{DataSource, FileWellbeingStore};
//!
//! let store = FileWellbeingStore::new("data/user_stats.json");
//! assert!(store.path().ends_with("user_stats.json"));
//! assert_eq!(DataSource::Local.as_str(), "local");
//! ```

mod entry;
mod error;
mod fallback;
mod file;
mod http;
mod stats;
mod store;

pub mod prelude {
    pub use crate::{
        DataSource, FallbackWellbeingStore, FileWellbeingStore, HttpWellbeingStore, NewEntry,
        UserStats, WeeklyAverage, WellbeingEntry, WellbeingError, WellbeingErrorKind,
        WellbeingStore,
    };
}

pub use entry::{DailyRecord, METRIC_MAX, METRIC_MIN, NewEntry, WellbeingEntry};
pub use error::{WellbeingError, WellbeingErrorKind};
pub use fallback::FallbackWellbeingStore;
pub use file::FileWellbeingStore;
pub use http::{DEFAULT_API_TIMEOUT, HttpWellbeingStore};
pub use stats::{LatestMetrics, UserStats, WeeklyAverage, aggregate_weekly, week_key};
pub use store::{DataSource, WellbeingStore};
