//! Local JSON file keyed by user id.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use acommon::BoxFuture;

use crate::entry::DailyRecord;
use crate::{UserStats, WellbeingEntry, WellbeingError, WellbeingStore};

type UserRecords = BTreeMap<String, Vec<DailyRecord>>;

/// A missing file reads as empty; the file and its parent directories are
/// created on first write.
#[derive(Debug)]
pub struct FileWellbeingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileWellbeingStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries for `user_id` in insertion order.
    pub fn entries(&self, user_id: &str) -> Result<Vec<WellbeingEntry>, WellbeingError> {
        let _guard = self.guard()?;
        self.entries_unlocked(user_id)
    }

    fn entries_unlocked(&self, user_id: &str) -> Result<Vec<WellbeingEntry>, WellbeingError> {
        Ok(self
            .load()?
            .remove(user_id)
            .unwrap_or_default()
            .into_iter()
            .map(|record| record.into_entry(user_id))
            .collect())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, WellbeingError> {
        self.lock
            .lock()
            .map_err(|_| WellbeingError::storage("wellbeing file lock poisoned"))
    }

    fn load(&self) -> Result<UserRecords, WellbeingError> {
        if !self.path.exists() {
            return Ok(UserRecords::new());
        }

        let bytes = fs::read(&self.path).map_err(|error| {
            WellbeingError::storage(format!(
                "failed to read {}: {error}",
                self.path.display()
            ))
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(UserRecords::new());
        }

        serde_json::from_slice(&bytes).map_err(|error| {
            WellbeingError::storage(format!(
                "failed to parse {}: {error}",
                self.path.display()
            ))
        })
    }

    fn save(&self, records: &UserRecords) -> Result<(), WellbeingError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|error| {
            WellbeingError::storage(format!("failed to serialize wellbeing data: {error}"))
        })?;
        write_atomic(&self.path, &bytes)
    }
}

impl WellbeingStore for FileWellbeingStore {
    fn stats<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserStats, WellbeingError>> {
        Box::pin(async move {
            let entries = self.entries(user_id)?;
            Ok(UserStats::from_entries(&entries))
        })
    }

    fn record<'a>(&'a self, entry: WellbeingEntry) -> BoxFuture<'a, Result<(), WellbeingError>> {
        Box::pin(async move {
            let _guard = self.guard()?;
            let mut records = self.load()?;
            records
                .entry(entry.user_id.clone())
                .or_default()
                .push(entry.to_record());
            self.save(&records)
        })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WellbeingError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            WellbeingError::storage(format!("failed to create parent directory: {error}"))
        })?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        WellbeingError::storage(format!("failed to write temporary data file: {error}"))
    })?;

    fs::rename(&tmp, path)
        .map_err(|error| WellbeingError::storage(format!("failed to finalize data file: {error}")))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::WellbeingErrorKind;

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("awellbeing-{prefix}-{unique}"))
    }

    fn entry(user: &str, day: u32, mood: u8) -> WellbeingEntry {
        let date = NaiveDate::from_ymd_opt(2024, 2, day).expect("valid date");
        WellbeingEntry::new(user, date, mood, 3, 7).expect("valid entry")
    }

    #[tokio::test]
    async fn missing_file_reads_as_no_data() {
        let store = FileWellbeingStore::new(temp_dir("missing").join("user_stats.json"));
        let stats = store.stats("student_123").await.expect("stats");
        assert_eq!(stats, UserStats::default());
    }

    #[tokio::test]
    async fn record_creates_parents_and_round_trips_per_user() {
        let root = temp_dir("roundtrip");
        let path = root.join("nested").join("user_stats.json");
        let store = FileWellbeingStore::new(&path);

        store.record(entry("alice", 5, 6)).await.expect("record");
        store.record(entry("alice", 6, 8)).await.expect("record");
        store.record(entry("bob", 6, 2)).await.expect("record");

        let alice = store.entries("alice").expect("entries");
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[1].mood, 8);

        let stats = store.stats("bob").await.expect("stats");
        assert_eq!(stats.latest.mood, 2);

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).expect("file exists")).expect("valid json");
        assert_eq!(
            raw["alice"][0],
            serde_json::json!({"date": "2024-02-05", "mood": 6, "stress": 3, "sleep": 7})
        );
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let root = temp_dir("corrupt");
        fs::create_dir_all(&root).expect("dir");
        let path = root.join("user_stats.json");
        fs::write(&path, "{not json").expect("write");

        let store = FileWellbeingStore::new(&path);
        let error = store.stats("alice").await.expect_err("corrupt file");
        assert_eq!(error.kind, WellbeingErrorKind::Storage);

        let _ = fs::remove_dir_all(root);
    }
}
