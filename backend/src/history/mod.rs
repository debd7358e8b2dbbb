//! Export history - persisted records of completed exports
//!
//! Each record is one JSON file in the history directory, loaded at start-up.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HistoryError, HistoryResult};
use crate::models::ExportRecord;

/// Directory where records are stored (relative to the data dir)
pub const HISTORY_SUBDIR: &str = "history";

/// Registry of export records
pub struct ExportHistory {
    /// Directory where records are stored
    history_dir: PathBuf,
    /// Loaded records (id -> record)
    records: HashMap<String, ExportRecord>,
}

impl ExportHistory {
    /// Open the registry in a directory, loading existing records from disk
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let mut history = Self {
            history_dir: PathBuf::from(dir.as_ref()),
            records: HashMap::new(),
        };
        history.load_all();
        history
    }

    /// Load all records from the history directory
    fn load_all(&mut self) {
        let entries = match fs::read_dir(&self.history_dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(record) = serde_json::from_str::<ExportRecord>(&content) {
                        self.records.insert(record.id.clone(), record);
                    }
                }
            }
        }
    }

    /// All records, newest first
    pub fn list(&self) -> Vec<&ExportRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        records
    }

    /// The most recent `n` records
    pub fn recent(&self, n: usize) -> Vec<&ExportRecord> {
        self.list().into_iter().take(n).collect()
    }

    pub fn get(&self, id: &str) -> Option<&ExportRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Persist a new record
    pub fn record(&mut self, record: ExportRecord) -> HistoryResult<()> {
        fs::create_dir_all(&self.history_dir)?;

        let path = self.history_dir.join(format!("{}.json", record.id));
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;

        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Remove a record (the exported file itself is left alone)
    pub fn delete(&mut self, id: &str) -> HistoryResult<()> {
        if self.records.remove(id).is_none() {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        let path = self.history_dir.join(format!("{}.json", id));
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::tempdir;

    #[test]
    fn test_record_and_reload() {
        let dir = tempdir().unwrap();
        {
            let mut history = ExportHistory::with_dir(dir.path());
            assert!(history.is_empty());
            history
                .record(ExportRecord::excel("a.xlsx", "/tmp/exports/a.xlsx", 3))
                .unwrap();
        }

        let history = ExportHistory::with_dir(dir.path());
        assert_eq!(history.len(), 1);
        let record = history.list()[0];
        assert_eq!(record.filename, "a.xlsx");
        assert_eq!(record.item_count, 3);
        assert!(history.get(&record.id).is_some());
    }

    #[test]
    fn test_list_newest_first() {
        let dir = tempdir().unwrap();
        let mut history = ExportHistory::with_dir(dir.path());

        let mut older = ExportRecord::excel("old.xlsx", "old.xlsx", 1);
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = ExportRecord::google("REFUND AUDIT LOG", "https://docs.google.com/spreadsheets/d/x", 2);

        history.record(older).unwrap();
        history.record(newer).unwrap();

        let names: Vec<_> = history.list().iter().map(|r| r.filename.clone()).collect();
        assert_eq!(names, vec!["REFUND AUDIT LOG", "old.xlsx"]);
        assert_eq!(history.recent(1).len(), 1);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let mut history = ExportHistory::with_dir(dir.path());
        let record = ExportRecord::excel("a.xlsx", "a.xlsx", 1);
        let id = record.id.clone();
        history.record(record).unwrap();

        history.delete(&id).unwrap();
        assert!(history.is_empty());
        assert!(matches!(history.delete(&id), Err(HistoryError::NotFound(_))));
    }
}
