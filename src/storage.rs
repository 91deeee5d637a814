use crate::errors::SurveyError;
use crate::models::{Record, Submission, SurveyData, TallyEntry};
use crate::tally;
use chrono::{Local, NaiveDateTime};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{debug, error, info};

pub const STORAGE_KEY: &str = "workSurveyData";
pub const MAX_ANSWER_CHARS: usize = 500;

/// String key-value storage holding whole serialized blobs.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Keeps each key in its own `<key>.json` file under a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes to `<key>.json.tmp` and renames it into place, so a failed
    /// write leaves the previous blob intact.
    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        if let Err(err) = fs::write(&staging, value) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        fs::rename(&staging, &path)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Append-only log of answers, persisted as one blob under a single key.
#[derive(Clone)]
pub struct ResponseStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl ResponseStore {
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Reads the whole store. A missing blob is an empty store.
    pub fn load(&self) -> Result<SurveyData, SurveyError> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(SurveyData::default()),
        }
    }

    fn load_or_empty(&self) -> SurveyData {
        match self.load() {
            Ok(data) => data,
            Err(err) => {
                error!("failed to load survey data: {err}");
                SurveyData::default()
            }
        }
    }

    pub fn append(&self, text: &str) -> Result<Submission, SurveyError> {
        self.append_at(text, Local::now().naive_local())
    }

    /// Validates `text` and files it under the day of `now`.
    ///
    /// The store is left untouched when validation fails. A blob that
    /// cannot be parsed is never overwritten.
    pub fn append_at(&self, text: &str, now: NaiveDateTime) -> Result<Submission, SurveyError> {
        let answer = validate_answer(text)?;
        let mut data = self.load()?;

        let day = now.format("%Y-%m-%d").to_string();
        let record = Record {
            time: now.format("%H:%M:%S").to_string(),
            answer: answer.to_string(),
        };
        let day_total = {
            let entries = data.days.entry(day.clone()).or_default();
            entries.push(record.clone());
            entries.len()
        };

        let payload = serde_json::to_string(&data)?;
        self.backend.set(&self.key, &payload)?;
        info!(day = %day, day_total, "stored answer");

        Ok(Submission { day, record })
    }

    /// Day keys with at least one answer, most recent first.
    pub fn list_days(&self) -> Vec<String> {
        self.load_or_empty().days.into_keys().rev().collect()
    }

    pub fn list_by_day(&self, day: &str) -> Vec<Record> {
        self.load_or_empty().days.remove(day).unwrap_or_default()
    }

    pub fn tally(&self, day: &str) -> Vec<TallyEntry> {
        tally::tally(&self.list_by_day(day))
    }
}

/// Returns the trimmed answer if it is acceptable.
pub fn validate_answer(text: &str) -> Result<&str, SurveyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        debug!("rejected empty answer");
        return Err(SurveyError::EmptyAnswer);
    }

    let len = trimmed.chars().count();
    if len > MAX_ANSWER_CHARS {
        debug!(len, "rejected oversized answer");
        return Err(SurveyError::AnswerTooLong {
            len,
            max: MAX_ANSWER_CHARS,
        });
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn memory_store() -> (Arc<MemoryBackend>, ResponseStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = ResponseStore::new(backend.clone(), STORAGE_KEY);
        (backend, store)
    }

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn append_then_list_returns_trimmed_record() {
        let (_, store) = memory_store();
        let submission = store.append_at("  Reviewing PRs \n", at(2024, 3, 4, 9)).unwrap();

        assert_eq!(submission.day, "2024-03-04");
        assert_eq!(submission.record.time, "09:30:00");

        let records = store.list_by_day("2024-03-04");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, "Reviewing PRs");
    }

    #[test]
    fn append_uses_todays_bucket() {
        let (_, store) = memory_store();
        let submission = store.append("Coffee").unwrap();
        let records = store.list_by_day(&submission.day);
        assert!(records.iter().any(|record| record.answer == "Coffee"));
    }

    #[test]
    fn records_keep_submission_order() {
        let (_, store) = memory_store();
        for text in ["first", "second", "third"] {
            store.append_at(text, at(2024, 1, 1, 8)).unwrap();
        }
        let answers: Vec<_> = store
            .list_by_day("2024-01-01")
            .into_iter()
            .map(|record| record.answer)
            .collect();
        assert_eq!(answers, ["first", "second", "third"]);
    }

    #[test]
    fn rejects_invalid_answers_without_writing() {
        let (backend, store) = memory_store();

        assert!(matches!(
            store.append_at("   \t", at(2024, 1, 1, 8)),
            Err(SurveyError::EmptyAnswer)
        ));
        let long = "x".repeat(MAX_ANSWER_CHARS + 1);
        assert!(matches!(
            store.append_at(&long, at(2024, 1, 1, 8)),
            Err(SurveyError::AnswerTooLong { len: 501, max: 500 })
        ));

        assert_eq!(backend.get(STORAGE_KEY).unwrap(), None);
        assert!(store.list_days().is_empty());
    }

    #[test]
    fn length_limit_counts_characters_after_trimming() {
        let wide = "字".repeat(MAX_ANSWER_CHARS);
        assert!(validate_answer(&format!("  {wide}  ")).is_ok());
        assert!(validate_answer(&format!("{wide}字")).is_err());
    }

    #[test]
    fn list_days_is_most_recent_first() {
        let (_, store) = memory_store();
        store.append_at("a", at(2024, 1, 2, 8)).unwrap();
        store.append_at("b", at(2024, 1, 1, 8)).unwrap();
        assert_eq!(store.list_days(), ["2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn unknown_day_is_empty() {
        let (_, store) = memory_store();
        assert!(store.list_by_day("1999-12-31").is_empty());
        assert!(store.tally("1999-12-31").is_empty());
    }

    #[test]
    fn persisted_blob_uses_day_keyed_layout() {
        let (backend, store) = memory_store();
        store.append_at("Tea", at(2024, 5, 6, 14)).unwrap();

        let raw = backend.get(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "2024-05-06": [{ "time": "14:30:00", "answer": "Tea" }] })
        );
    }

    #[test]
    fn corrupt_blob_reads_empty_but_is_not_overwritten() {
        let (backend, store) = memory_store();
        backend.set(STORAGE_KEY, "{not json").unwrap();

        assert!(store.list_days().is_empty());
        assert!(matches!(
            store.append_at("Tea", at(2024, 5, 6, 14)),
            Err(SurveyError::Corrupt(_))
        ));
        assert_eq!(backend.get(STORAGE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    fn unique_dir(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("daily_survey_{label}_{}_{}", std::process::id(), nanos));
        dir
    }

    #[test]
    fn file_backend_persists_across_instances() {
        let dir = unique_dir("store");

        let first = ResponseStore::new(Arc::new(FileBackend::new(&dir)), STORAGE_KEY);
        first.append_at("Coffee", at(2024, 1, 1, 8)).unwrap();

        let second = ResponseStore::new(Arc::new(FileBackend::new(&dir)), STORAGE_KEY);
        assert_eq!(second.list_days(), ["2024-01-01"]);
        assert!(dir.join("workSurveyData.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_write_keeps_previous_blob() {
        let dir = unique_dir("failed_write");
        let store = ResponseStore::new(Arc::new(FileBackend::new(&dir)), STORAGE_KEY);
        store.append_at("Coffee", at(2024, 1, 1, 8)).unwrap();

        // A directory in the staging slot makes the next write fail.
        let staging = dir.join("workSurveyData.json.tmp");
        fs::create_dir_all(&staging).unwrap();
        assert!(matches!(
            store.append_at("Tea", at(2024, 1, 1, 9)),
            Err(SurveyError::Io(_))
        ));

        assert!(store.load().is_ok());
        assert_eq!(store.list_by_day("2024-01-01").len(), 1);

        fs::remove_dir(&staging).unwrap();
        store.append_at("Tea", at(2024, 1, 1, 9)).unwrap();
        let answers: Vec<_> = store
            .list_by_day("2024-01-01")
            .into_iter()
            .map(|record| record.answer)
            .collect();
        assert_eq!(answers, ["Coffee", "Tea"]);
        assert!(!staging.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
