use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use bankstat_core::{Month, StatementName, STATEMENT_PREFIX};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on processed log: {0}")]
    Io(#[from] std::io::Error),
    #[error("processed log at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The set of statement filenames already handled.
///
/// Not safe for concurrent writers across processes; the design assumes a
/// single scheduled invocation at a time.
pub trait ProcessedLog {
    /// Returns the persisted set. When every calendar month is represented in
    /// it and `upcoming` names a january statement, the set is cleared and
    /// persisted empty first: the once-a-year rollover.
    fn load(&self, upcoming: Option<&str>) -> Result<HashSet<String>, StoreError>;

    /// Adds a filename to the persisted set. Re-reads before writing so an
    /// externally edited log is not clobbered.
    fn record(&self, filename: &str) -> Result<(), StoreError>;
}

/// True when the processed set covers all twelve months and the next
/// candidate is a january statement.
fn rollover_due(processed: &HashSet<String>, upcoming: Option<&str>) -> bool {
    let months: HashSet<Month> = processed
        .iter()
        .filter_map(|name| StatementName::parse(name))
        .map(|stmt| stmt.month)
        .collect();
    if months.len() < Month::ALL.len() {
        return false;
    }
    let january_prefix = format!("{}_january", STATEMENT_PREFIX.to_lowercase());
    upcoming.is_some_and(|name| name.to_lowercase().starts_with(&january_prefix))
}

/// File-backed processed log: a JSON array of filename strings, read in full
/// at every `load` and rewritten in full on every mutation.
pub struct JsonFileLog {
    path: PathBuf,
}

impl JsonFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HashSet<String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashSet::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let names: Vec<String> = serde_json::from_str(&data).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(names.into_iter().collect())
    }

    fn write(&self, processed: &HashSet<String>) -> Result<(), StoreError> {
        let mut names: Vec<&String> = processed.iter().collect();
        names.sort();
        let data = serde_json::to_string(&names).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

impl ProcessedLog for JsonFileLog {
    fn load(&self, upcoming: Option<&str>) -> Result<HashSet<String>, StoreError> {
        let processed = self.read()?;
        if rollover_due(&processed, upcoming) {
            tracing::info!("all months processed; starting new year, resetting processed log");
            self.write(&HashSet::new())?;
            return Ok(HashSet::new());
        }
        Ok(processed)
    }

    fn record(&self, filename: &str) -> Result<(), StoreError> {
        let mut processed = self.read()?;
        processed.insert(filename.to_string());
        self.write(&processed)
    }
}

/// In-memory processed log with the same rollover semantics, for tests that
/// exercise the orchestrator without touching the filesystem.
#[derive(Default)]
pub struct MemoryLog {
    entries: Mutex<HashSet<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl ProcessedLog for MemoryLog {
    fn load(&self, upcoming: Option<&str>) -> Result<HashSet<String>, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        if rollover_due(&entries, upcoming) {
            entries.clear();
        }
        Ok(entries.clone())
    }

    fn record(&self, filename: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().insert(filename.to_string());
        Ok(())
    }
}
