// crates/hardness-storage/src/store.rs
//! Append-only feedback persistence.
//!
//! Rows live in one CSV file whose header is the source of truth for column
//! order. Opening a file written by an older build triggers an additive
//! migration: missing canonical columns are appended to the header and every
//! existing row is padded, never reordered or truncated. When the file cannot
//! be written at all (read-only mount, missing directory), records are kept
//! in memory for the lifetime of the process and the caller is told so.

use crate::csv;
use anyhow::{anyhow, Context, Result};
use hardness_core::error::PersistenceError;
use hardness_core::types::FeedbackRecord;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Columns every current record fills, in write order. Legacy files may
/// carry extra columns; those survive migration and stay empty in new rows.
pub const CANONICAL_COLUMNS: &[&str] = &[
    "Timestamp",
    "EmployeeId",
    "Name",
    "Email",
    "Feedback",
    "FeedbackType",
    "OffDefinitions",
    "Suggestions",
    "Account",
    "Industry",
    "ProblemStatement",
    "Agent",
];

/// Where a record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended to the CSV file on disk.
    Persisted,
    /// Disk write failed; held in memory for this process only.
    Memory,
}

/// A loaded snapshot of the feedback data: disk rows first, then any
/// memory-only rows, all aligned to `columns`.
#[derive(Debug, Clone)]
pub struct FeedbackTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FeedbackTable {
    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn value<'a>(&self, row: &'a [String], column: &str) -> Option<&'a str> {
        let idx = self.column_index(column)?;
        row.get(idx).map(String::as_str)
    }

    /// Rows whose `column` equals `value` exactly. An unknown column matches
    /// nothing rather than erroring, since legacy files vary.
    pub fn filter(&self, column: &str, value: &str) -> FeedbackTable {
        let rows = match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .filter(|row| row.get(idx).map(String::as_str) == Some(value))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        FeedbackTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn to_csv(&self) -> String {
        let mut out = csv::write_row(&self.columns);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&csv::write_row(row));
            out.push('\n');
        }
        out
    }
}

pub struct FeedbackStore {
    path: PathBuf,
    /// Serializes the read-modify-rewrite of the file within this process.
    /// Cross-process writers are not protected; that needs file locking.
    io: Mutex<()>,
    memory: Mutex<Vec<FeedbackRecord>>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FeedbackStore {
            path: path.into(),
            io: Mutex::new(()),
            memory: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. A failed disk write degrades to the in-memory
    /// buffer instead of erroring, so feedback is never silently dropped
    /// in a session on a read-only deployment.
    pub fn record(&self, record: &FeedbackRecord) -> RecordOutcome {
        let _io = self.io_guard();
        match self.append_to_disk(record) {
            Ok(()) => {
                info!("Feedback persisted to {}", self.path.display());
                RecordOutcome::Persisted
            }
            Err(e) => {
                let err = PersistenceError::WriteFailed {
                    path: self.path.display().to_string(),
                    message: format!("{:#}", e),
                };
                warn!("{}; keeping feedback in memory", err);
                self.memory_rows().push(record.clone());
                RecordOutcome::Memory
            }
        }
    }

    pub fn memory_count(&self) -> usize {
        self.memory_rows().len()
    }

    /// Load everything: disk rows (migrated to the current schema in memory,
    /// without rewriting the file) followed by memory-only rows. An
    /// unreadable file serves the memory rows alone, so feedback held by the
    /// fallback stays retrievable on deployments where the path never works.
    pub fn load_all(&self) -> Result<FeedbackTable> {
        let _io = self.io_guard();
        let mut table = match fs::read_to_string(&self.path) {
            Ok(text) => parse_table(&text)
                .map_err(|e| PersistenceError::Corrupt(e.to_string()))
                .with_context(|| format!("reading {}", self.path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => empty_table(),
            Err(e) => {
                let err = PersistenceError::ReadFailed {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                };
                warn!("{}; serving in-memory feedback only", err);
                empty_table()
            }
        };
        for column in CANONICAL_COLUMNS {
            if !table.columns.iter().any(|c| c == column) {
                table.columns.push(column.to_string());
            }
        }
        let width = table.columns.len();
        for row in &mut table.rows {
            row.resize(width, String::new());
        }
        for record in self.memory_rows().iter() {
            table.rows.push(row_for(record, &table.columns));
        }
        Ok(table)
    }

    /// Drop every stored row, on disk and in memory. The file keeps its
    /// canonical header so the next append sees a current schema.
    pub fn reset(&self) -> Result<()> {
        let _io = self.io_guard();
        let header: Vec<String> = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut contents = csv::write_row(&header);
        contents.push('\n');
        fs::write(&self.path, contents)
            .with_context(|| format!("resetting {}", self.path.display()))?;
        self.memory_rows().clear();
        info!("Feedback store reset at {}", self.path.display());
        Ok(())
    }

    fn memory_rows(&self) -> std::sync::MutexGuard<'_, Vec<FeedbackRecord>> {
        // A poisoned lock only means another thread panicked mid-push;
        // the Vec itself is still usable.
        self.memory.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn io_guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.io.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn append_to_disk(&self, record: &FeedbackRecord) -> Result<()> {
        let columns = self.ensure_schema()?;
        let mut line = csv::write_row(&row_for(record, &columns));
        line.push('\n');
        let mut existing = fs::read_to_string(&self.path)?;
        if !existing.is_empty() && !existing.ends_with('\n') {
            existing.push('\n');
        }
        existing.push_str(&line);
        fs::write(&self.path, existing).with_context(|| format!("appending {}", self.path.display()))
    }

    /// Make sure the file exists and its header covers every canonical
    /// column, rewriting it once if an older schema is found. Returns the
    /// effective column order.
    fn ensure_schema(&self) -> Result<Vec<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let header: Vec<String> =
                    CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
                let mut contents = csv::write_row(&header);
                contents.push('\n');
                fs::write(&self.path, contents)
                    .with_context(|| format!("creating {}", self.path.display()))?;
                return Ok(header);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        let mut table = parse_table(&text)?;
        let missing: Vec<&str> = CANONICAL_COLUMNS
            .iter()
            .filter(|c| !table.columns.iter().any(|have| have == *c))
            .copied()
            .collect();
        if missing.is_empty() {
            return Ok(table.columns);
        }

        info!(
            "Migrating {}: adding columns {:?}",
            self.path.display(),
            missing
        );
        for column in missing {
            table.columns.push(column.to_string());
        }
        let width = table.columns.len();
        for row in &mut table.rows {
            row.resize(width, String::new());
        }
        fs::write(&self.path, table.to_csv())
            .with_context(|| format!("migrating {}", self.path.display()))?;
        Ok(table.columns)
    }
}

fn empty_table() -> FeedbackTable {
    FeedbackTable {
        columns: CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: Vec::new(),
    }
}

fn parse_table(text: &str) -> Result<FeedbackTable> {
    let mut rows = csv::parse(text)?;
    if rows.is_empty() {
        return Ok(empty_table());
    }
    let columns = rows.remove(0);
    if columns.iter().all(|c| c.trim().is_empty()) {
        return Err(anyhow!("feedback file has an empty header row"));
    }
    Ok(FeedbackTable { columns, rows })
}

fn row_for(record: &FeedbackRecord, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| match column.as_str() {
            "Timestamp" => record.timestamp.clone(),
            "EmployeeId" => record.employee_id.clone(),
            "Name" => record.name.clone(),
            "Email" => record.email.clone(),
            "Feedback" => record.feedback.clone(),
            "FeedbackType" => record.feedback_type.to_string(),
            "OffDefinitions" => record.off_definitions.clone(),
            "Suggestions" => record.suggestions.clone(),
            "Account" => record.account.clone(),
            "Industry" => record.industry.clone(),
            "ProblemStatement" => record.problem_statement.clone(),
            "Agent" => record.agent.clone(),
            _ => String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardness_core::types::FeedbackType;
    use tempfile::TempDir;

    fn sample(agent: &str, feedback: &str) -> FeedbackRecord {
        FeedbackRecord {
            timestamp: "2025-01-15 10:30:00".to_string(),
            employee_id: "E123".to_string(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            feedback: feedback.to_string(),
            feedback_type: FeedbackType::Positive,
            off_definitions: String::new(),
            suggestions: String::new(),
            account: "Walmart".to_string(),
            industry: "Retail".to_string(),
            problem_statement: "Stockouts in produce, weekly".to_string(),
            agent: agent.to_string(),
        }
    }

    #[test]
    fn test_record_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback.csv"));

        let outcome = store.record(&sample("vocabulary", "useful, thanks"));
        assert_eq!(outcome, RecordOutcome::Persisted);

        let table = store.load_all().unwrap();
        assert_eq!(table.columns.len(), CANONICAL_COLUMNS.len());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.value(&table.rows[0], "Feedback"), Some("useful, thanks"));
        assert_eq!(table.value(&table.rows[0], "Account"), Some("Walmart"));
    }

    #[test]
    fn test_legacy_schema_is_migrated_additively() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(
            &path,
            "Timestamp,Name,Feedback,LegacyNotes\n2024-12-01 09:00:00,Old User,fine,keep me\n",
        )
        .unwrap();

        let store = FeedbackStore::new(&path);
        assert_eq!(store.record(&sample("Q1", "new row")), RecordOutcome::Persisted);

        let table = store.load_all().unwrap();
        assert_eq!(table.rows.len(), 2);
        // Legacy row keeps its values and its extra column.
        assert_eq!(table.value(&table.rows[0], "Name"), Some("Old User"));
        assert_eq!(table.value(&table.rows[0], "LegacyNotes"), Some("keep me"));
        assert_eq!(table.value(&table.rows[0], "Agent"), Some(""));
        // New row fills every canonical column; the legacy extra stays empty.
        assert_eq!(table.value(&table.rows[1], "Agent"), Some("Q1"));
        assert_eq!(table.value(&table.rows[1], "LegacyNotes"), Some(""));
    }

    #[test]
    fn test_unwritable_path_falls_back_to_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        // A path whose parent is a regular file can never be created.
        let store = FeedbackStore::new(blocker.join("feedback.csv"));

        assert_eq!(store.record(&sample("Q2", "held in memory")), RecordOutcome::Memory);
        assert_eq!(store.memory_count(), 1);

        let table = store.load_all().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.value(&table.rows[0], "Feedback"), Some("held in memory"));
    }

    #[test]
    fn test_filter_by_agent_and_type() {
        let dir = TempDir::new().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback.csv"));
        store.record(&sample("vocabulary", "a"));
        store.record(&sample("Q1", "b"));
        store.record(&sample("Q1", "c"));

        let table = store.load_all().unwrap();
        assert_eq!(table.filter("Agent", "Q1").rows.len(), 2);
        assert_eq!(table.filter("FeedbackType", "positive").rows.len(), 3);
        assert_eq!(table.filter("NoSuchColumn", "x").rows.len(), 0);
    }

    #[test]
    fn test_reset_keeps_only_the_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        let store = FeedbackStore::new(&path);
        store.record(&sample("Q3", "gone after reset"));

        store.reset().unwrap();
        let table = store.load_all().unwrap();
        assert!(table.rows.is_empty());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Timestamp,"));
    }

    #[test]
    fn test_concurrent_appends_keep_every_row() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FeedbackStore::new(dir.path().join("feedback.csv")));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.record(&sample("Q1", &format!("row {}", i))))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), RecordOutcome::Persisted);
        }

        let table = store.load_all().unwrap();
        assert_eq!(table.rows.len(), 32);
        for i in 0..32 {
            let expected = format!("row {}", i);
            assert!(
                table
                    .rows
                    .iter()
                    .any(|row| table.value(row, "Feedback") == Some(expected.as_str())),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "Timestamp,Feedback\n\"unterminated,row\n").unwrap();

        let store = FeedbackStore::new(&path);
        let err = store.load_all().unwrap_err();
        assert!(format!("{:#}", err).contains("corrupt"), "{:#}", err);
    }

    #[test]
    fn test_export_round_trips_awkward_fields() {
        let dir = TempDir::new().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback.csv"));
        store.record(&sample("Q4", "line one\nline two, with \"quotes\""));

        let exported = store.load_all().unwrap().to_csv();
        let reparsed = parse_table(&exported).unwrap();
        assert_eq!(
            reparsed.value(&reparsed.rows[0], "Feedback"),
            Some("line one\nline two, with \"quotes\"")
        );
    }
}
