//! Entry CSV import and export
//!
//! Imported rows become [`EntryDraft`]s and go through the same validator as
//! the registration form. Exported files carry an extra leading `id` column
//! that the importer ignores, so an export can be replayed.
//!
//! Columns: `participant_id,activity_id,date,has_evidence,verified_by,notes,group_size`

use crate::contest::{Entry, EntryDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that abort an import or export
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported entry row
#[derive(Debug, Serialize)]
pub struct EntryRecord<'a> {
    pub id: String,
    pub participant_id: &'a str,
    pub activity_id: &'a str,
    pub date: String,
    pub has_evidence: bool,
    pub verified_by: &'a str,
    pub notes: Option<&'a str>,
    pub group_size: Option<u32>,
}

impl<'a> From<&'a Entry> for EntryRecord<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            participant_id: &entry.participant_id.0,
            activity_id: &entry.activity_id.0,
            date: entry.date.format("%Y-%m-%d").to_string(),
            has_evidence: entry.has_evidence,
            verified_by: &entry.verified_by,
            notes: entry.notes.as_deref(),
            group_size: entry.group_size,
        }
    }
}

/// Raw imported row; every field is parsed by hand for row-level errors
#[derive(Debug, Deserialize)]
struct RawRecord {
    participant_id: Option<String>,
    activity_id: Option<String>,
    date: Option<String>,
    has_evidence: Option<String>,
    verified_by: Option<String>,
    notes: Option<String>,
    group_size: Option<String>,
}

/// Result of an import
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Drafts in file order, ready for validation
    pub drafts: Vec<EntryDraft>,
    /// Rows that could not be parsed
    pub rows_failed: usize,
    /// Error messages, one per failed row
    pub errors: Vec<String>,
}

/// Reads entry drafts from CSV
#[derive(Debug, Clone)]
pub struct EntryImporter {
    date_format: String,
}

impl Default for EntryImporter {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl EntryImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format (strftime)
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Import from a CSV file
    pub fn import(&self, path: &Path) -> Result<ImportResult, ImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import from CSV text
    pub fn import_str(&self, data: &str) -> Result<ImportResult, ImportError> {
        self.import_reader(data.as_bytes())
    }

    fn import_reader<R: Read>(&self, reader: R) -> Result<ImportResult, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut result = ImportResult::default();

        for (row_idx, record) in reader.deserialize::<RawRecord>().enumerate() {
            // Header is line 1
            let line = row_idx + 2;
            let parsed = record
                .map_err(|e| e.to_string())
                .and_then(|raw| self.parse_record(raw));

            match parsed {
                Ok(draft) => result.drafts.push(draft),
                Err(e) => {
                    result.rows_failed += 1;
                    result.errors.push(format!("Line {}: {}", line, e));
                }
            }
        }

        tracing::debug!(
            drafts = result.drafts.len(),
            rows_failed = result.rows_failed,
            "Entry CSV parsed"
        );

        Ok(result)
    }

    fn parse_record(&self, raw: RawRecord) -> Result<EntryDraft, String> {
        let date = raw
            .date
            .map(|d| {
                NaiveDate::parse_from_str(&d, &self.date_format)
                    .map_err(|e| format!("invalid date '{}': {}", d, e))
            })
            .transpose()?;

        let has_evidence = match raw.has_evidence.as_deref() {
            None => false,
            Some(s) => parse_flag(s).ok_or_else(|| format!("invalid evidence flag '{}'", s))?,
        };

        let group_size = raw
            .group_size
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| format!("invalid group size '{}'", s))
            })
            .transpose()?;

        let mut draft = EntryDraft::new().evidence(has_evidence);
        draft.participant_id = raw.participant_id.map(Into::into);
        draft.activity_id = raw.activity_id.map(Into::into);
        draft.date = date;
        draft.verified_by = raw.verified_by;
        draft.notes = raw.notes;
        draft.group_size = group_size;
        Ok(draft)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "x" | "si" | "sí" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Write entries as CSV
pub fn export_entries<W: Write>(entries: &[Entry], writer: W) -> Result<(), ImportError> {
    let mut writer = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        writer.write_record([
            "id",
            "participant_id",
            "activity_id",
            "date",
            "has_evidence",
            "verified_by",
            "notes",
            "group_size",
        ])?;
    }
    for entry in entries {
        writer.serialize(EntryRecord::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write entries to a CSV file
pub fn export_entries_to_path(entries: &[Entry], path: &Path) -> Result<(), ImportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    export_entries(entries, file)
}
