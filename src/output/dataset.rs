//! CSV dataset persistence
//!
//! Records are written as text: one header row taken from the first record,
//! then one row per record in input order. Nothing is coerced, so reading a
//! dataset back yields the exact strings that were written.

use crate::record::BookRecord;
use crate::Result;
use std::path::{Path, PathBuf};

/// What a dataset write did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// There were no records; no file was created
    NothingToSave,

    /// The dataset was written
    Written { rows: usize, path: PathBuf },
}

/// Writes `records` to a CSV file at `path`
///
/// # Returns
///
/// * `Ok(WriteOutcome::NothingToSave)` - `records` was empty, no file written
/// * `Ok(WriteOutcome::Written { .. })` - Header plus one row per record
/// * `Err(ScraperError)` - The file could not be created or written
pub fn write_dataset(records: &[BookRecord], path: &Path) -> Result<WriteOutcome> {
    let Some(first) = records.first() else {
        tracing::info!("No data to save");
        return Ok(WriteOutcome::NothingToSave);
    };

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(first.field_names())?;
    for record in records {
        writer.write_record(record.fields().iter().map(|(_, value)| *value))?;
    }
    writer.flush()?;

    tracing::info!("Saved {} books to {}", records.len(), path.display());

    Ok(WriteOutcome::Written {
        rows: records.len(),
        path: path.to_path_buf(),
    })
}

/// Reads a dataset written by [`write_dataset`]
pub fn read_dataset(path: &Path) -> Result<Vec<BookRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
