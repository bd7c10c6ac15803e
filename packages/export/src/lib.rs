#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tabular export of extracted fund fact sheet records.
//!
//! One CSV file, written exactly once at end-of-run: a header row with the
//! schema fields in order, then one row per record. Opens cleanly in any
//! spreadsheet application.

use std::path::Path;

use fund_sheets_schema::{ExtractedRecord, FIELDS};
use serde_json::Value;

/// Errors that can occur while writing the output table.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization or I/O failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the underlying file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `records` to `path` as CSV, one row per record.
///
/// An empty table still produces a valid file containing the header row
/// and nothing else.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_csv(path: &Path, records: &[ExtractedRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(FIELDS)?;

    for record in records {
        let row: Vec<String> = FIELDS
            .iter()
            .map(|field| record.get(field).map_or_else(String::new, cell_text))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;

    log::info!("Wrote {} record(s) to {}", records.len(), path.display());

    Ok(())
}

/// Renders one JSON value as spreadsheet cell text.
///
/// Strings pass through as-is; anything structured the model returned
/// (lists of holdings, nested allocations) is kept as compact JSON so no
/// information is lost in the flat format.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
