use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use cord_model::{PipelineError, Record, Result, Schema, Table};

/// Input spellings normalized to the single absent marker at load time,
/// before any policy logic runs.
const MISSING_SENTINELS: &[&str] = &["nan", "null", "none", "n/a", "na"];

/// Options for [`load_metadata`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Cap the table to the first N data rows. This is a literal
    /// truncation, not a random sample; aggregates over a capped table
    /// reflect file order.
    pub row_limit: Option<usize>,
}

/// Tally of recovered conditions from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows consumed from the file, including skipped ones.
    pub rows_read: usize,
    /// Rows that made it into the table.
    pub rows_kept: usize,
    /// Rows skipped because the csv reader could not parse them.
    pub malformed_rows: usize,
    /// Valid rows skipped because every cell was empty.
    pub blank_rows: usize,
    /// Whether the row limit cut the file short.
    pub truncated: bool,
}

/// Strip surrounding whitespace and BOM, then normalize missing-value
/// spellings to `None`.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() || MISSING_SENTINELS.contains(&trimmed.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a metadata CSV file into a [`Table`].
///
/// Fatal errors: missing file, missing required column, unreadable header.
/// A row the csv reader rejects is skipped and tallied in the report, as
/// is a row whose cells are all empty; loading continues with the next
/// row. Either a complete table comes back or an error does, never a
/// partial result.
pub fn load_metadata(path: &Path, options: &LoadOptions) -> Result<(Table, LoadReport)> {
    if !path.exists() {
        return Err(PipelineError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let schema = Schema::from_headers(headers)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();
    for row in reader.records() {
        if options.row_limit.is_some_and(|limit| records.len() >= limit) {
            report.truncated = true;
            break;
        }
        report.rows_read += 1;
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                warn!(row = report.rows_read, %error, "skipping malformed row");
                report.malformed_rows += 1;
                continue;
            }
        };
        if row.iter().all(|cell| cell.trim().is_empty()) {
            report.blank_rows += 1;
            continue;
        }
        records.push(build_record(&schema, &row));
    }
    report.rows_kept = records.len();

    debug!(
        path = %path.display(),
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        malformed_rows = report.malformed_rows,
        blank_rows = report.blank_rows,
        truncated = report.truncated,
        "metadata loaded"
    );
    Ok((Table::new(schema, records), report))
}

fn build_record(schema: &Schema, row: &csv::StringRecord) -> Record {
    let mut record = Record::default();
    for (index, header) in schema.headers().iter().enumerate() {
        let Some(value) = row.get(index).and_then(normalize_cell) else {
            continue;
        };
        match schema.field_at(index) {
            Some(field) => record.set(field, Some(value)),
            None => {
                record.extra.insert(header.clone(), value);
            }
        }
    }
    record
}
