//! Upload validation and CSV parsing.
//!
//! The session accepts exactly one file, by its literal expected name; the
//! byte stream is then parsed with a header row and handed to the cleaning
//! pipeline. Validation failures are terminal for the session.

use tracing::{debug, info};

use dash_core::error::ValidationError;
use dash_core::models::EXPECTED_FILENAME;

use crate::clean::clean;
use crate::table::{CleanTable, RawTable};

/// Validate the declared filename, parse `bytes` as CSV, and clean the
/// result.
///
/// * A filename other than [`EXPECTED_FILENAME`] fails with
///   [`ValidationError::WrongFile`] before any parsing.
/// * Malformed CSV fails with [`ValidationError::ParseFailure`].
pub fn ingest(bytes: &[u8], filename: &str) -> Result<CleanTable, ValidationError> {
    if filename != EXPECTED_FILENAME {
        return Err(ValidationError::WrongFile {
            expected: EXPECTED_FILENAME,
            actual: filename.to_string(),
        });
    }

    let raw = parse_csv(bytes)?;
    info!(
        "Parsed {} with {} rows, {} columns",
        filename,
        raw.len(),
        raw.columns().len()
    );

    Ok(clean(raw))
}

/// Parse a CSV byte stream whose first record is the header row.
///
/// Ragged records are tolerated (short rows pad with empty cells, long rows
/// truncate to the header width); structural errors such as unterminated
/// quotes surface as `csv::Error`.
fn parse_csv(bytes: &[u8]) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("CSV parse: {} data records", rows.len());
    Ok(RawTable::new(columns, rows))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
