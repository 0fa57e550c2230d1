//! The cleaning pipeline: drop, fill, type, derive.
//!
//! Runs once per uploaded file per session. The pipeline never fails — bad
//! data degrades (rows dropped, sentinels substituted, timestamps coerced to
//! per-cell nulls) and each degradation is logged.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use dash_core::models::{columns, YearMonth, SENTINEL};
use dash_core::timestamp::TimestampParser;

use crate::table::{is_missing, CleanTable, RawTable};

/// Clean a parsed table.
///
/// 1. Drop every row missing `CREATED_DATE_TIME` or `MODIFIED_DATE_TIME` —
///    unrecoverable for temporal analysis. When either column is absent from
///    the header, every row counts as missing it and the result is empty.
/// 2. Substitute the `"Unknown"` sentinel for every other missing cell, so
///    categorical views keep their full row count.
/// 3. Parse both date columns. A string that fails to parse becomes a null
///    cell; the row is kept. (Deliberately looser than step 1: a present but
///    malformed date only degrades the optional time-based views.)
/// 4. Derive the month key from the parsed creation timestamp.
pub fn clean(raw: RawTable) -> CleanTable {
    let created_idx = raw.column_index(columns::CREATED_DATE_TIME);
    let modified_idx = raw.column_index(columns::MODIFIED_DATE_TIME);

    if created_idx.is_none() || modified_idx.is_none() {
        warn!(
            "Critical date column(s) absent from upload; dropping all {} rows",
            raw.len()
        );
    }

    let columns: Vec<String> = raw.columns().to_vec();
    let total_rows = raw.len();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut created: Vec<Option<DateTime<Utc>>> = Vec::new();
    let mut modified: Vec<Option<DateTime<Utc>>> = Vec::new();
    let mut year_month: Vec<Option<YearMonth>> = Vec::new();
    let mut filled_cells = 0u64;
    let mut coerced_dates = 0u64;

    for row in raw.rows() {
        // Step 1: both critical date strings must be present.
        let (Some(ci), Some(mi)) = (created_idx, modified_idx) else {
            continue;
        };
        if is_missing(&row[ci]) || is_missing(&row[mi]) {
            continue;
        }

        // Step 2: sentinel-fill every other missing cell.
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i != ci && i != mi && is_missing(cell) {
                    filled_cells += 1;
                    SENTINEL.to_string()
                } else {
                    cell.clone()
                }
            })
            .collect();

        // Step 3: type the date columns; parse failure coerces to null.
        let created_dt = TimestampParser::parse(&cells[ci]);
        let modified_dt = TimestampParser::parse(&cells[mi]);
        if created_dt.is_none() || modified_dt.is_none() {
            coerced_dates += 1;
        }

        // Step 4: month key, undefined when the created date did not parse.
        let ym = created_dt.as_ref().map(YearMonth::from_datetime);

        rows.push(cells);
        created.push(created_dt);
        modified.push(modified_dt);
        year_month.push(ym);
    }

    debug!(
        "Cleaned table: {} of {} rows kept, {} cells sentinel-filled, {} rows with coerced dates",
        rows.len(),
        total_rows,
        filled_cells,
        coerced_dates,
    );

    CleanTable::from_parts(columns, rows, created, modified, year_month)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
