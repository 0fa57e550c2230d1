//! Tabular containers for the cleaning pipeline.
//!
//! [`RawTable`] is the untyped result of CSV parsing; [`CleanTable`] is what
//! the chart builders consume: text cells sentinel-filled, the two critical
//! date columns parsed into typed vectors, and a derived month key per row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dash_core::error::ChartError;
use dash_core::models::YearMonth;

/// Cell spellings treated as missing, matching common exporter conventions.
const NA_VALUES: [&str; 5] = ["NA", "N/A", "NaN", "null", "None"];

/// A cell counts as missing when it is empty after trimming or one of the
/// recognised NA spellings.
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NA_VALUES.contains(&trimmed)
}

// ── RawTable ──────────────────────────────────────────────────────────────────

/// Rows of string cells exactly as parsed from CSV, header included.
///
/// Exists only between parsing and cleaning; it has no identity beyond row
/// order.
#[derive(Debug, Clone)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, padding short rows with empty cells and truncating long
    /// rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ── CleanTable ────────────────────────────────────────────────────────────────

/// The validated, gap-filled, typed dataset derived from the uploaded file.
///
/// Invariants:
/// * every surviving row had non-missing `CREATED_DATE_TIME` and
///   `MODIFIED_DATE_TIME` strings;
/// * every text cell is non-empty (missing values were replaced with the
///   sentinel);
/// * `year_month[i]` is derived from `created[i]` and is `None` exactly when
///   the created string failed to parse.
///
/// The original column list is retained so that builders can distinguish an
/// absent column (a schema problem, [`ChartError::MissingColumn`]) from an
/// empty one.
#[derive(Debug, Clone)]
pub struct CleanTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
    created: Vec<Option<DateTime<Utc>>>,
    modified: Vec<Option<DateTime<Utc>>>,
    year_month: Vec<Option<YearMonth>>,
}

impl CleanTable {
    /// Assemble a clean table from pipeline output. The parallel vectors must
    /// all have one entry per row.
    pub(crate) fn from_parts(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        created: Vec<Option<DateTime<Utc>>>,
        modified: Vec<Option<DateTime<Utc>>>,
        year_month: Vec<Option<YearMonth>>,
    ) -> Self {
        debug_assert_eq!(rows.len(), created.len());
        debug_assert_eq!(rows.len(), modified.len());
        debug_assert_eq!(rows.len(), year_month.len());

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            columns,
            index,
            rows,
            created,
            modified,
            year_month,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names as uploaded (the derived month key is not listed here).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All cells of a named column, in row order.
    ///
    /// Fails with [`ChartError::MissingColumn`] when the uploaded file did
    /// not carry the column at all.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, ChartError> {
        let &idx = self
            .index
            .get(name)
            .ok_or_else(|| ChartError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Raw text cells of one row, for the table view.
    pub fn row(&self, i: usize) -> &[String] {
        &self.rows[i]
    }

    /// Parsed creation timestamps, one per row; `None` where the string did
    /// not parse.
    pub fn created(&self) -> &[Option<DateTime<Utc>>] {
        &self.created
    }

    /// Parsed modification timestamps, one per row.
    pub fn modified(&self) -> &[Option<DateTime<Utc>>] {
        &self.modified
    }

    /// Derived month keys, one per row.
    pub fn year_months(&self) -> &[Option<YearMonth>] {
        &self.year_month
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
