//! The nine chart builders and their dispatcher.
//!
//! Every builder is a pure function over a [`CleanTable`] returning a
//! self-contained [`ChartResult`]; nothing is cached between selections and
//! the same request against the same table always yields the same result.
//! Ordering rules (fixed weekday order, stable top-N ties, chronological
//! time series) are part of each builder's contract.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Timelike};

use dash_core::error::ChartError;
use dash_core::formatting::percentage;
use dash_core::models::{
    columns, CategoryChart, CategoryCount, ChartRequest, ChartResult, ColumnKind, ColumnSummary,
    DatasetSummary, HeatmapChart, HourHistogram, PercentageChart, TimeSeriesChart, YearMonth,
};

use crate::table::CleanTable;

/// How many entries the top-N category views keep.
const TOP_N: usize = 10;

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Compute the view for `request` from `table`.
///
/// Exhaustive over the closed request set; a [`ChartError`] is terminal for
/// this selection only, other selections remain available.
pub fn select(request: ChartRequest, table: &CleanTable) -> Result<ChartResult, ChartError> {
    match request {
        ChartRequest::DatasetInfo => Ok(ChartResult::Info(dataset_info(table))),
        ChartRequest::TopWorkspaces => top_categories(table, columns::WORKSPACE_NAME, request),
        ChartRequest::ReportsPerWeekday => reports_per_weekday(table),
        ChartRequest::ReportsPerHour => reports_per_hour(table),
        ChartRequest::TopReportTypes => top_categories(table, columns::REPORT_TYPE, request),
        ChartRequest::WorkspaceTypes => workspace_types(table),
        ChartRequest::ReportsOverTime => reports_over_time(table),
        ChartRequest::DedicatedCapacity => dedicated_capacity(table),
        ChartRequest::MonthYearHeatmap => month_year_heatmap(table),
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Structural summary: per column its name, non-null count and inferred kind.
///
/// Text columns are fully non-null after sentinel filling; the typed date
/// columns and the derived month key count their successfully parsed cells.
fn dataset_info(table: &CleanTable) -> DatasetSummary {
    let non_null_timestamps =
        |cells: &[Option<chrono::DateTime<chrono::Utc>>]| cells.iter().flatten().count();

    let mut columns_out: Vec<ColumnSummary> = table
        .columns()
        .iter()
        .map(|name| match name.as_str() {
            columns::CREATED_DATE_TIME => ColumnSummary {
                name: name.clone(),
                non_null: non_null_timestamps(table.created()),
                kind: ColumnKind::Timestamp,
            },
            columns::MODIFIED_DATE_TIME => ColumnSummary {
                name: name.clone(),
                non_null: non_null_timestamps(table.modified()),
                kind: ColumnKind::Timestamp,
            },
            _ => ColumnSummary {
                name: name.clone(),
                non_null: table.len(),
                kind: ColumnKind::Text,
            },
        })
        .collect();

    // The derived month key is reported alongside the uploaded columns, but
    // only when its source column exists.
    if table.has_column(columns::CREATED_DATE_TIME) {
        columns_out.push(ColumnSummary {
            name: columns::YEAR_MONTH.to_string(),
            non_null: table.year_months().iter().flatten().count(),
            kind: ColumnKind::Period,
        });
    }

    DatasetSummary {
        row_count: table.len(),
        columns: columns_out,
    }
}

/// Count by `column`, descending, first `TOP_N` entries.
fn top_categories(
    table: &CleanTable,
    column: &str,
    request: ChartRequest,
) -> Result<ChartResult, ChartError> {
    let mut entries = value_counts(&table.column(column)?);
    entries.truncate(TOP_N);
    Ok(ChartResult::Categories(CategoryChart {
        title: request.label().to_string(),
        entries,
    }))
}

/// Counts per calendar weekday, Monday→Sunday fixed, absent days zero.
fn reports_per_weekday(table: &CleanTable) -> Result<ChartResult, ChartError> {
    require_column(table, columns::CREATED_DATE_TIME)?;

    let mut counts = [0u64; 7];
    for dt in table.created().iter().flatten() {
        counts[dt.weekday().num_days_from_monday() as usize] += 1;
    }

    let entries = dash_core::models::WEEKDAY_NAMES
        .iter()
        .zip(counts)
        .map(|(name, count)| CategoryCount {
            label: name.to_string(),
            count,
        })
        .collect();

    Ok(ChartResult::Categories(CategoryChart {
        title: ChartRequest::ReportsPerWeekday.label().to_string(),
        entries,
    }))
}

/// Histogram of creation hour over 24 fixed bins.
fn reports_per_hour(table: &CleanTable) -> Result<ChartResult, ChartError> {
    require_column(table, columns::CREATED_DATE_TIME)?;

    let mut bins = [0u64; 24];
    for dt in table.created().iter().flatten() {
        bins[dt.hour() as usize] += 1;
    }

    Ok(ChartResult::Hours(HourHistogram {
        title: ChartRequest::ReportsPerHour.label().to_string(),
        bins,
    }))
}

/// Full workspace-type distribution, descending by count, no truncation.
fn workspace_types(table: &CleanTable) -> Result<ChartResult, ChartError> {
    let entries = value_counts(&table.column(columns::WORKSPACE_TYPE)?);
    Ok(ChartResult::Categories(CategoryChart {
        title: ChartRequest::WorkspaceTypes.label().to_string(),
        entries,
    }))
}

/// Counts per month key, chronological; rows with an undefined key excluded.
fn reports_over_time(table: &CleanTable) -> Result<ChartResult, ChartError> {
    require_column(table, columns::CREATED_DATE_TIME)?;

    let mut counts: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for ym in table.year_months().iter().flatten() {
        *counts.entry(*ym).or_insert(0) += 1;
    }

    Ok(ChartResult::TimeSeries(TimeSeriesChart {
        title: ChartRequest::ReportsOverTime.label().to_string(),
        points: counts.into_iter().collect(),
    }))
}

/// Percentage of rows on dedicated capacity, fixed "No"/"Yes" labels.
///
/// Shares sum to 100 for any non-empty table (0/0 when empty). Only the
/// recognised truthy spellings count as Yes; the sentinel and every other
/// value count as No.
fn dedicated_capacity(table: &CleanTable) -> Result<ChartResult, ChartError> {
    let values = table.column(columns::IS_ON_DEDICATED_CAPACITY)?;
    let total = values.len();
    let yes = values.iter().filter(|v| is_truthy(v)).count();
    let no = total - yes;

    Ok(ChartResult::Percentages(PercentageChart {
        title: ChartRequest::DedicatedCapacity.label().to_string(),
        shares: vec![
            ("No".to_string(), percentage(no as f64, total as f64, 2)),
            ("Yes".to_string(), percentage(yes as f64, total as f64, 2)),
        ],
    }))
}

/// Year × month creation-count matrix; absent combinations stay zero.
fn month_year_heatmap(table: &CleanTable) -> Result<ChartResult, ChartError> {
    require_column(table, columns::CREATED_DATE_TIME)?;

    let mut matrix: BTreeMap<i32, [u64; 12]> = BTreeMap::new();
    for dt in table.created().iter().flatten() {
        let row = matrix.entry(dt.year()).or_insert([0; 12]);
        row[dt.month0() as usize] += 1;
    }

    let (years, cells): (Vec<i32>, Vec<[u64; 12]>) = matrix.into_iter().unzip();

    Ok(ChartResult::Heatmap(HeatmapChart {
        title: ChartRequest::MonthYearHeatmap.label().to_string(),
        years,
        cells,
    }))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Count distinct values, descending by count; ties keep the order in which
/// the value was first encountered (stable sort over insertion order).
fn value_counts(values: &[&str]) -> Vec<CategoryCount> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for &value in values {
        match seen.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                seen.insert(value, counts.len());
                counts.push(CategoryCount {
                    label: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The date-based builders read typed vectors rather than named cells, so
/// schema absence has to be checked explicitly.
fn require_column(table: &CleanTable, name: &str) -> Result<(), ChartError> {
    if table.has_column(name) {
        Ok(())
    } else {
        Err(ChartError::MissingColumn(name.to_string()))
    }
}

/// Truthy parse for the dedicated-capacity flag, tolerant of the encodings
/// seen in exports (`True`, `true`, `1`, `yes`, `y`, `t`).
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "t"
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::clean;
    use crate::table::RawTable;
    use dash_core::models::columns::*;

    /// Clean a table from literal cells, prepending valid date columns so the
    /// cleaning pipeline keeps every row.
    fn table_with(columns_in: &[&str], rows_in: &[&[&str]]) -> CleanTable {
        let mut columns = vec![CREATED_DATE_TIME.to_string(), MODIFIED_DATE_TIME.to_string()];
        columns.extend(columns_in.iter().map(|c| c.to_string()));

        let rows = rows_in
            .iter()
            .map(|r| {
                let mut row = vec!["2024-01-05 10:00:00".to_string(), "2024-01-06".to_string()];
                row.extend(r.iter().map(|c| c.to_string()));
                row
            })
            .collect();

        clean(RawTable::new(columns, rows))
    }

    /// Clean a table whose created dates are given explicitly.
    fn table_with_dates(dates: &[&str]) -> CleanTable {
        let columns = vec![
            CREATED_DATE_TIME.to_string(),
            MODIFIED_DATE_TIME.to_string(),
            REPORT_NAME.to_string(),
        ];
        let rows = dates
            .iter()
            .map(|d| {
                vec![
                    d.to_string(),
                    "2024-01-06".to_string(),
                    "Weekly KPIs".to_string(),
                ]
            })
            .collect();
        clean(RawTable::new(columns, rows))
    }

    // ── Dispatcher ────────────────────────────────────────────────────────────

    #[test]
    fn test_select_is_idempotent() {
        let table = table_with(&[WORKSPACE_NAME], &[&["A"], &["B"], &["A"]]);
        for request in ChartRequest::ALL {
            let first = select(request, &table);
            let second = select(request, &table);
            match (first, second) {
                (Ok(a), Ok(b)) => assert_eq!(a, b, "{request:?} not idempotent"),
                (Err(_), Err(_)) => {}
                _ => panic!("{request:?} flip-flopped between Ok and Err"),
            }
        }
    }

    #[test]
    fn test_select_missing_column_terminal_for_that_chart_only() {
        // No WORKSPACE_TYPE column: its view fails, top workspaces still works.
        let table = table_with(&[WORKSPACE_NAME], &[&["A"], &["A"], &["B"]]);

        let err = select(ChartRequest::WorkspaceTypes, &table).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(name) if name == WORKSPACE_TYPE));

        let ok = select(ChartRequest::TopWorkspaces, &table).unwrap();
        assert!(matches!(ok, ChartResult::Categories(_)));
    }

    // ── Dataset info ──────────────────────────────────────────────────────────

    #[test]
    fn test_dataset_info_reports_columns_and_kinds() {
        let table = table_with(&[WORKSPACE_NAME], &[&["A"], &["B"]]);
        let ChartResult::Info(summary) = select(ChartRequest::DatasetInfo, &table).unwrap() else {
            panic!("expected info");
        };
        assert_eq!(summary.row_count, 2);

        // Three uploaded columns plus the derived month key.
        assert_eq!(summary.columns.len(), 4);
        let ym = summary.columns.last().unwrap();
        assert_eq!(ym.name, YEAR_MONTH);
        assert_eq!(ym.kind, ColumnKind::Period);
        assert_eq!(ym.non_null, 2);
    }

    #[test]
    fn test_dataset_info_counts_coerced_dates_as_null() {
        let table = table_with_dates(&["2024-01-05", "garbage"]);
        let ChartResult::Info(summary) = select(ChartRequest::DatasetInfo, &table).unwrap() else {
            panic!("expected info");
        };
        let created = summary
            .columns
            .iter()
            .find(|c| c.name == CREATED_DATE_TIME)
            .unwrap();
        assert_eq!(created.non_null, 1);
        assert_eq!(summary.row_count, 2);
    }

    // ── Top workspaces / report types ─────────────────────────────────────────

    #[test]
    fn test_top_workspaces_counts_and_order() {
        let table = table_with(&[WORKSPACE_NAME], &[&["A"], &["A"], &["A"], &["B"]]);
        let ChartResult::Categories(chart) =
            select(ChartRequest::TopWorkspaces, &table).unwrap()
        else {
            panic!("expected categories");
        };
        let pairs: Vec<(&str, u64)> = chart
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect();
        assert_eq!(pairs, vec![("A", 3), ("B", 1)]);
    }

    #[test]
    fn test_top_workspaces_caps_at_ten() {
        let labels: Vec<String> = (0..15).map(|i| format!("ws-{i}")).collect();
        let rows: Vec<Vec<&str>> = labels.iter().map(|l| vec![l.as_str()]).collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let table = table_with(&[WORKSPACE_NAME], &row_refs);

        let ChartResult::Categories(chart) =
            select(ChartRequest::TopWorkspaces, &table).unwrap()
        else {
            panic!("expected categories");
        };
        assert_eq!(chart.entries.len(), 10);
    }

    #[test]
    fn test_top_categories_ties_keep_first_encountered_order() {
        let table = table_with(
            &[REPORT_TYPE],
            &[&["Paginated"], &["PowerBI"], &["PowerBI"], &["Paginated"]],
        );
        let ChartResult::Categories(chart) =
            select(ChartRequest::TopReportTypes, &table).unwrap()
        else {
            panic!("expected categories");
        };
        // Both have count 2; "Paginated" appeared first in the data.
        assert_eq!(chart.entries[0].label, "Paginated");
        assert_eq!(chart.entries[1].label, "PowerBI");
    }

    #[test]
    fn test_top_categories_sorted_descending() {
        let table = table_with(
            &[REPORT_TYPE],
            &[&["X"], &["Y"], &["Y"], &["Z"], &["Z"], &["Z"]],
        );
        let ChartResult::Categories(chart) =
            select(ChartRequest::TopReportTypes, &table).unwrap()
        else {
            panic!("expected categories");
        };
        let counts: Vec<u64> = chart.entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    // ── Weekdays ──────────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_categories_fixed_even_for_single_day() {
        // 2024-01-05 is a Friday.
        let table = table_with_dates(&["2024-01-05", "2024-01-05"]);
        let ChartResult::Categories(chart) =
            select(ChartRequest::ReportsPerWeekday, &table).unwrap()
        else {
            panic!("expected categories");
        };
        assert_eq!(chart.entries.len(), 7);
        let labels: Vec<&str> = chart.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ]
        );
        assert_eq!(chart.entries[4].count, 2); // Friday
        assert_eq!(chart.entries[0].count, 0); // Monday absent, still present
    }

    #[test]
    fn test_weekday_excludes_coerced_dates() {
        let table = table_with_dates(&["2024-01-05", "garbage"]);
        let ChartResult::Categories(chart) =
            select(ChartRequest::ReportsPerWeekday, &table).unwrap()
        else {
            panic!("expected categories");
        };
        let total: u64 = chart.entries.iter().map(|e| e.count).sum();
        assert_eq!(total, 1);
    }

    // ── Hours ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_hour_histogram_has_24_bins() {
        let table = table_with_dates(&["2024-01-05 09:15:00", "2024-01-05 09:45:00"]);
        let ChartResult::Hours(hist) = select(ChartRequest::ReportsPerHour, &table).unwrap()
        else {
            panic!("expected hours");
        };
        assert_eq!(hist.bins.len(), 24);
        assert_eq!(hist.bins[9], 2);
        assert_eq!(hist.bins.iter().sum::<u64>(), 2);
    }

    #[test]
    fn test_hour_histogram_date_only_rows_bin_to_midnight() {
        let table = table_with_dates(&["2024-01-05"]);
        let ChartResult::Hours(hist) = select(ChartRequest::ReportsPerHour, &table).unwrap()
        else {
            panic!("expected hours");
        };
        assert_eq!(hist.bins[0], 1);
    }

    // ── Workspace types ───────────────────────────────────────────────────────

    #[test]
    fn test_workspace_types_full_distribution_untruncated() {
        let labels: Vec<String> = (0..12).map(|i| format!("type-{i}")).collect();
        let rows: Vec<Vec<&str>> = labels.iter().map(|l| vec![l.as_str()]).collect();
        let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let table = table_with(&[WORKSPACE_TYPE], &row_refs);

        let ChartResult::Categories(chart) =
            select(ChartRequest::WorkspaceTypes, &table).unwrap()
        else {
            panic!("expected categories");
        };
        assert_eq!(chart.entries.len(), 12);
    }

    // ── Over time ─────────────────────────────────────────────────────────────

    #[test]
    fn test_reports_over_time_chronological_not_by_count() {
        let table = table_with_dates(&[
            "2024-03-01",
            "2024-01-15",
            "2024-03-20",
            "2024-03-25",
            "2024-02-10",
        ]);
        let ChartResult::TimeSeries(series) =
            select(ChartRequest::ReportsOverTime, &table).unwrap()
        else {
            panic!("expected time series");
        };
        let keys: Vec<String> = series.points.iter().map(|(ym, _)| ym.to_string()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(series.points[2].1, 3);
    }

    #[test]
    fn test_reports_over_time_excludes_undefined_month_key() {
        let table = table_with_dates(&["2024-01-05", "not-a-date"]);
        let ChartResult::TimeSeries(series) =
            select(ChartRequest::ReportsOverTime, &table).unwrap()
        else {
            panic!("expected time series");
        };
        let total: u64 = series.points.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 1);
    }

    // ── Dedicated capacity ────────────────────────────────────────────────────

    #[test]
    fn test_dedicated_capacity_sums_to_100() {
        let table = table_with(
            &[IS_ON_DEDICATED_CAPACITY],
            &[&["True"], &["False"], &["True"], &["False"], &["False"]],
        );
        let ChartResult::Percentages(chart) =
            select(ChartRequest::DedicatedCapacity, &table).unwrap()
        else {
            panic!("expected percentages");
        };
        let sum: f64 = chart.shares.iter().map(|(_, p)| p).sum();
        assert!((sum - 100.0).abs() < 0.02, "sum = {sum}");
        assert_eq!(chart.shares[0].0, "No");
        assert_eq!(chart.shares[1].0, "Yes");
        assert!((chart.shares[1].1 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_dedicated_capacity_all_true() {
        let table = table_with(
            &[IS_ON_DEDICATED_CAPACITY],
            &[&["true"], &["true"], &["true"]],
        );
        let ChartResult::Percentages(chart) =
            select(ChartRequest::DedicatedCapacity, &table).unwrap()
        else {
            panic!("expected percentages");
        };
        assert_eq!(chart.shares[0], ("No".to_string(), 0.0));
        assert_eq!(chart.shares[1], ("Yes".to_string(), 100.0));
    }

    #[test]
    fn test_dedicated_capacity_sentinel_counts_as_no() {
        let table = table_with(&[IS_ON_DEDICATED_CAPACITY], &[&["Unknown"], &["1"]]);
        let ChartResult::Percentages(chart) =
            select(ChartRequest::DedicatedCapacity, &table).unwrap()
        else {
            panic!("expected percentages");
        };
        assert!((chart.shares[0].1 - 50.0).abs() < 1e-9);
        assert!((chart.shares[1].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_dedicated_capacity_empty_table_is_zero_zero() {
        let table = table_with(&[IS_ON_DEDICATED_CAPACITY], &[]);
        let ChartResult::Percentages(chart) =
            select(ChartRequest::DedicatedCapacity, &table).unwrap()
        else {
            panic!("expected percentages");
        };
        assert_eq!(chart.shares[0].1, 0.0);
        assert_eq!(chart.shares[1].1, 0.0);
    }

    // ── Heatmap ───────────────────────────────────────────────────────────────

    #[test]
    fn test_heatmap_matrix_zero_fills_missing_months() {
        let table = table_with_dates(&["2023-12-01", "2024-01-15", "2024-01-20"]);
        let ChartResult::Heatmap(map) = select(ChartRequest::MonthYearHeatmap, &table).unwrap()
        else {
            panic!("expected heatmap");
        };
        assert_eq!(map.years, vec![2023, 2024]);
        // 2023: only December.
        assert_eq!(map.cells[0][11], 1);
        assert_eq!(map.cells[0][0], 0);
        // 2024: two in January, everything else zero.
        assert_eq!(map.cells[1][0], 2);
        assert_eq!(map.cells[1].iter().sum::<u64>(), 2);
    }

    #[test]
    fn test_heatmap_years_ascending() {
        let table = table_with_dates(&["2025-06-01", "2023-06-01", "2024-06-01"]);
        let ChartResult::Heatmap(map) = select(ChartRequest::MonthYearHeatmap, &table).unwrap()
        else {
            panic!("expected heatmap");
        };
        assert_eq!(map.years, vec![2023, 2024, 2025]);
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_is_truthy_spellings() {
        for v in ["true", "TRUE", "True", "1", "yes", "Y", "t"] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["false", "0", "no", "Unknown", ""] {
            assert!(!is_truthy(v), "{v:?} should be falsy");
        }
    }
}
