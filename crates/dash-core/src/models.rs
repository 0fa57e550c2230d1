use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only filename accepted by the upload validator.
pub const EXPECTED_FILENAME: &str = "Reports_Metric_Table_Demo.csv";

/// Placeholder substituted for missing non-critical cells during cleaning.
pub const SENTINEL: &str = "Unknown";

/// Column names of the fixed report-metadata schema.
pub mod columns {
    pub const CREATED_DATE_TIME: &str = "CREATED_DATE_TIME";
    pub const MODIFIED_DATE_TIME: &str = "MODIFIED_DATE_TIME";
    pub const WORKSPACE_NAME: &str = "WORKSPACE_NAME";
    pub const WORKSPACE_TYPE: &str = "WORKSPACE_TYPE";
    pub const REPORT_TYPE: &str = "REPORT_TYPE";
    pub const REPORT_NAME: &str = "REPORT_NAME";
    pub const IS_ON_DEDICATED_CAPACITY: &str = "IS_ON_DEDICATED_CAPACITY";
    /// Derived grouping column, not part of the uploaded schema.
    pub const YEAR_MONTH: &str = "YearMonth";
}

/// Weekday display names in the fixed Monday→Sunday chart order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A timestamp truncated to calendar-month granularity.
///
/// Used as the grouping key for time-series aggregation. Ordering is
/// chronological (year first, then month).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl YearMonth {
    /// Truncate a UTC timestamp to its calendar month.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ── ChartRequest ──────────────────────────────────────────────────────────────

/// The closed set of selectable views.
///
/// One variant per entry of the original selection menu; the dispatcher
/// matches exhaustively so a new variant cannot be forgotten at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRequest {
    DatasetInfo,
    TopWorkspaces,
    ReportsPerWeekday,
    ReportsPerHour,
    TopReportTypes,
    WorkspaceTypes,
    ReportsOverTime,
    DedicatedCapacity,
    MonthYearHeatmap,
}

impl ChartRequest {
    /// All requests in menu order.
    pub const ALL: [ChartRequest; 9] = [
        ChartRequest::DatasetInfo,
        ChartRequest::TopWorkspaces,
        ChartRequest::ReportsPerWeekday,
        ChartRequest::ReportsPerHour,
        ChartRequest::TopReportTypes,
        ChartRequest::WorkspaceTypes,
        ChartRequest::ReportsOverTime,
        ChartRequest::DedicatedCapacity,
        ChartRequest::MonthYearHeatmap,
    ];

    /// Human-readable menu label, matching the original dashboard wording.
    pub fn label(&self) -> &'static str {
        match self {
            ChartRequest::DatasetInfo => "Display dataset info",
            ChartRequest::TopWorkspaces => "Top 10 Workspaces by Report Count",
            ChartRequest::ReportsPerWeekday => "Reports Created Per Day of the Week",
            ChartRequest::ReportsPerHour => "Reports Created Per Hour of the Day",
            ChartRequest::TopReportTypes => "Top Report Types",
            ChartRequest::WorkspaceTypes => "Workspace Type Distribution",
            ChartRequest::ReportsOverTime => "Reports Created Over Time",
            ChartRequest::DedicatedCapacity => "Reports on Dedicated Capacity (%)",
            ChartRequest::MonthYearHeatmap => "Heatmap of Reports Created Per Month-Year",
        }
    }
}

// ── ChartResult payloads ──────────────────────────────────────────────────────

/// Inferred kind of a column, reported by the dataset-info view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Sentinel-filled text.
    Text,
    /// Parsed date-time, nullable per cell.
    Timestamp,
    /// Derived month-granularity key, nullable per cell.
    Period,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Timestamp => "datetime",
            ColumnKind::Period => "period[M]",
        }
    }
}

/// Structural summary of one column for the dataset-info view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Cells with a usable value (text columns count everything after
    /// sentinel filling; typed columns count successfully parsed cells).
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Structural summary of the cleaned dataset. A textual report, not a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
}

/// One labelled count in a categorical chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// A categorical bar chart: labels with counts, already in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub title: String,
    pub entries: Vec<CategoryCount>,
}

/// Histogram of report creation over the 24 hours of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourHistogram {
    pub title: String,
    /// Bin `i` counts rows created in hour-of-day `i`.
    pub bins: [u64; 24],
}

/// Monthly report counts in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesChart {
    pub title: String,
    pub points: Vec<(YearMonth, u64)>,
}

/// Percentage split across fixed labels, summing to 100 for non-empty input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageChart {
    pub title: String,
    pub shares: Vec<(String, f64)>,
}

/// Year × month count matrix. Missing combinations are zero, not dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    /// Years present in the data, ascending.
    pub years: Vec<i32>,
    /// One row of 12 month counts (January first) per entry in `years`.
    pub cells: Vec<[u64; 12]>,
}

// ── ChartResult ───────────────────────────────────────────────────────────────

/// A fully computed, self-contained description of one view.
///
/// Builders return these instead of drawing into any shared figure state;
/// the rendering collaborator owns widget lifecycle. Never stored across
/// selections — every selector change recomputes from the clean table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartResult {
    Info(DatasetSummary),
    Categories(CategoryChart),
    Hours(HourHistogram),
    TimeSeries(TimeSeriesChart),
    Percentages(PercentageChart),
    Heatmap(HeatmapChart),
}

// ── Tests ─────────────────────────────────────────────────────────────────────
