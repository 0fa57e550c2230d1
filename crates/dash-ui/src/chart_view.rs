//! Renderers for every chart the dashboard can show.
//!
//! Each renderer consumes a borrowed chart payload and draws it into the
//! given area.  Bar-style charts are drawn as coloured block lines (the same
//! technique the raw-table preview uses for emphasis) so they work on any
//! terminal; the heatmap uses a [`Table`] with per-cell colour scaling.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dash_core::error::ChartError;
use dash_core::formatting::{format_count, format_number};
use dash_core::models::{
    CategoryChart, ChartResult, DatasetSummary, HeatmapChart, HourHistogram, PercentageChart,
    TimeSeriesChart,
};

use crate::themes::Theme;

/// Terminal columns reserved for category labels.
const LABEL_WIDTH: usize = 24;
/// Terminal columns used by the widest bar.
const BAR_WIDTH: usize = 40;

const FILLED: char = '\u{2588}'; // █  FULL BLOCK
const EMPTY: char = '\u{2591}'; // ░  LIGHT SHADE

/// Three-letter month headers for the heatmap, January first.
const MONTH_HEADERS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Draw `result` into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, result: &ChartResult, theme: &Theme) {
    match result {
        ChartResult::Info(summary) => render_dataset_info(frame, area, summary, theme),
        ChartResult::Categories(chart) => render_categories(frame, area, chart, theme),
        ChartResult::Hours(hist) => render_hours(frame, area, hist, theme),
        ChartResult::TimeSeries(series) => render_time_series(frame, area, series, theme),
        ChartResult::Percentages(chart) => render_percentages(frame, area, chart, theme),
        ChartResult::Heatmap(map) => render_heatmap(frame, area, map, theme),
    }
}

/// Draw the error panel shown when a chart cannot be built for this dataset.
///
/// Only the failed selection is affected; the menu stays usable.
pub fn render_chart_error(frame: &mut Frame, area: Rect, error: &ChartError, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Chart unavailable", theme.error)),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), theme.text)),
        Line::from(""),
        Line::from(Span::styled(
            "Pick another chart with Up/Down.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error)
                .title(" Error "),
        ),
        area,
    );
}

// ── Per-chart renderers ───────────────────────────────────────────────────────

/// Column-by-column structural summary as a bordered table.
fn render_dataset_info(frame: &mut Frame, area: Rect, summary: &DatasetSummary, theme: &Theme) {
    let header = Row::new(
        ["Column", "Non-Null", "Dtype"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = summary
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            Row::new(vec![
                Cell::from(col.name.clone()),
                Cell::from(format_count(col.non_null as u64)),
                Cell::from(col.kind.as_str()),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(
                    " Data Information ({} rows) ",
                    format_count(summary.row_count as u64)
                )),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Horizontal bar chart, one line per category, scaled to the largest count.
fn render_categories(frame: &mut Frame, area: Rect, chart: &CategoryChart, theme: &Theme) {
    let max = chart.entries.iter().map(|e| e.count).max().unwrap_or(0);

    let lines: Vec<Line> = chart
        .entries
        .iter()
        .map(|entry| bar_line(&entry.label, entry.count, max, theme.bar, theme.label, theme))
        .collect();

    render_bar_panel(frame, area, &chart.title, lines, theme);
}

/// 24 fixed hour bins, one line each.
fn render_hours(frame: &mut Frame, area: Rect, hist: &HourHistogram, theme: &Theme) {
    let max = hist.bins.iter().copied().max().unwrap_or(0);

    let lines: Vec<Line> = hist
        .bins
        .iter()
        .enumerate()
        .map(|(hour, &count)| {
            bar_line(&format!("{hour:02}:00"), count, max, theme.bar, theme.axis, theme)
        })
        .collect();

    render_bar_panel(frame, area, &hist.title, lines, theme);
}

/// Chronological month-by-month bars.  The month keys come pre-sorted so
/// drawing in order preserves the timeline.
fn render_time_series(frame: &mut Frame, area: Rect, series: &TimeSeriesChart, theme: &Theme) {
    let max = series.points.iter().map(|(_, c)| *c).max().unwrap_or(0);

    let lines: Vec<Line> = series
        .points
        .iter()
        .map(|(ym, count)| bar_line(&ym.to_string(), *count, max, theme.series, theme.axis, theme))
        .collect();

    render_bar_panel(frame, area, &series.title, lines, theme);
}

/// Fixed-category percentage chart; bars are scaled against 100 %.
fn render_percentages(frame: &mut Frame, area: Rect, chart: &PercentageChart, theme: &Theme) {
    let lines: Vec<Line> = chart
        .shares
        .iter()
        .enumerate()
        .map(|(i, (label, pct))| {
            let style = if i % 2 == 0 { theme.bar } else { theme.bar_alt };
            let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            Line::from(vec![
                Span::styled(pad_label(label), theme.label),
                Span::styled(repeat_char(FILLED, filled), style),
                Span::styled(repeat_char(EMPTY, BAR_WIDTH - filled), theme.dim),
                Span::styled(format!(" {}%", format_number(*pct, 2)), theme.value),
            ])
        })
        .collect();

    render_bar_panel(frame, area, &chart.title, lines, theme);
}

/// Year × month matrix with counts coloured by intensity.
fn render_heatmap(frame: &mut Frame, area: Rect, map: &HeatmapChart, theme: &Theme) {
    let max = map
        .cells
        .iter()
        .flat_map(|row| row.iter().copied())
        .max()
        .unwrap_or(0);

    let mut header_cells = vec![Cell::from("Year").style(theme.table_header)];
    header_cells.extend(
        MONTH_HEADERS
            .iter()
            .map(|m| Cell::from(*m).style(theme.table_header)),
    );
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = map
        .years
        .iter()
        .zip(&map.cells)
        .map(|(year, counts)| {
            let mut cells = vec![Cell::from(year.to_string()).style(theme.bold)];
            cells.extend(counts.iter().map(|&count| {
                Cell::from(format_count(count)).style(theme.heat_style(count, max))
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(std::iter::repeat_n(Constraint::Length(5), 12));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", map.title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Line helpers ──────────────────────────────────────────────────────────────

/// One labelled bar scaled so the largest count fills `BAR_WIDTH` columns.
///
/// A non-zero count always shows at least one filled block so small
/// categories remain visible next to dominant ones.  Category charts style
/// the label column as a label; scale-based charts (hours, months) style it
/// as an axis.
fn bar_line<'a>(
    label: &str,
    count: u64,
    max: u64,
    bar_style: ratatui::style::Style,
    label_style: ratatui::style::Style,
    theme: &Theme,
) -> Line<'a> {
    let filled = if max == 0 {
        0
    } else {
        (((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize)
            .clamp(usize::from(count > 0), BAR_WIDTH)
    };

    Line::from(vec![
        Span::styled(pad_label(label), label_style),
        Span::styled(repeat_char(FILLED, filled), bar_style),
        Span::styled(repeat_char(EMPTY, BAR_WIDTH - filled), theme.dim),
        Span::styled(format!(" {}", format_count(count)), theme.value),
    ])
}

/// Truncate `label` to the label column and pad it to a fixed display width.
///
/// Width is measured in terminal columns, not bytes, so wide characters do
/// not break bar alignment.
fn pad_label(label: &str) -> String {
    let mut out = String::new();
    let mut width = 0;

    for ch in label.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > LABEL_WIDTH - 2 {
            out.push('\u{2026}'); // …
            width += 1;
            break;
        }
        out.push(ch);
        width += w;
    }

    for _ in width..LABEL_WIDTH {
        out.push(' ');
    }
    out
}

fn repeat_char(ch: char, n: usize) -> String {
    std::iter::repeat_n(ch, n).collect()
}

/// Wrap pre-built bar lines in the standard bordered panel.
fn render_bar_panel(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, theme: &Theme) {
    let body = if lines.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled("No data to plot", theme.warning)),
        ]
    } else {
        lines
    };

    frame.render_widget(
        Paragraph::new(body).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
