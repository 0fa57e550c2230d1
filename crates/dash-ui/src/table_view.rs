//! Raw-table preview for the cleaned dataset.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per record,
//! capped so very large uploads stay responsive, plus a footer noting how
//! many rows are hidden.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dash_core::formatting::format_count;
use dash_data::table::CleanTable;

use crate::themes::Theme;

/// Rows shown before the preview is cut off.
const PREVIEW_ROWS: usize = 200;
/// Widest a single cell may render, in terminal columns.
const CELL_WIDTH: usize = 22;

/// Render the cleaned table into `area`.
pub fn render_table_view(frame: &mut Frame, area: Rect, table: &CleanTable, theme: &Theme) {
    if table.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let header = Row::new(
        table
            .columns()
            .iter()
            .map(|name| Cell::from(clip(name)).style(theme.table_header)),
    )
    .height(1);

    let shown = table.len().min(PREVIEW_ROWS);
    let rows: Vec<Row> = (0..shown)
        .map(|i| {
            Row::new(table.row(i).iter().map(|cell| Cell::from(clip(cell))))
                .style(theme.row_style(i))
        })
        .collect();

    let widths: Vec<Constraint> = table
        .columns()
        .iter()
        .map(|_| Constraint::Length(CELL_WIDTH as u16))
        .collect();

    let hidden = table.len() - shown;
    let title = if hidden > 0 {
        format!(
            " Data Preview ({} rows, {} hidden) ",
            format_count(table.len() as u64),
            format_count(hidden as u64)
        )
    } else {
        format!(" Data Preview ({} rows) ", format_count(table.len() as u64))
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Render a placeholder when cleaning left no rows to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No rows survived cleaning", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Rows need both creation and modification dates.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Data Preview "),
        ),
        area,
    );
}

/// Clip a cell to the column width, appending an ellipsis when cut.
fn clip(cell: &str) -> String {
    if UnicodeWidthStr::width(cell) <= CELL_WIDTH {
        return cell.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in cell.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > CELL_WIDTH - 1 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('\u{2026}');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
