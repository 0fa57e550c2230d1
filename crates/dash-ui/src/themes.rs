use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by dash-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Menu ─────────────────────────────────────────────────────────────────
    pub menu_item: Style,
    pub menu_selected: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Primary bar fill.
    pub bar: Style,
    /// Alternate bar fill for two-series charts.
    pub bar_alt: Style,
    pub axis: Style,
    /// Time-series line.
    pub series: Style,

    // ── Heatmap scale ────────────────────────────────────────────────────────
    /// Zero-count cell.
    pub heat_empty: Style,
    /// Count in the lower third of the observed range.
    pub heat_low: Style,
    /// Count in the middle third.
    pub heat_medium: Style,
    /// Count in the upper third.
    pub heat_high: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            menu_item: Style::default().fg(Color::Gray),
            menu_selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Cyan),
            bar_alt: Style::default().fg(Color::Magenta),
            axis: Style::default().fg(Color::DarkGray),
            series: Style::default().fg(Color::Green),

            heat_empty: Style::default().fg(Color::DarkGray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Yellow),
            heat_high: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            menu_item: Style::default().fg(Color::DarkGray),
            menu_selected: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Blue),
            bar_alt: Style::default().fg(Color::Magenta),
            axis: Style::default().fg(Color::Gray),
            series: Style::default().fg(Color::Green),

            heat_empty: Style::default().fg(Color::Gray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Yellow),
            heat_high: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            menu_item: Style::default().fg(Color::Gray),
            menu_selected: Style::default().fg(Color::Cyan),

            bar: Style::default().fg(Color::Cyan),
            bar_alt: Style::default().fg(Color::Magenta),
            axis: Style::default().fg(Color::DarkGray),
            series: Style::default().fg(Color::Green),

            heat_empty: Style::default().fg(Color::DarkGray),
            heat_low: Style::default().fg(Color::Green),
            heat_medium: Style::default().fg(Color::Yellow),
            heat_high: Style::default().fg(Color::Red),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the heatmap cell style for `count` against the largest count in
    /// the matrix.
    ///
    /// * `0`               → `heat_empty`
    /// * lower third       → `heat_low`
    /// * middle third      → `heat_medium`
    /// * upper third       → `heat_high`
    pub fn heat_style(&self, count: u64, max: u64) -> Style {
        if count == 0 || max == 0 {
            self.heat_empty
        } else if count * 3 <= max {
            self.heat_low
        } else if count * 3 <= max * 2 {
            self.heat_medium
        } else {
            self.heat_high
        }
    }

    /// Alternating row style for table bodies.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
