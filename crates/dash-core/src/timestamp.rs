use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses the variety of date-time spellings found in exported report tables.
pub struct TimestampParser;

impl TimestampParser {
    /// Attempt to parse a CSV cell into a UTC [`DateTime`].
    ///
    /// Handles RFC 3339 / ISO 8601 (including a bare `Z` suffix), RFC 2822,
    /// and a series of common strftime-like patterns, with and without a
    /// time-of-day component. Returns `None` for empty or unrecognised
    /// strings — the cleaning pipeline stores the `None` and keeps the row.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
        let normalised = if let Some(stripped) = s.strip_suffix('Z') {
            format!("{}+00:00", stripped)
        } else {
            s.to_string()
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(&Utc));
        }

        const FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%d",
            "%m/%d/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M",
            "%m/%d/%Y",
        ];

        for fmt in FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
            // Date-only patterns need NaiveDate.
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
                let naive = date.and_hms_opt(0, 0, 0)?;
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        warn!("TimestampParser: could not parse date-time string {:?}", s);
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
