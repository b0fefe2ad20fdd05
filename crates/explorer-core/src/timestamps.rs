use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

/// Ordered list of date-time patterns seen across the three city exports.
///
/// The canonical export format is `2017-01-01 00:00:36`; older extracts use
/// ISO `T` separators or US-locale `6/1/2017 9:30` forms.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a trip timestamp string into a [`NaiveDateTime`].
///
/// Tries each recognised pattern in order, then falls back to a bare date
/// (midnight). Returns `None` for empty or unrecognised input, logging a
/// warning so skipped rows are visible at `RUST_LOG=warn`.
pub fn parse_trip_time(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    // Date-only values use NaiveDate.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    warn!("could not parse trip timestamp \"{}\"", trimmed);
    None
}
