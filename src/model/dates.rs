// File: ./src/model/dates.rs
// Normalizes the feed's display dates into comparable calendar dates.
use chrono::{Datelike, NaiveDate};

/// Parses a display date like "1. 11. 2025", "1.11.2025" or "1 11 2025" into
/// a calendar date. Components are read positionally as day, month, year.
///
/// Returns `None` for anything that does not yield three parseable numbers.
/// Callers must treat `None` as "unknown date", not as a failure: records
/// with unknown dates stay visible in unfiltered listings and are only
/// excluded from date-dependent views.
///
/// Impossible combinations (day 31 in a 30 day month, month 13) are handed
/// to `NaiveDate::from_ymd_opt` and its rejection is accepted as-is, which
/// also maps them to `None`.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() < 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date back into the feed's display convention ("1. 11. 2025").
pub fn format_display(date: NaiveDate) -> String {
    format!("{}. {}. {}", date.day(), date.month(), date.year())
}
