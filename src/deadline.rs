//! Deadline parsing and formatting.
//!
//! Deadlines are persisted as formatted strings with minute precision.
//! Create/edit accept only the 12-hour form; the notification scan also
//! accepts a 24-hour fallback left behind by hand-edited rows.

use chrono::NaiveDateTime;

use crate::errors::{AppError, AppResult};

pub const PRIMARY_FORMAT: &str = "%Y-%m-%d %I:%M %p";
pub const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Combine separate date and time inputs into a deadline. Only the primary
/// `YYYY-MM-DD hh:mm AM/PM` form is accepted for writes.
pub fn combine(date: &str, time: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), PRIMARY_FORMAT)
        .map_err(|_| AppError::InvalidDeadlineFormat)
}

/// Canonical stored representation.
pub fn format(deadline: NaiveDateTime) -> String {
    deadline.format(PRIMARY_FORMAT).to_string()
}

/// Parse a stored deadline, trying the primary format then the 24-hour
/// fallback. `None` means the row is unscannable and should be skipped.
pub fn parse_lenient(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, PRIMARY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, FALLBACK_FORMAT))
        .ok()
}

/// Split a stored deadline into date and time strings for form
/// pre-population. Unparseable strings are split on the first space so the
/// user still gets both fields; this is display-only, never persisted.
pub fn split_for_edit(raw: &str) -> (String, String) {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, PRIMARY_FORMAT) {
        (
            parsed.format("%Y-%m-%d").to_string(),
            parsed.format("%I:%M %p").to_string(),
        )
    } else {
        match raw.split_once(' ') {
            Some((date, time)) => (date.to_string(), time.to_string()),
            None => (raw.to_string(), String::new()),
        }
    }
}
