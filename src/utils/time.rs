//! Time utilities: parsing HH:MM dose times and RFC 3339 timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveTime, Utc};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Every entry must be a 24h `HH:MM` time.
pub fn validate_times(times: &[String]) -> AppResult<()> {
    for t in times {
        if t.len() != 5 || parse_time(t).is_none() {
            return Err(AppError::InvalidTime(t.clone()));
        }
    }
    Ok(())
}

/// Split a comma separated list such as `08:00,20:00`, dropping blanks.
pub fn split_times(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an RFC 3339 timestamp (any offset) into UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_timestamp(s)).transpose()
}

/// Short local rendering used in listings.
pub fn display_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
