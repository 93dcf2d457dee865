//! Calendar-date helpers shared by the ingestor and the sync pipeline.
//!
//! Archive names, cache keys and log lines all use the same `YYYY-MM-DD` day
//! stamp, and the published-archive-to-trading-day mapping is plain day
//! arithmetic, so both live here as free functions.

use chrono::{Duration, NaiveDate};

/// Returns `date` shifted by `n` calendar days (negative `n` shifts backwards).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Formats a date as the `YYYY-MM-DD` stamp used in archive names and cache rows.
pub fn day_stamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
