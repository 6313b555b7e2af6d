//! Nanosecond timestamps as stored by the content service.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Nanoseconds since the Unix epoch.
pub type Nanos = i64;

pub fn now_nanos() -> Nanos {
    to_nanos(Utc::now())
}

pub fn to_nanos(at: DateTime<Utc>) -> Nanos {
    // Out of range only past the year 2262.
    at.timestamp_nanos_opt().unwrap_or(i64::MAX)
}

pub fn to_datetime(ns: Nanos) -> DateTime<Utc> {
    Utc.timestamp_nanos(ns)
}

/// "January 1, 2024"
pub fn format_long_date(ns: Nanos) -> String {
    to_datetime(ns).format("%B %-d, %Y").to_string()
}

/// "Jan 1, 2024"
pub fn format_short_date(ns: Nanos) -> String {
    to_datetime(ns).format("%b %-d, %Y").to_string()
}

/// "Jan 1, 2024, 09:30 AM"
pub fn format_date_time(ns: Nanos) -> String {
    to_datetime(ns).format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Value for an `<input type="date">`.
pub fn date_input_value(ns: Nanos) -> String {
    to_datetime(ns).format("%Y-%m-%d").to_string()
}

/// Parses `YYYY-MM-DD` as midnight UTC.
pub fn parse_date_input(input: &str) -> Option<Nanos> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    midnight.timestamp_nanos_opt()
}
