//! Time utilities for daily bucketing
//!
//! Every date produced here is a UTC calendar date in ISO 8601 form
//! (`YYYY-MM-DD`).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Date format used for every bucket key
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert milliseconds since the Unix epoch to a UTC date
///
/// Returns `None` for timestamps chrono cannot represent.
///
/// # Examples
/// ```
/// use fiber_analytics::utils::time::millis_to_iso_date;
/// assert_eq!(millis_to_iso_date(0).as_deref(), Some("1970-01-01"));
/// assert_eq!(millis_to_iso_date(1_704_067_199_999).as_deref(), Some("2023-12-31"));
/// assert_eq!(millis_to_iso_date(1_704_067_200_000).as_deref(), Some("2024-01-01"));
/// ```
pub fn millis_to_iso_date(millis: u64) -> Option<String> {
    let millis = i64::try_from(millis).ok()?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(ISO_DATE_FORMAT).to_string())
}

/// Extract the UTC date from an RFC 3339 timestamp
///
/// Offsets are normalised to UTC first, so `2024-01-01T01:00:00+02:00` falls
/// on 2023-12-31. A bare `YYYY-MM-DD` string is accepted unchanged.
///
/// # Examples
/// ```
/// use fiber_analytics::utils::time::rfc3339_to_iso_date;
/// assert_eq!(rfc3339_to_iso_date("2024-03-05T10:00:00Z").as_deref(), Some("2024-03-05"));
/// assert_eq!(rfc3339_to_iso_date("not a date"), None);
/// ```
pub fn rfc3339_to_iso_date(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).format(ISO_DATE_FORMAT).to_string());
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
}
