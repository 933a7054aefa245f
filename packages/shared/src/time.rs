//! Time-related utilities.
//!
//! Timestamps are Unix milliseconds in UTC; they are only rendered to a
//! string at the edges (HTTP responses, client output).

use chrono::{DateTime, Local, Utc};

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339()
}

/// Format Unix timestamp (milliseconds) as local wall-clock time (`HH:MM:SS`)
pub fn timestamp_to_local_clock(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}
