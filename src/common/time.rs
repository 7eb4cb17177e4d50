//! Time-related utilities.
//!
//! The coordinator assigns every timestamp itself; clients never supply
//! one. Timestamps are UTC milliseconds internally and RFC 3339 on the
//! wire.

use chrono::{TimeZone, Utc};

/// Get the current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in UTC
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis / 1000;
    let nanos = ((timestamp_millis % 1000) * 1_000_000) as u32;
    match Utc.timestamp_opt(seconds, nanos) {
        chrono::LocalResult::Single(dt) => dt.to_rfc3339(),
        // Out-of-range timestamps cannot come from now_millis; fall back
        // to the epoch rather than panicking on a corrupted value.
        _ => Utc.timestamp_opt(0, 0).unwrap().to_rfc3339(),
    }
}
