//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime used by ecsign, always in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO 8601 with second precision: "2024-01-01T00:00:00Z"
///
/// This is the exact on-wire timestamp format. Sub-second precision is
/// truncated, never rounded.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse an ISO 8601 timestamp like "2024-01-01T00:00:00Z" into DateTime.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
        .map_err(|e| Error::unexpected(format!("parse timestamp {s} failed")).with_source(e))?;
    Ok(t.and_utc())
}
