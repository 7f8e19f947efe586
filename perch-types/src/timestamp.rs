//! Timestamp formatting shared by the storage layer and the API.
//!
//! Timestamps are persisted as fixed-width UTC RFC3339 text with microsecond
//! precision and a `Z` suffix. The fixed width matters: cursor pagination
//! compares stored timestamps as strings, which is only correct when
//! lexicographic order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp for storage and cursor comparison.
pub fn to_store(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp back into a `DateTime<Utc>`.
///
/// Accepts any RFC3339 input so rows written by older builds still load.
pub fn from_store(s: &str) -> chrono::ParseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}
