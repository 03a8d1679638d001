//! State freshness markers, rendered as RFC 850 timestamps
//! (`Monday, 02-Jan-06 15:04:05 UTC`).

use crate::error::ResourceResult;
use chrono::{DateTime, Utc};

const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

pub fn format_rfc850(at: DateTime<Utc>) -> String {
    at.format(RFC850_FORMAT).to_string()
}

pub fn now_marker() -> String {
    format_rfc850(Utc::now())
}

/// Converts a catalog `lastModifiedDate` into a freshness marker.
///
/// The server sends local-less timestamps with a variable sub-second
/// fragment (`2024-01-15T10:30:00.123456`); the fragment is dropped and the
/// remainder read as UTC.
pub fn freshness_marker(last_modified: &str) -> ResourceResult<String> {
    let seconds = last_modified.split('.').next().unwrap_or_default();
    let rfc3339 = format!("{}Z", seconds.trim_end_matches('Z'));
    let parsed = DateTime::parse_from_rfc3339(&rfc3339)?;
    Ok(format_rfc850(parsed.with_timezone(&Utc)))
}
