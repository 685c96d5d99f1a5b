use crate::Timestamp;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current timestamp in milliseconds.
///
/// Clocks set before the epoch yield 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as Timestamp)
}

/// Parses an RFC3339 date (e.g. `2024-05-01T12:00:00Z`) into epoch milliseconds.
pub(crate) fn parse_rfc3339(s: &str) -> Result<Timestamp, chrono::ParseError> {
    chrono::DateTime::parse_from_rfc3339(s).map(|dt| dt.timestamp_millis())
}

/// Distance between two timestamps in milliseconds.
#[must_use]
pub(crate) fn span(min: Timestamp, max: Timestamp) -> u64 {
    min.abs_diff(max)
}
