//! Clock access and timestamp parsing shared across the client.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// Parses an RFC 3339 timestamp into unix milliseconds.
///
/// Returns `None` for empty, unparsable, or zero-date sentinel values.
pub fn parse_rfc3339_ms(raw: &str) -> Option<i64> {
    if crate::format::is_zero_date(raw) {
        return None;
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|instant| instant.timestamp_millis())
}
