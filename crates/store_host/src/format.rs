//! Pure display helpers for entry fields.
//!
//! Helpers that need a clock take `now_ms` explicitly so callers inside the
//! render pipeline stay deterministic; [`crate::time::unix_time_ms_now`]
//! supplies the live value at the UI boundary.

use crate::time::parse_rfc3339_ms;

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Returns `true` for the backend's zero-date sentinel or an empty value.
pub fn is_zero_date(raw: &str) -> bool {
    raw.is_empty() || raw.starts_with("0001-01-01")
}

/// Formats a byte count with binary units, trimming trailing zeros.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0usize;
    let mut scale = 1u64;
    while unit + 1 < BYTE_UNITS.len() && bytes >= scale * 1024 {
        unit += 1;
        scale *= 1024;
    }
    let value = bytes as f64 / scale as f64;
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    format!("{} {}", text, BYTE_UNITS[unit])
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, `-` when unset or invalid.
///
/// The timestamp is rendered in the offset the server sent it with.
pub fn format_date_time(raw: &str) -> String {
    if is_zero_date(raw) {
        return "-".to_string();
    }
    match chrono::DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(instant) => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => "-".to_string(),
    }
}

/// Returns `true` when the expiry timestamp lies in the past.
///
/// Zero dates mean "no expiry" and are never expired.
pub fn is_expired(raw: &str, now_ms: i64) -> bool {
    match parse_rfc3339_ms(raw) {
        Some(expiry_ms) => expiry_ms < now_ms,
        None => false,
    }
}

/// Returns `true` when the expiry is in the future but closer than
/// `threshold_hours`.
pub fn is_near_expiry(raw: &str, now_ms: i64, threshold_hours: i64) -> bool {
    match parse_rfc3339_ms(raw) {
        Some(expiry_ms) => {
            let diff = expiry_ms - now_ms;
            diff > 0 && diff < threshold_hours * MS_PER_HOUR
        }
        None => false,
    }
}

/// Human-readable time until expiry.
///
/// Under one hour shows minutes, 72 hours and over shows days, anything in
/// between shows hours. Past timestamps read `Expired`; unset ones render
/// empty.
pub fn time_remaining(raw: &str, now_ms: i64) -> String {
    let Some(expiry_ms) = parse_rfc3339_ms(raw) else {
        return String::new();
    };
    let diff = expiry_ms - now_ms;
    if diff <= 0 {
        return "Expired".to_string();
    }

    let minutes = diff / MS_PER_MINUTE;
    let hours = diff / MS_PER_HOUR;
    let days = diff / MS_PER_DAY;

    if hours < 1 {
        if minutes > 0 {
            format!("{minutes}m")
        } else {
            "< 1m".to_string()
        }
    } else if hours >= 72 {
        format!("{days}d")
    } else {
        format!("{hours}h")
    }
}

/// Picks the row icon for an entry name.
pub fn file_icon(name: &str, is_dir: bool) -> &'static str {
    if is_dir {
        return "📁";
    }
    let extension = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => "📕",
        "zip" | "gz" | "tar" | "7z" => "📦",
        "jpg" | "png" | "gif" | "svg" => "🖼️",
        "txt" | "log" => "📄",
        "go" => "🐹",
        "js" | "ts" => "📜",
        "html" => "🌐",
        "css" => "🎨",
        "sh" | "bash" => "🐚",
        "json" | "yaml" | "yml" => "⚙️",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn formats_bytes_with_trimmed_decimals() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5000), "4.88 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn oversized_counts_stay_in_gigabytes() {
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn formats_date_time_and_falls_back_to_dash() {
        assert_eq!(
            format_date_time("2026-03-01T09:05:07Z"),
            "2026-03-01 09:05:07"
        );
        assert_eq!(format_date_time("0001-01-01T00:00:00Z"), "-");
        assert_eq!(format_date_time(""), "-");
        assert_eq!(format_date_time("yesterday"), "-");
    }

    #[test]
    fn expiry_predicates_respect_the_zero_date() {
        let now = 1_000_000 * HOUR_MS;
        assert!(!is_expired("0001-01-01T00:00:00Z", now));
        assert!(!is_near_expiry("0001-01-01T00:00:00Z", now, 24));

        assert!(is_expired("1970-01-01T00:00:01Z", now));
        assert!(!is_near_expiry("1970-01-01T00:00:01Z", now, 24));
    }

    #[test]
    fn near_expiry_window_is_future_only() {
        let now_ms = parse_rfc3339_ms("2026-03-01T00:00:00Z").expect("now");
        assert!(is_near_expiry("2026-03-01T10:00:00Z", now_ms, 24));
        assert!(!is_near_expiry("2026-03-03T00:00:00Z", now_ms, 24));
        assert!(!is_near_expiry("2026-02-28T00:00:00Z", now_ms, 24));
    }

    #[test]
    fn time_remaining_scales_units() {
        let now_ms = parse_rfc3339_ms("2026-03-01T00:00:00Z").expect("now");
        assert_eq!(time_remaining("2026-03-01T00:00:30Z", now_ms), "< 1m");
        assert_eq!(time_remaining("2026-03-01T00:45:00Z", now_ms), "45m");
        assert_eq!(time_remaining("2026-03-01T05:00:00Z", now_ms), "5h");
        assert_eq!(time_remaining("2026-03-03T23:00:00Z", now_ms), "71h");
        assert_eq!(time_remaining("2026-03-04T00:00:00Z", now_ms), "3d");
        assert_eq!(time_remaining("2026-02-28T00:00:00Z", now_ms), "Expired");
        assert_eq!(time_remaining("0001-01-01T00:00:00Z", now_ms), "");
    }

    #[test]
    fn icons_follow_the_extension_table() {
        assert_eq!(file_icon("build", true), "📁");
        assert_eq!(file_icon("release.tar", false), "📦");
        assert_eq!(file_icon("Photo.PNG", false), "🖼️");
        assert_eq!(file_icon("config.yaml", false), "⚙️");
        assert_eq!(file_icon("mystery.bin", false), "📄");
        assert_eq!(file_icon("no_extension", false), "📄");
    }
}
