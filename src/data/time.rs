//! Epoch-millisecond clock helpers and time range presets.

use chrono::{Local, TimeZone};

/// Operator-selectable time ranges for the sliding window, as (label, minutes).
pub const RANGE_PRESETS: &[(&str, u32)] = &[
    ("5 min", 5),
    ("15 min", 15),
    ("1 hour", 60),
    ("6 hours", 360),
    ("24 hours", 1440),
];

/// Current wall clock in epoch milliseconds.
pub fn epoch_ms_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an epoch-ms timestamp as a local wall clock time, e.g. "14:03:27".
pub fn format_clock(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Format an epoch-ms timestamp as a full local date and time.
pub fn format_full(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Label for a range in minutes, falling back to "{n} min" off-preset.
pub fn range_label(minutes: u32) -> String {
    for (label, preset) in RANGE_PRESETS {
        if *preset == minutes {
            return (*label).to_string();
        }
    }
    format!("{} min", minutes)
}
