//! Formatting helpers shared by front ends that render engine output.

use chrono::{DateTime, Local};
use std::path::Path;

/// Timestamp layout used when rendering file times.
pub const FILE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder shown when the platform could not report a timestamp.
pub const UNKNOWN_TIME: &str = "????-??-?? ??:??:??";

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Renders an optional file timestamp in local time.
pub fn format_file_time(time: Option<&DateTime<Local>>) -> String {
    match time {
        Some(time) => time.format(FILE_TIME_FORMAT).to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Human readable size rendering.
pub fn print_size(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];
    let mut value = bytes as f64;
    let mut idx = 0usize;

    while value >= 1024.0 && idx < SUFFIXES.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }

    if idx == 0 {
        format!("{:.0} {}", value, SUFFIXES[idx])
    } else {
        format!("{:.1} {}", value, SUFFIXES[idx])
    }
}
