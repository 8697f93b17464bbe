// Formatting helpers for the photo card and summary screens
use chrono::{DateTime, Local, Utc};

/// Formats a byte count the way the photo card shows it (B, KB, MB)
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size < KB {
        format!("{} B", size)
    } else if size < MB {
        format!("{} KB", size / KB)
    } else {
        format!("{:.1} MB", size as f64 / MB as f64)
    }
}

/// Capture time in local time, minute precision
pub fn format_taken_at(taken_at: &DateTime<Utc>) -> String {
    taken_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Fraction of the batch already decided, clamped to 0.0..=1.0
pub fn calculate_progress(decided: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (decided as f64 / total as f64).min(1.0)
}
