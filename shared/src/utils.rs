use chrono::{DateTime, Local, Utc};

/// Returns the trimmed text, or `None` when nothing but whitespace is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Local calendar date, as shown next to history entries.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
