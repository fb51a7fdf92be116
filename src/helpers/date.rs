//! Date helper functions

use chrono::NaiveDateTime;

use crate::content::parse_date_string;

/// Format a front-matter date string with a chrono format.
///
/// Returns `None` when the string is not a recognizable date.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-05", "%B %d, %Y") // -> Some("January 05, 2024")
/// ```
pub fn format_date(date: &str, format: &str) -> Option<String> {
    parse_date_string(date).map(|dt| format_datetime(&dt, format))
}

pub fn format_datetime(date: &NaiveDateTime, format: &str) -> String {
    date.format(format).to_string()
}

/// Format date in ISO 8601
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}
