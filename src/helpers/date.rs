//! Date helper functions

use chrono::NaiveDate;

/// Format a date in full form (like "January 5, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as YYYY-MM-DD, the form sitemaps and data files use
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
