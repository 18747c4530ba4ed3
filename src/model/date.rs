use chrono::{Local, NaiveDate};

/// Returns the local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
