use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse the leading `YYYY-MM-DD` of a date or datetime string
/// (`2024-05-01`, `2024-05-01T00:00:00.000Z`).
pub fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    s.trim().get(..10).and_then(parse_date)
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn next_day(d: NaiveDate) -> AppResult<NaiveDate> {
    d.succ_opt()
        .ok_or_else(|| AppError::InvalidDate(format!("no day after {}", format_date(d))))
}
