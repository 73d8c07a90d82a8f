use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_hhmm() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Creation / modification stamp stored with every row.
pub fn timestamp() -> String {
    Local::now().to_rfc3339()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    input.map(|s| require_date(s)).transpose()
}

pub fn to_db(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Monday and Sunday of the ISO week containing `d`.
pub fn week_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = d.weekday().num_days_from_monday() as i64;
    let monday = d - chrono::Duration::days(offset);
    (monday, monday + chrono::Duration::days(6))
}
