//! Time utilities: parsing HH:MM, minute-of-day conversions, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("static regex"))
}

/// 24h `H:MM` / `HH:MM`, 00:00 to 23:59.
pub fn is_valid_time(t: &str) -> bool {
    time_re().is_match(t)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    if !is_valid_time(t) {
        return None;
    }
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| require_time(s)).transpose()
}

/// `"HH:MM"` → minute of day.
pub fn time_to_minutes(t: &str) -> AppResult<i64> {
    let time = require_time(t)?;
    Ok(naive_to_minutes(time))
}

pub fn naive_to_minutes(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Minute of day → `"HH:MM"`. Values past midnight are not wrapped.
pub fn minutes_to_time(mins: i64) -> String {
    let m = mins.max(0);
    format!("{:02}:{:02}", m / 60, m % 60)
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}
