//! Chainage (road position) arithmetic: `"<km>+<mmm>"`, e.g. `"2+350"` is
//! 2350 m from the section origin.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn chainage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\+\d{3}$").expect("static regex"))
}

pub fn is_valid_chainage(s: &str) -> bool {
    chainage_re().is_match(s)
}

/// Well-formed and small enough to count in meters.
pub fn require_chainage(s: &str) -> AppResult<()> {
    if is_valid_chainage(s) && chainage_meters(s).is_some() {
        Ok(())
    } else {
        Err(AppError::InvalidChainage(s.to_string()))
    }
}

fn segments(s: &str) -> (Option<i64>, Option<i64>) {
    let mut parts = s.split('+');
    let km = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    let m = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    (km, m)
}

/// Meter offset, or `None` when a segment is missing or the value does not
/// fit in an `i64`.
pub fn chainage_meters(s: &str) -> Option<i64> {
    let (km, m) = segments(s);
    km?.checked_mul(1000)?.checked_add(m?)
}

/// Absolute meter offset. Missing or non-numeric segments count as zero,
/// so callers validate with [`require_chainage`] first. Saturates instead of
/// overflowing.
pub fn parse_chainage(s: &str) -> i64 {
    let (km, m) = segments(s);
    km.unwrap_or(0)
        .saturating_mul(1000)
        .saturating_add(m.unwrap_or(0))
}

/// `to - from` in meters; negative when entered out of order.
pub fn chainage_distance(from: &str, to: &str) -> i64 {
    parse_chainage(to).saturating_sub(parse_chainage(from))
}

pub fn format_chainage(meters: i64) -> String {
    let sign = if meters < 0 { "-" } else { "" };
    let m = meters.unsigned_abs();
    format!("{}{}+{:03}", sign, m / 1000, m % 1000)
}

/// Tidy user input: drop everything but digits and `+`, pad meters to three
/// digits (`"1+5"` → `"1+005"`). Already well-formed input is returned as is.
pub fn normalize_chainage(s: &str) -> String {
    if is_valid_chainage(s) {
        return s.to_string();
    }

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    match cleaned.split_once('+') {
        Some((km, m)) => format!("{}+{:0>3}", km, m),
        None => s.to_string(),
    }
}
