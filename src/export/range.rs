// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::week_bounds;
use crate::utils::formatting::format_date;
use chrono::{Duration, NaiveDate};

/// Report period as picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeKind {
    Today,
    Yesterday,
    /// Monday to Sunday around today.
    Week,
    Custom { from: NaiveDate, to: NaiveDate },
}

/// Inclusive date range. `from > to` is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn single(d: NaiveDate) -> Self {
        Self { from: d, to: d }
    }

    /// `today` comes from the caller's clock.
    pub fn resolve(kind: &RangeKind, today: NaiveDate) -> Self {
        match kind {
            RangeKind::Today => Self::single(today),
            RangeKind::Yesterday => Self::single(today - Duration::days(1)),
            RangeKind::Week => {
                let (from, to) = week_bounds(today);
                Self { from, to }
            }
            RangeKind::Custom { from, to } => Self {
                from: *from,
                to: *to,
            },
        }
    }

    /// `dd.mm.yyyy` for one day, `dd.mm.yyyy - dd.mm.yyyy` otherwise.
    pub fn label(&self) -> String {
        if self.from == self.to {
            format_date(self.from)
        } else {
            format!("{} - {}", format_date(self.from), format_date(self.to))
        }
    }
}

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidDate(format!("{} ({})", input, msg))
}

/// Parse `--range`.
///
/// Supports:
/// - today / yesterday / week
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - the same three forms as `start:end`
pub fn parse_range(r: &str) -> AppResult<RangeKind> {
    let r = r.trim();
    match r.to_lowercase().as_str() {
        "today" => return Ok(RangeKind::Today),
        "yesterday" => return Ok(RangeKind::Yesterday),
        "week" => return Ok(RangeKind::Week),
        _ => {}
    }

    let (from, to) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();
            if start.len() != end.len() {
                return Err(bad("start and end must have the same format", r));
            }
            let (from, _) = period_bounds(start)?;
            let (_, to) = period_bounds(end)?;
            (from, to)
        }
        None => period_bounds(r)?,
    };

    Ok(RangeKind::Custom { from, to })
}

/// First and last day of a year, month or single day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if !p.is_ascii() {
        return Err(bad("unsupported range format", p));
    }
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| bad("invalid year", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", p))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let (y, m) = p.split_once('-').ok_or_else(|| bad("invalid month", p))?;
            let y: i32 = y.parse().map_err(|_| bad("invalid year", p))?;
            let m: u32 = m.parse().map_err(|_| bad("invalid month", p))?;
            let last = month_last_day(y, m).ok_or_else(|| bad("invalid month", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| bad("invalid month", p))?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| bad("invalid month", p))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad("invalid date", p))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported range format", p)),
    }
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}
