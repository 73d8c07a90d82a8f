//! One handler per top-level command, plus the argument helpers they share.

pub mod asphalt;
pub mod calc;
pub mod catalog;
pub mod config;
pub mod db;
pub mod export;
pub mod hours;
pub mod init;
pub mod log;
pub mod material;
pub mod project;
pub mod trip;
pub mod usage;
pub mod vehicle;
pub mod worker;

use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{parse_optional_date, require_date, today};
use crate::utils::time::{parse_optional_time, require_time};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};

/// Open the configured database, migrating it if needed.
pub(crate) fn open(cfg: &Config) -> AppResult<DbPool> {
    open_db(&cfg.database)
}

pub(crate) fn date_or_today(input: Option<&String>) -> AppResult<NaiveDate> {
    Ok(parse_optional_date(input)?.unwrap_or_else(today))
}

/// Current wall-clock time truncated to the minute.
pub(crate) fn time_or_now(input: Option<&String>) -> AppResult<NaiveTime> {
    match parse_optional_time(input)? {
        Some(t) => Ok(t),
        None => {
            let now = Local::now().time();
            Ok(NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now))
        }
    }
}

pub(crate) fn time_or(input: Option<&String>, default: &str) -> AppResult<NaiveTime> {
    match input {
        Some(t) => require_time(t),
        None => require_time(default),
    }
}

/// `--field ""` clears a nullable column, `--field x` sets it, absent leaves it.
pub(crate) fn clearable(input: Option<&String>) -> Option<Option<String>> {
    input.map(|v| {
        let v = v.trim();
        if v.is_empty() { None } else { Some(v.to_string()) }
    })
}

pub(crate) fn clearable_date(input: Option<&String>) -> AppResult<Option<Option<NaiveDate>>> {
    match clearable(input) {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(d)) => Ok(Some(Some(require_date(&d)?))),
    }
}

/// `"-"` stands in for an empty optional value in list output.
pub(crate) fn or_dash(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "-".to_string())
}
