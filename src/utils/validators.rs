//! Field validators used by the data-entry paths before any write.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn delivery_note_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4,8}$").expect("static regex"))
}

fn truck_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-ZÄÖÜa-zäöü]{1,3}-[A-ZÄÖÜa-zäöü]{1,2}\s?\d{1,4}$").expect("static regex")
    })
}

pub const MAX_TONS: f64 = 100.0;
pub const MAX_ODOMETER: f64 = 1_000_000.0;

/// Strict mode: 4 to 8 digits. Otherwise any non-blank text.
pub fn is_valid_delivery_note(number: &str, strict: bool) -> bool {
    if strict {
        delivery_note_re().is_match(number)
    } else {
        !number.trim().is_empty()
    }
}

pub fn is_valid_tons(tons: f64) -> bool {
    tons.is_finite() && tons > 0.0 && tons < MAX_TONS
}

/// German plate, e.g. `OF-AB 1234`. Empty means "not given" and passes.
pub fn is_valid_truck_number(number: &str) -> bool {
    number.is_empty() || truck_re().is_match(number)
}

pub fn is_valid_odometer(value: f64) -> bool {
    value.is_finite() && (0.0..MAX_ODOMETER).contains(&value)
}

pub fn require_delivery_note(number: &str, strict: bool) -> AppResult<()> {
    if is_valid_delivery_note(number, strict) {
        Ok(())
    } else if strict {
        Err(AppError::validation(format!(
            "delivery note number '{number}' must have 4 to 8 digits"
        )))
    } else {
        Err(AppError::validation("delivery note number cannot be empty"))
    }
}

pub fn require_tons(tons: f64) -> AppResult<()> {
    if is_valid_tons(tons) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "tonnage must be between 0 and {MAX_TONS} (got {tons})"
        )))
    }
}

pub fn require_truck_number(number: &str) -> AppResult<()> {
    if is_valid_truck_number(number) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "truck registration '{number}' is not a valid plate (e.g. OF-AB 1234)"
        )))
    }
}

pub fn require_odometer(value: f64) -> AppResult<()> {
    if is_valid_odometer(value) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "odometer reading {value} is out of range"
        )))
    }
}

pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}
