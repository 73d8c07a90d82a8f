//! Formatting utilities used for CLI and export outputs.
//! Numbers use a comma as decimal separator, as on the paper site diary.

use chrono::NaiveDate;

/// Fixed-precision number with `,` as decimal separator: `43.5` → `"43,5"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    // avoid "-0,0" for tiny negative sums
    let v = if value.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
        0.0
    } else {
        value
    };
    format!("{:.*}", decimals, v).replace('.', ",")
}

/// Tonnage and hours: one decimal.
pub fn fmt_tons(value: f64) -> String {
    format_number(value, 1)
}

pub fn fmt_hours(value: f64) -> String {
    format_number(value, 1)
}

/// Distances and counts: no decimals.
pub fn fmt_whole(value: f64) -> String {
    format_number(value, 0)
}

/// Currency and billed quantities: two decimals.
pub fn fmt_money(value: f64) -> String {
    format_number(value, 2)
}

/// `2024-03-01` → `01.03.2024`
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "" }
}

/// Keeps `[A-Za-z0-9]`, replaces everything else with `_` (file names).
pub fn sanitize_file_stem(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
