//! Icon-prefixed, coloured status lines for the terminal.

use crate::errors::AppError;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

/// Warnings go to stderr so piped report text stays clean.
pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}==================== {}{}", FG_BLUE, BOLD, msg, RESET);
}

/// Top-level error line, with a next step for the missing-selection cases.
pub fn report_error(e: &AppError) {
    error(e);
    match e {
        AppError::NoActiveProject => {
            eprintln!("   Try: polierlog project list / polierlog project activate <id>")
        }
        AppError::NoActiveVehicle => {
            eprintln!("   Try: polierlog vehicle list / polierlog vehicle activate <id>")
        }
        AppError::MaterialInUse { .. } => {
            eprintln!("   Delete its usage records first (polierlog usage list).")
        }
        _ => {}
    }
}
