use crate::models::WorkerStatus;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey out placeholders ("", "-", "--:--") in list output.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// present → green, sick → red, vacation/absent → yellow
pub fn color_for_status(status: WorkerStatus) -> &'static str {
    match status {
        WorkerStatus::Present => GREEN,
        WorkerStatus::Sick => RED,
        WorkerStatus::Vacation | WorkerStatus::Absent => YELLOW,
    }
}

/// Marker for the active project / vehicle in lists.
pub fn active_marker(active: bool) -> String {
    if active {
        format!("{GREEN}*{RESET}")
    } else {
        " ".to_string()
    }
}
