use crate::db::log::{LogEntry, list_entries};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

/// Colour of the operation word in the audit listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "create" => Colour::Green,
        "delete" => Colour::Red,
        "update" => Colour::Yellow,
        "activate" | "deactivate" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` cut down to `max` visible characters.
fn op_target(entry: &LogEntry, max: usize) -> String {
    let full = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    if full.chars().count() > max {
        let mut s: String = full.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        full
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One formatted line per audit entry, oldest first.
    pub fn render(entries: &[LogEntry], colored: bool) -> Vec<String> {
        let mut entries: Vec<&LogEntry> = entries.iter().collect();
        entries.sort_by_key(|e| e.id);

        let op_w = entries
            .iter()
            .map(|e| op_target(e, OP_TARGET_MAX).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        entries
            .into_iter()
            .map(|e| {
                let visible = op_target(e, OP_TARGET_MAX);
                let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

                let shown = if colored {
                    let color = color_for_operation(&e.operation);
                    match visible.split_once(' ') {
                        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                        None => color.paint(visible.as_str()).to_string(),
                    }
                } else {
                    visible
                };

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    e.date,
                    shown,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let entries = list_entries(&pool.conn, limit)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in Self::render(&entries, true) {
            println!("{line}");
        }
        Ok(())
    }
}
