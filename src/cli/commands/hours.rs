use crate::cli::commands::{date_or_today, open, time_or};
use crate::cli::parser::{Commands, HoursCmd};
use crate::config::Config;
use crate::core::context::require_active_project;
use crate::core::hours::{HoursEntry, HoursLogic};
use crate::db::{worker_hours as store, workers};
use crate::errors::{AppError, AppResult};
use crate::models::{Worker, WorkerStatus};
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::formatting::{fmt_hours, format_date, yes_no};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_time;
use rusqlite::Connection;
use std::collections::HashMap;

/// Worker by id, or by a unique (case-insensitive) full or last name.
fn resolve_worker(conn: &Connection, key: &str) -> AppResult<Worker> {
    match workers::get_worker(conn, key) {
        Ok(w) => return Ok(w),
        Err(AppError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    let wanted = key.trim().to_lowercase();
    let mut matches: Vec<Worker> = workers::list_workers(conn)?
        .into_iter()
        .filter(|w| {
            w.full_name().to_lowercase() == wanted || w.last_name.to_lowercase() == wanted
        })
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(AppError::not_found("worker", key)),
        n => Err(AppError::validation(format!(
            "'{}' matches {} workers; use the worker id",
            key, n
        ))),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Hours { action } = cmd else {
        return Ok(());
    };
    let mut pool = open(cfg)?;

    match action {
        HoursCmd::Set {
            worker,
            date,
            start,
            end,
            break_hours,
            status,
            overtime,
            notes,
        } => {
            let project = require_active_project(&pool.conn)?;
            let worker = resolve_worker(&pool.conn, worker)?;
            let status = WorkerStatus::from_code(status).ok_or_else(|| {
                AppError::validation(format!(
                    "unknown status '{}' (expected present, vacation, sick or absent)",
                    status
                ))
            })?;

            let entry = HoursEntry {
                worker_id: worker.id.clone(),
                project_id: project.id.clone(),
                date: date_or_today(date.as_ref())?,
                start_time: time_or(start.as_ref(), &cfg.default_start_time)?,
                end_time: time_or(end.as_ref(), &cfg.default_end_time)?,
                break_hours: break_hours.unwrap_or(cfg.default_break_hours),
                status,
                overtime: *overtime,
                notes: notes.clone(),
            };
            let saved = HoursLogic::record(&mut pool.conn, &entry)?;
            success(format!(
                "{} on {}: {} ({} h)",
                worker.full_name(),
                format_date(saved.date),
                saved.status.as_str(),
                fmt_hours(saved.total_hours)
            ));
        }

        HoursCmd::List { date } => {
            let project = require_active_project(&pool.conn)?;
            let day = date_or_today(date.as_ref())?;
            let rows = store::list_hours(&pool.conn, &project.id, day)?;
            if rows.is_empty() {
                info(format!("No hours on {}.", format_date(day)));
                return Ok(());
            }

            let names: HashMap<String, String> = workers::list_workers(&pool.conn)?
                .into_iter()
                .map(|w| (w.id.clone(), w.full_name()))
                .collect();

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Worker"),
                Column::left("Status"),
                Column::left("Start"),
                Column::left("End"),
                Column::right("Break"),
                Column::right("Hours"),
                Column::left("OT"),
            ]);
            for h in &rows {
                table.add_row(vec![
                    h.id.clone(),
                    names.get(&h.worker_id).cloned().unwrap_or_else(|| h.worker_id.clone()),
                    format!("{}{}{}", color_for_status(h.status), h.status.as_str(), RESET),
                    format_time(h.start_time),
                    format_time(h.end_time),
                    fmt_hours(h.break_hours),
                    fmt_hours(h.total_hours),
                    yes_no(h.overtime).to_string(),
                ]);
            }
            print!("{}", table.render());

            let totals = store::total_hours(&pool.conn, &project.id, day)?;
            println!(
                "\nTotal: {} h, {} worker(s) present",
                fmt_hours(totals.total_hours),
                totals.workers_count
            );
        }

        HoursCmd::Delete { id } => {
            store::delete_hours(&pool.conn, id)?;
            success(format!("Hours record {} deleted", id));
        }
    }
    Ok(())
}
