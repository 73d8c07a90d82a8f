use crate::core::calculator::hours::{ShiftHours, shift_hours};
use crate::db::{worker_hours as store, workers};
use crate::errors::{AppError, AppResult};
use crate::models::{NewWorkerHours, WorkerHours, WorkerStatus};
use crate::ui::messages::warning;
use crate::utils::time::format_time;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct HoursEntry {
    pub worker_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_hours: f64,
    pub status: WorkerStatus,
    pub overtime: bool,
    pub notes: Option<String>,
}

pub struct HoursLogic;

impl HoursLogic {
    /// Hours to store for an entry. Anything but `present` counts zero.
    pub fn compute(entry: &HoursEntry) -> AppResult<ShiftHours> {
        if !entry.break_hours.is_finite() || entry.break_hours < 0.0 {
            return Err(AppError::validation("break must be 0 hours or more"));
        }
        if !entry.status.is_present() {
            return Ok(ShiftHours {
                net_minutes: 0.0,
                hours: 0.0,
            });
        }
        shift_hours(
            &format_time(entry.start_time),
            &format_time(entry.end_time),
            entry.break_hours,
        )
    }

    /// Save the day for one worker, replacing an earlier record of the same
    /// (worker, project, date).
    pub fn record(conn: &mut Connection, entry: &HoursEntry) -> AppResult<WorkerHours> {
        let worker = workers::get_worker(conn, &entry.worker_id)?;
        let shift = Self::compute(entry)?;

        if shift.was_clamped() {
            warning(format!(
                "{}: {} - {} with {} h break gives no working time; stored as 0 h.",
                worker.full_name(),
                format_time(entry.start_time),
                format_time(entry.end_time),
                entry.break_hours
            ));
        }

        let input = NewWorkerHours {
            worker_id: entry.worker_id.clone(),
            project_id: entry.project_id.clone(),
            date: entry.date,
            start_time: entry.start_time,
            end_time: entry.end_time,
            break_hours: entry.break_hours,
            total_hours: shift.hours,
            status: entry.status,
            overtime: entry.overtime,
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
        };
        store::upsert_worker_hours(conn, &input)
    }
}
