use crate::db::db_utils::{bool_col, collect, date_col, delete_by_id, enum_col, opt_text_col, time_col};
use crate::db::log::audit;
use crate::db::pool::{with_shared_transaction, with_transaction};
use crate::errors::{AppError, AppResult};
use crate::models::{HoursTotals, NewWorkerHours, WorkerHours, WorkerStatus, new_id};
use crate::utils::date::{timestamp, to_db};
use crate::utils::time::format_time;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_hours(row: &Row) -> rusqlite::Result<WorkerHours> {
    Ok(WorkerHours {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        project_id: row.get("project_id")?,
        date: date_col(row, "date")?,
        start_time: time_col(row, "start_time")?,
        end_time: time_col(row, "end_time")?,
        break_hours: row.get("break_hours")?,
        total_hours: row.get("total_hours")?,
        status: enum_col(row, "status", WorkerStatus::from_db_str)?,
        overtime: bool_col(row, "overtime")?,
        notes: opt_text_col(row, "notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_hours(
    conn: &Connection,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<WorkerHours>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM worker_hours
         WHERE project_id = ?1 AND date = ?2
         ORDER BY start_time DESC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(date)], map_hours)?;
    collect(rows)
}

pub fn list_hours_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<WorkerHours>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM worker_hours
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, start_time ASC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], map_hours)?;
    collect(rows)
}

pub fn get_hours(conn: &Connection, id: &str) -> AppResult<WorkerHours> {
    conn.query_row("SELECT * FROM worker_hours WHERE id = ?1", [id], map_hours)
        .optional()?
        .ok_or_else(|| AppError::not_found("worker hours", id))
}

/// Record for one (worker, project, date), if any.
pub fn find_hours(
    conn: &Connection,
    worker_id: &str,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<Option<WorkerHours>> {
    let found = conn
        .query_row(
            "SELECT * FROM worker_hours
             WHERE worker_id = ?1 AND project_id = ?2 AND date = ?3",
            params![worker_id, project_id, to_db(date)],
            map_hours,
        )
        .optional()?;
    Ok(found)
}

/// Insert or update keyed by (worker_id, project_id, date). Lookup and write
/// run in one transaction; the unique index backs the key as well.
/// Non-present statuses are stored with zero hours.
pub fn upsert_worker_hours(conn: &mut Connection, input: &NewWorkerHours) -> AppResult<WorkerHours> {
    let total_hours = if input.status.is_present() {
        input.total_hours
    } else {
        0.0
    };

    with_transaction(conn, |tx| {
        let existing = find_hours(tx, &input.worker_id, &input.project_id, input.date)?;

        let id = match existing {
            Some(row) => {
                tx.execute(
                    "UPDATE worker_hours
                     SET start_time = ?1, end_time = ?2, break_hours = ?3, total_hours = ?4,
                         status = ?5, overtime = ?6, notes = ?7
                     WHERE id = ?8",
                    params![
                        format_time(input.start_time),
                        format_time(input.end_time),
                        input.break_hours,
                        total_hours,
                        input.status.to_db_str(),
                        input.overtime,
                        input.notes,
                        row.id,
                    ],
                )?;
                audit(tx, "update", &row.id, &format!("worker hours {}", to_db(input.date)))?;
                row.id
            }
            None => {
                let id = new_id();
                tx.execute(
                    "INSERT INTO worker_hours
                        (id, worker_id, project_id, date, start_time, end_time, break_hours,
                         total_hours, status, overtime, notes, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    params![
                        id,
                        input.worker_id,
                        input.project_id,
                        to_db(input.date),
                        format_time(input.start_time),
                        format_time(input.end_time),
                        input.break_hours,
                        total_hours,
                        input.status.to_db_str(),
                        input.overtime,
                        input.notes,
                        timestamp(),
                    ],
                )?;
                audit(tx, "create", &id, &format!("worker hours {}", to_db(input.date)))?;
                id
            }
        };

        get_hours(tx, &id)
    })
}

pub fn delete_hours(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "worker_hours", "worker hours", id)?;
        audit(tx, "delete", id, "worker hours")?;
        Ok(())
    })
}

fn totals(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<HoursTotals> {
    let t = conn.query_row(sql, params, |row| {
        Ok(HoursTotals {
            total_hours: row.get(0)?,
            workers_count: row.get(1)?,
        })
    })?;
    Ok(t)
}

/// Present hours and distinct present workers for one day.
pub fn total_hours(conn: &Connection, project_id: &str, date: NaiveDate) -> AppResult<HoursTotals> {
    totals(
        conn,
        "SELECT COALESCE(SUM(total_hours), 0.0), COUNT(DISTINCT worker_id)
         FROM worker_hours
         WHERE project_id = ?1 AND date = ?2 AND status = 'present'",
        params![project_id, to_db(date)],
    )
}

pub fn total_hours_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<HoursTotals> {
    totals(
        conn,
        "SELECT COALESCE(SUM(total_hours), 0.0), COUNT(DISTINCT worker_id)
         FROM worker_hours
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3 AND status = 'present'",
        params![project_id, to_db(from), to_db(to)],
    )
}
