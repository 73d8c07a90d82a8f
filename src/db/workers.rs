use crate::db::db_utils::{UpdateBuilder, bool_col, collect, delete_by_id};
use crate::db::log::audit;
use crate::db::pool::with_shared_transaction;
use crate::errors::{AppError, AppResult};
use crate::models::{Worker, WorkerUpdate, new_id};
use crate::utils::date::timestamp;
use crate::utils::validators::require_non_blank;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_worker(row: &Row) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        active: bool_col(row, "active")?,
        created_at: row.get("created_at")?,
    })
}

/// Current roster, ordered by last name then first name.
pub fn list_active_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM workers WHERE active = 1
         ORDER BY last_name ASC, first_name ASC",
    )?;
    let rows = stmt.query_map([], map_worker)?;
    collect(rows)
}

/// Everyone, active workers first.
pub fn list_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM workers
         ORDER BY active DESC, last_name ASC, first_name ASC",
    )?;
    let rows = stmt.query_map([], map_worker)?;
    collect(rows)
}

pub fn get_worker(conn: &Connection, id: &str) -> AppResult<Worker> {
    conn.query_row("SELECT * FROM workers WHERE id = ?1", [id], map_worker)
        .optional()?
        .ok_or_else(|| AppError::not_found("worker", id))
}

pub fn create_worker(conn: &Connection, first_name: &str, last_name: &str) -> AppResult<Worker> {
    with_shared_transaction(conn, |tx| {
        require_non_blank("first name", first_name)?;
        require_non_blank("last name", last_name)?;

        let id = new_id();
        tx.execute(
            "INSERT INTO workers (id, first_name, last_name, active, created_at)
             VALUES (?1, ?2, ?3, 1, ?4)",
            params![id, first_name.trim(), last_name.trim(), timestamp()],
        )?;

        audit(
            tx,
            "create",
            &id,
            &format!("worker {} {}", first_name.trim(), last_name.trim()),
        )?;
        get_worker(tx, &id)
    })
}

pub fn update_worker(conn: &Connection, id: &str, upd: &WorkerUpdate) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        if let Some(n) = &upd.first_name {
            require_non_blank("first name", n)?;
        }
        if let Some(n) = &upd.last_name {
            require_non_blank("last name", n)?;
        }

        let mut b = UpdateBuilder::new("workers", "worker");
        b.set("first_name", upd.first_name.as_ref().map(|n| n.trim().to_string()))
            .set("last_name", upd.last_name.as_ref().map(|n| n.trim().to_string()));
        let changed = b.len();
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, "worker")?;
        }
        Ok(())
    })
}

/// Soft delete / re-enable on the roster.
pub fn set_worker_active(conn: &Connection, id: &str, active: bool) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        let mut b = UpdateBuilder::new("workers", "worker");
        b.set("active", Some(active));
        b.execute(tx, id)?;

        let op = if active { "activate" } else { "deactivate" };
        audit(tx, op, id, "worker")?;
        Ok(())
    })
}

/// Hard delete. Fails at the storage level while hours reference the worker.
pub fn delete_worker(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "workers", "worker", id)?;
        audit(tx, "delete", id, "worker")?;
        Ok(())
    })
}
