use crate::db::db_utils::{collect, date_col, delete_by_id, enum_col, opt_text_col};
use crate::db::log::audit;
use crate::db::pool::with_shared_transaction;
use crate::errors::{AppError, AppResult};
use crate::models::{MaterialUnit, MaterialUsage, NewMaterialUsage, UsageTotals, new_id};
use crate::utils::date::{timestamp, to_db};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_JOINED: &str = "SELECT u.*, c.name AS material_name
     FROM material_usage u
     JOIN materials_catalog c ON c.id = u.material_id";

pub fn map_usage(row: &Row) -> rusqlite::Result<MaterialUsage> {
    Ok(MaterialUsage {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        material_id: row.get("material_id")?,
        material_name: row.get("material_name")?,
        date: date_col(row, "date")?,
        input_quantity: row.get("input_quantity")?,
        input_unit: enum_col(row, "input_unit", MaterialUnit::from_db_str)?,
        thickness_cm: row.get("thickness_cm")?,
        final_quantity: row.get("final_quantity")?,
        cost: row.get("cost")?,
        price_per_unit_at_time: row.get("price_per_unit_at_time")?,
        notes: opt_text_col(row, "notes")?,
        created_at: row.get("created_at")?,
    })
}

/// Usage rows of one day joined to the catalog name, latest first.
pub fn list_usage(
    conn: &Connection,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<MaterialUsage>> {
    let sql = format!(
        "{} WHERE u.project_id = ?1 AND u.date = ?2 ORDER BY u.created_at DESC",
        SELECT_JOINED
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![project_id, to_db(date)], map_usage)?;
    collect(rows)
}

pub fn list_usage_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<MaterialUsage>> {
    let sql = format!(
        "{} WHERE u.project_id = ?1 AND u.date BETWEEN ?2 AND ?3
         ORDER BY u.date ASC, u.created_at ASC",
        SELECT_JOINED
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], map_usage)?;
    collect(rows)
}

pub fn get_usage(conn: &Connection, id: &str) -> AppResult<MaterialUsage> {
    let sql = format!("{} WHERE u.id = ?1", SELECT_JOINED);
    conn.query_row(&sql, [id], map_usage)
        .optional()?
        .ok_or_else(|| AppError::not_found("material usage", id))
}

/// Store a computed usage. Quantity, cost and the price snapshot come from
/// the caller (see `core::usage`).
pub fn create_usage(conn: &Connection, new: &NewMaterialUsage) -> AppResult<MaterialUsage> {
    with_shared_transaction(conn, |tx| {
        let id = new_id();
        tx.execute(
            "INSERT INTO material_usage
                (id, project_id, material_id, date, input_quantity, input_unit, thickness_cm,
                 final_quantity, cost, price_per_unit_at_time, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                id,
                new.project_id,
                new.material_id,
                to_db(new.date),
                new.input_quantity,
                new.input_unit.to_db_str(),
                new.thickness_cm,
                new.final_quantity,
                new.cost,
                new.price_per_unit_at_time,
                new.notes,
                timestamp(),
            ],
        )?;

        let usage = get_usage(tx, &id)?;
        audit(
            tx,
            "create",
            &id,
            &format!(
                "material usage {} {} of '{}'",
                usage.final_quantity,
                usage.input_unit.symbol(),
                usage.material_name
            ),
        )?;
        Ok(usage)
    })
}

pub fn delete_usage(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "material_usage", "material usage", id)?;
        audit(tx, "delete", id, "material usage")?;
        Ok(())
    })
}

pub fn usage_totals_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<UsageTotals> {
    let t = conn.query_row(
        "SELECT COALESCE(SUM(final_quantity), 0.0), COALESCE(SUM(cost), 0.0)
         FROM material_usage
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![project_id, to_db(from), to_db(to)],
        |row| {
            Ok(UsageTotals {
                total_quantity: row.get(0)?,
                total_cost: row.get(1)?,
            })
        },
    )?;
    Ok(t)
}
