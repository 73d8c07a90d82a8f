use crate::db::db_utils::{
    UpdateBuilder, collect, date_col, delete_by_id, enum_col, opt_text_col, time_col,
};
use crate::db::log::audit;
use crate::db::pool::with_shared_transaction;
use crate::errors::{AppError, AppResult};
use crate::models::{Material, MaterialType, MaterialUpdate, NewMaterial, new_id};
use crate::utils::date::{timestamp, to_db};
use crate::utils::time::format_time;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeMap;

pub fn map_material(row: &Row) -> rusqlite::Result<Material> {
    Ok(Material {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        material_type: enum_col(row, "type", MaterialType::from_db_str)?,
        from_km: opt_text_col(row, "from_km")?,
        to_km: opt_text_col(row, "to_km")?,
        meters: row.get("meters")?,
        date: date_col(row, "date")?,
        time: time_col(row, "time")?,
        notes: opt_text_col(row, "notes")?,
        photo_uri: opt_text_col(row, "photo_uri")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_materials(
    conn: &Connection,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<Material>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM materials
         WHERE project_id = ?1 AND date = ?2
         ORDER BY time DESC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(date)], map_material)?;
    collect(rows)
}

pub fn list_materials_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Material>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM materials
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, time ASC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], map_material)?;
    collect(rows)
}

pub fn get_material(conn: &Connection, id: &str) -> AppResult<Material> {
    conn.query_row("SELECT * FROM materials WHERE id = ?1", [id], map_material)
        .optional()?
        .ok_or_else(|| AppError::not_found("material", id))
}

pub fn create_material(conn: &Connection, new: &NewMaterial) -> AppResult<Material> {
    with_shared_transaction(conn, |tx| {
        let id = new_id();

        tx.execute(
            "INSERT INTO materials
                (id, project_id, type, from_km, to_km, meters, date, time, notes, photo_uri, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                new.project_id,
                new.material_type.to_db_str(),
                new.from_km,
                new.to_km,
                new.meters,
                to_db(new.date),
                format_time(new.time),
                new.notes,
                new.photo_uri,
                timestamp(),
            ],
        )?;

        audit(
            tx,
            "create",
            &id,
            &format!("material {} ({} m)", new.material_type.label(), new.meters),
        )?;
        get_material(tx, &id)
    })
}

pub fn update_material(conn: &Connection, id: &str, upd: &MaterialUpdate) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        let mut b = UpdateBuilder::new("materials", "material");
        b.set("type", upd.material_type.map(|t| t.to_db_str().to_string()))
            .set_nullable("from_km", upd.from_km.clone())
            .set_nullable("to_km", upd.to_km.clone())
            .set("meters", upd.meters)
            .set_date("date", upd.date)
            .set_time("time", upd.time)
            .set_nullable("notes", upd.notes.clone())
            .set_nullable("photo_uri", upd.photo_uri.clone());
        let changed = b.len();
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, &format!("material: {} field(s)", changed))?;
        }
        Ok(())
    })
}

pub fn delete_material(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "materials", "material", id)?;
        audit(tx, "delete", id, "material")?;
        Ok(())
    })
}

fn grouped(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> AppResult<BTreeMap<MaterialType, f64>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok((
            enum_col(row, "type", MaterialType::from_db_str)?,
            row.get::<_, f64>("total")?,
        ))
    })?;

    let mut out = BTreeMap::new();
    for (kind, total) in collect(rows)? {
        out.insert(kind, total);
    }
    Ok(out)
}

/// Meters per material type for one day. Types without rows are absent.
pub fn totals_by_type(
    conn: &Connection,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<BTreeMap<MaterialType, f64>> {
    grouped(
        conn,
        "SELECT type, SUM(meters) AS total FROM materials
         WHERE project_id = ?1 AND date = ?2
         GROUP BY type",
        params![project_id, to_db(date)],
    )
}

pub fn totals_by_type_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<BTreeMap<MaterialType, f64>> {
    grouped(
        conn,
        "SELECT type, SUM(meters) AS total FROM materials
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         GROUP BY type",
        params![project_id, to_db(from), to_db(to)],
    )
}
