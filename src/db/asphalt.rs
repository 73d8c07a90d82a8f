use crate::db::db_utils::{
    UpdateBuilder, collect, date_col, delete_by_id, enum_col, opt_text_col, time_col,
};
use crate::db::log::audit;
use crate::db::pool::with_shared_transaction;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AsphaltClass, AsphaltDelivery, AsphaltDeliveryUpdate, NewAsphaltDelivery, new_id,
};
use crate::utils::date::{timestamp, to_db};
use crate::utils::time::format_time;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeMap;

pub fn map_delivery(row: &Row) -> rusqlite::Result<AsphaltDelivery> {
    Ok(AsphaltDelivery {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        delivery_note: row.get("delivery_note")?,
        date: date_col(row, "date")?,
        time: time_col(row, "time")?,
        asphalt_class: enum_col(row, "asphalt_class", AsphaltClass::from_db_str)?,
        tons: row.get("tons")?,
        driver: opt_text_col(row, "driver")?,
        truck_number: opt_text_col(row, "truck_number")?,
        notes: opt_text_col(row, "notes")?,
        photo_uri: opt_text_col(row, "photo_uri")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Deliveries of one day, latest first.
pub fn list_deliveries(
    conn: &Connection,
    project_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<AsphaltDelivery>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM asphalt_deliveries
         WHERE project_id = ?1 AND date = ?2
         ORDER BY time DESC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(date)], map_delivery)?;
    collect(rows)
}

/// Deliveries in `[from, to]`, oldest first.
pub fn list_deliveries_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AsphaltDelivery>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM asphalt_deliveries
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, time ASC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], map_delivery)?;
    collect(rows)
}

pub fn get_delivery(conn: &Connection, id: &str) -> AppResult<AsphaltDelivery> {
    conn.query_row(
        "SELECT * FROM asphalt_deliveries WHERE id = ?1",
        [id],
        map_delivery,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("asphalt delivery", id))
}

pub fn create_delivery(conn: &Connection, new: &NewAsphaltDelivery) -> AppResult<AsphaltDelivery> {
    with_shared_transaction(conn, |tx| {
        let id = new_id();
        let now = timestamp();

        tx.execute(
            "INSERT INTO asphalt_deliveries
                (id, project_id, delivery_note, date, time, asphalt_class, tons,
                 driver, truck_number, notes, photo_uri, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
            params![
                id,
                new.project_id,
                new.delivery_note,
                to_db(new.date),
                format_time(new.time),
                new.asphalt_class.to_db_str(),
                new.tons,
                new.driver,
                new.truck_number,
                new.notes,
                new.photo_uri,
                now,
            ],
        )?;

        audit(
            tx,
            "create",
            &id,
            &format!(
                "asphalt delivery {} ({} t {})",
                new.delivery_note,
                new.tons,
                new.asphalt_class.label()
            ),
        )?;
        get_delivery(tx, &id)
    })
}

pub fn update_delivery(conn: &Connection, id: &str, upd: &AsphaltDeliveryUpdate) -> AppResult<()> {
    let mut b = UpdateBuilder::new("asphalt_deliveries", "asphalt delivery");
    b.set("delivery_note", upd.delivery_note.clone())
        .set_date("date", upd.date)
        .set_time("time", upd.time)
        .set(
            "asphalt_class",
            upd.asphalt_class.map(|c| c.to_db_str().to_string()),
        )
        .set("tons", upd.tons)
        .set_nullable("driver", upd.driver.clone())
        .set_nullable("truck_number", upd.truck_number.clone())
        .set_nullable("notes", upd.notes.clone())
        .set_nullable("photo_uri", upd.photo_uri.clone());
    let changed = b.len();
    b.touch("updated_at", timestamp());
    with_shared_transaction(conn, |tx| {
        b.execute(tx, id)?;
        if changed > 0 {
            audit(tx, "update", id, &format!("asphalt delivery: {} field(s)", changed))?;
        }
        Ok(())
    })
}

pub fn delete_delivery(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "asphalt_deliveries", "asphalt delivery", id)?;
        audit(tx, "delete", id, "asphalt delivery")
    })
}

/// Sum of tons for one day. Plain floating point sum, no rounding.
pub fn total_tons(conn: &Connection, project_id: &str, date: NaiveDate) -> AppResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(tons), 0.0) FROM asphalt_deliveries
         WHERE project_id = ?1 AND date = ?2",
        params![project_id, to_db(date)],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn total_tons_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(tons), 0.0) FROM asphalt_deliveries
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![project_id, to_db(from), to_db(to)],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Tons per asphalt class in `[from, to]`.
pub fn tons_by_class_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<BTreeMap<AsphaltClass, f64>> {
    let mut stmt = conn.prepare(
        "SELECT asphalt_class, SUM(tons) AS total FROM asphalt_deliveries
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         GROUP BY asphalt_class",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], |row| {
        Ok((
            enum_col(row, "asphalt_class", AsphaltClass::from_db_str)?,
            row.get::<_, f64>("total")?,
        ))
    })?;

    let mut out = BTreeMap::new();
    for (class, total) in collect(rows)? {
        out.insert(class, total);
    }
    Ok(out)
}
