use crate::db::db_utils::{UpdateBuilder, collect, date_col, delete_by_id, opt_text_col, time_col};
use crate::db::log::audit;
use crate::db::pool::{with_shared_transaction, with_transaction};
use crate::db::vehicles::{get_vehicle, update_vehicle_odometer};
use crate::errors::{AppError, AppResult};
use crate::models::{NewTrip, Trip, TripUpdate, new_id};
use crate::utils::date::{timestamp, to_db};
use crate::utils::time::format_time;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_trip(row: &Row) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get("id")?,
        vehicle_id: row.get("vehicle_id")?,
        project_id: row.get("project_id")?,
        date: date_col(row, "date")?,
        start_time: time_col(row, "start_time")?,
        end_time: time_col(row, "end_time")?,
        from_location: row.get("from_location")?,
        to_location: row.get("to_location")?,
        start_odometer: row.get("start_odometer")?,
        end_odometer: row.get("end_odometer")?,
        distance: row.get("distance")?,
        purpose: row.get("purpose")?,
        notes: opt_text_col(row, "notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_trips(conn: &Connection, project_id: &str, date: NaiveDate) -> AppResult<Vec<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM trips
         WHERE project_id = ?1 AND date = ?2
         ORDER BY start_time DESC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(date)], map_trip)?;
    collect(rows)
}

pub fn list_trips_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM trips
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, start_time ASC",
    )?;
    let rows = stmt.query_map(params![project_id, to_db(from), to_db(to)], map_trip)?;
    collect(rows)
}

pub fn get_trip(conn: &Connection, id: &str) -> AppResult<Trip> {
    conn.query_row("SELECT * FROM trips WHERE id = ?1", [id], map_trip)
        .optional()?
        .ok_or_else(|| AppError::not_found("trip", id))
}

/// Insert a trip and move the vehicle odometer to its end reading, both or
/// neither. The new odometer is taken as given, even when lower than before.
pub fn create_trip(conn: &mut Connection, new: &NewTrip) -> AppResult<Trip> {
    let id = new_id();

    with_transaction(conn, |tx| {
        tx.execute(
            "INSERT INTO trips
                (id, vehicle_id, project_id, date, start_time, end_time, from_location,
                 to_location, start_odometer, end_odometer, distance, purpose, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                id,
                new.vehicle_id,
                new.project_id,
                to_db(new.date),
                format_time(new.start_time),
                format_time(new.end_time),
                new.from_location,
                new.to_location,
                new.start_odometer,
                new.end_odometer,
                new.distance,
                new.purpose,
                new.notes,
                timestamp(),
            ],
        )?;

        update_vehicle_odometer(tx, &new.vehicle_id, new.end_odometer)?;

        audit(
            tx,
            "create",
            &id,
            &format!(
                "trip {} -> {} ({} km)",
                new.from_location, new.to_location, new.distance
            ),
        )?;
        get_trip(tx, &id)
    })
}

/// Odometer to pre-fill the next trip: end reading of the vehicle's latest
/// trip, or its stored odometer when it has none.
pub fn last_odometer(conn: &Connection, vehicle_id: &str) -> AppResult<f64> {
    let last: Option<f64> = conn
        .query_row(
            "SELECT end_odometer FROM trips
             WHERE vehicle_id = ?1
             ORDER BY date DESC, end_time DESC
             LIMIT 1",
            [vehicle_id],
            |row| row.get(0),
        )
        .optional()?;

    match last {
        Some(v) => Ok(v),
        None => Ok(get_vehicle(conn, vehicle_id)?.current_odometer),
    }
}

/// Edits trip fields only; the vehicle odometer is left as it is.
pub fn update_trip(conn: &Connection, id: &str, upd: &TripUpdate) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        let mut b = UpdateBuilder::new("trips", "trip");
        b.set_time("start_time", upd.start_time)
            .set_time("end_time", upd.end_time)
            .set("from_location", upd.from_location.clone())
            .set("to_location", upd.to_location.clone())
            .set("start_odometer", upd.start_odometer)
            .set("end_odometer", upd.end_odometer)
            .set("distance", upd.distance)
            .set("purpose", upd.purpose.clone())
            .set_nullable("notes", upd.notes.clone());
        let changed = b.len();
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, &format!("trip: {} field(s)", changed))?;
        }
        Ok(())
    })
}

pub fn delete_trip(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        delete_by_id(tx, "trips", "trip", id)?;
        audit(tx, "delete", id, "trip")?;
        Ok(())
    })
}

pub fn total_km(conn: &Connection, project_id: &str, date: NaiveDate) -> AppResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(distance), 0.0) FROM trips
         WHERE project_id = ?1 AND date = ?2",
        params![project_id, to_db(date)],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn total_km_range(
    conn: &Connection,
    project_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(distance), 0.0) FROM trips
         WHERE project_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![project_id, to_db(from), to_db(to)],
        |row| row.get(0),
    )?;
    Ok(total)
}
