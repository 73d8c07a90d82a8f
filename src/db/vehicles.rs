use crate::db::db_utils::{UpdateBuilder, bool_col, collect};
use crate::db::log::audit;
use crate::db::pool::{with_shared_transaction, with_transaction};
use crate::errors::{AppError, AppResult};
use crate::models::{NewVehicle, Vehicle, VehicleUpdate, new_id};
use crate::utils::date::timestamp;
use crate::utils::validators::{require_non_blank, require_odometer};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_vehicle(row: &Row) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get("id")?,
        make: row.get("make")?,
        model: row.get("model")?,
        registration_number: row.get("registration_number")?,
        current_odometer: row.get("current_odometer")?,
        active: bool_col(row, "active")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_vehicles(conn: &Connection) -> AppResult<Vec<Vehicle>> {
    let mut stmt =
        conn.prepare("SELECT * FROM vehicles ORDER BY active DESC, make ASC, model ASC")?;
    let rows = stmt.query_map([], map_vehicle)?;
    collect(rows)
}

pub fn get_vehicle(conn: &Connection, id: &str) -> AppResult<Vehicle> {
    conn.query_row("SELECT * FROM vehicles WHERE id = ?1", [id], map_vehicle)
        .optional()?
        .ok_or_else(|| AppError::not_found("vehicle", id))
}

/// Uniqueness of the flag is kept by `set_active_vehicle`, not by the
/// schema; if several rows carry it the most recently created one wins.
pub fn get_active_vehicle(conn: &Connection) -> AppResult<Option<Vehicle>> {
    let vehicle = conn
        .query_row(
            "SELECT * FROM vehicles WHERE active = 1 ORDER BY created_at DESC LIMIT 1",
            [],
            map_vehicle,
        )
        .optional()?;
    Ok(vehicle)
}

pub fn create_vehicle(conn: &mut Connection, new: &NewVehicle) -> AppResult<Vehicle> {
    require_non_blank("make", &new.make)?;
    require_non_blank("model", &new.model)?;
    require_non_blank("registration number", &new.registration_number)?;
    require_odometer(new.current_odometer)?;

    let id = new_id();
    with_transaction(conn, |tx| {
        if new.activate {
            tx.execute("UPDATE vehicles SET active = 0 WHERE active = 1", [])?;
        }
        tx.execute(
            "INSERT INTO vehicles
                (id, make, model, registration_number, current_odometer, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                new.make.trim(),
                new.model.trim(),
                new.registration_number.trim(),
                new.current_odometer,
                new.activate,
                timestamp(),
            ],
        )?;
        let vehicle = get_vehicle(tx, &id)?;
        audit(tx, "create", &id, &format!("vehicle {}", vehicle.display_name()))?;
        Ok(vehicle)
    })
}

pub fn update_vehicle(conn: &Connection, id: &str, upd: &VehicleUpdate) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        for (field, value) in [
            ("make", &upd.make),
            ("model", &upd.model),
            ("registration number", &upd.registration_number),
        ] {
            if let Some(v) = value {
                require_non_blank(field, v)?;
            }
        }

        let mut b = UpdateBuilder::new("vehicles", "vehicle");
        b.set("make", upd.make.as_ref().map(|v| v.trim().to_string()))
            .set("model", upd.model.as_ref().map(|v| v.trim().to_string()))
            .set(
                "registration_number",
                upd.registration_number.as_ref().map(|v| v.trim().to_string()),
            );
        let changed = b.len();
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, "vehicle")?;
        }
        Ok(())
    })
}

/// Make `id` the only active vehicle.
pub fn set_active_vehicle(conn: &mut Connection, id: &str) -> AppResult<()> {
    with_transaction(conn, |tx| {
        let vehicle = get_vehicle(tx, id)?;
        tx.execute("UPDATE vehicles SET active = 0 WHERE active = 1", [])?;
        tx.execute("UPDATE vehicles SET active = 1 WHERE id = ?1", [id])?;
        audit(tx, "activate", id, &format!("vehicle {}", vehicle.display_name()))?;
        Ok(())
    })
}

/// Overwrite the stored odometer. No monotonicity check here.
pub fn update_vehicle_odometer(conn: &Connection, id: &str, odometer: f64) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE vehicles SET current_odometer = ?1 WHERE id = ?2",
        params![odometer, id],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("vehicle", id));
    }
    Ok(())
}

/// Fails at the storage level while trips reference the vehicle.
pub fn delete_vehicle(conn: &Connection, id: &str) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        let removed = tx.execute("DELETE FROM vehicles WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(AppError::not_found("vehicle", id));
        }
        audit(tx, "delete", id, "vehicle")?;
        Ok(())
    })
}
