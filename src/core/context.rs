//! Active project / vehicle resolution.

use crate::db::{projects, vehicles};
use crate::errors::{AppError, AppResult};
use crate::models::{Project, Vehicle};
use rusqlite::Connection;

pub fn require_active_project(conn: &Connection) -> AppResult<Project> {
    projects::get_active_project(conn)?.ok_or(AppError::NoActiveProject)
}

pub fn require_active_vehicle(conn: &Connection) -> AppResult<Vehicle> {
    vehicles::get_active_vehicle(conn)?.ok_or(AppError::NoActiveVehicle)
}

/// Explicit id wins; otherwise the active project.
pub fn resolve_project(conn: &Connection, explicit: Option<&str>) -> AppResult<Project> {
    match explicit {
        Some(id) => projects::get_project(conn, id),
        None => require_active_project(conn),
    }
}

pub fn resolve_vehicle(conn: &Connection, explicit: Option<&str>) -> AppResult<Vehicle> {
    match explicit {
        Some(id) => vehicles::get_vehicle(conn, id),
        None => require_active_vehicle(conn),
    }
}
