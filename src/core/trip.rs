use crate::db::trips as store;
use crate::errors::{AppError, AppResult};
use crate::models::{NewTrip, Trip};
use crate::utils::validators::{require_non_blank, require_odometer};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct TripEntry {
    pub vehicle_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub from_location: String,
    pub to_location: String,
    /// `None` takes the vehicle's last known reading.
    pub start_odometer: Option<f64>,
    pub end_odometer: f64,
    pub purpose: String,
    pub notes: Option<String>,
}

pub struct TripLogic;

impl TripLogic {
    /// Distance of a trip; the end reading must be above the start reading.
    pub fn distance(start_odometer: f64, end_odometer: f64) -> AppResult<f64> {
        require_odometer(start_odometer)?;
        require_odometer(end_odometer)?;
        if end_odometer <= start_odometer {
            return Err(AppError::validation(format!(
                "end odometer {} must be greater than start odometer {}",
                end_odometer, start_odometer
            )));
        }
        Ok(end_odometer - start_odometer)
    }

    pub fn record(conn: &mut Connection, entry: &TripEntry) -> AppResult<Trip> {
        require_non_blank("from", &entry.from_location)?;
        require_non_blank("to", &entry.to_location)?;

        let start = match entry.start_odometer {
            Some(v) => v,
            None => store::last_odometer(conn, &entry.vehicle_id)?,
        };
        let distance = Self::distance(start, entry.end_odometer)?;

        let new = NewTrip {
            vehicle_id: entry.vehicle_id.clone(),
            project_id: entry.project_id.clone(),
            date: entry.date,
            start_time: entry.start_time,
            end_time: entry.end_time,
            from_location: entry.from_location.trim().to_string(),
            to_location: entry.to_location.trim().to_string(),
            start_odometer: start,
            end_odometer: entry.end_odometer,
            distance,
            purpose: entry.purpose.trim().to_string(),
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
        };
        store::create_trip(conn, &new)
    }
}
