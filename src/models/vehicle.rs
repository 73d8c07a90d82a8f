use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub registration_number: String,
    pub current_odometer: f64,
    pub active: bool,
    pub created_at: String,
}

impl Vehicle {
    /// `Mercedes Sprinter (OF-AB 1234)`
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.registration_number)
    }
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub registration_number: String,
    pub current_odometer: f64,
    pub activate: bool,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub make: Option<String>,
    pub model: Option<String>,
    pub registration_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub from_location: String,
    pub to_location: String,
    pub start_odometer: f64,
    pub end_odometer: f64,
    pub distance: f64,
    pub purpose: String,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub vehicle_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub from_location: String,
    pub to_location: String,
    pub start_odometer: f64,
    pub end_odometer: f64,
    pub distance: f64,
    pub purpose: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TripUpdate {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub start_odometer: Option<f64>,
    pub end_odometer: Option<f64>,
    pub distance: Option<f64>,
    pub purpose: Option<String>,
    pub notes: Option<Option<String>>,
}

/// Suggested trip purposes; any free text is accepted.
pub const TRIP_PURPOSES: [&str; 6] = [
    "Drive to site",
    "Return from site",
    "Material purchase",
    "Crew transport",
    "Client visit",
    "Other",
];
