use super::worker_status::WorkerStatus;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub created_at: String,
}

impl Worker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Attendance for one worker, on one project, on one day.
/// (worker_id, project_id, date) is unique.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerHours {
    pub id: String,
    pub worker_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_hours: f64,
    pub total_hours: f64,
    pub status: WorkerStatus,
    pub overtime: bool,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Input of the hours upsert. `total_hours` is computed by the caller
/// (see `core::hours`), the storage layer stores it as given.
#[derive(Debug, Clone)]
pub struct NewWorkerHours {
    pub worker_id: String,
    pub project_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_hours: f64,
    pub total_hours: f64,
    pub status: WorkerStatus,
    pub overtime: bool,
    pub notes: Option<String>,
}

/// Sum of present hours and number of distinct present workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HoursTotals {
    pub total_hours: f64,
    pub workers_count: i64,
}
