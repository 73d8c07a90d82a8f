//! Report aggregation: one value holding every enabled section for the
//! active project over a date range.

use crate::core::context::require_active_project;
use crate::db::pool::{DbPool, open_read_only};
use crate::db::{asphalt, material_usage, materials, trips, vehicles, worker_hours, workers};
use crate::errors::{AppError, AppResult};
use crate::export::model::{Report, SectionToggles, WorkerHourRow};
use crate::export::range::DateRange;
use crate::models::{
    AsphaltClass, AsphaltDelivery, HoursTotals, Material, MaterialType, MaterialUsage, Trip,
    UsageTotals, Worker, WorkerHours,
};
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Asphalt,
    Materials,
    MaterialUsage,
    Hours,
    Trips,
}

impl Section {
    fn enabled(toggles: &SectionToggles) -> Vec<Section> {
        let mut out = Vec::new();
        if toggles.asphalt {
            out.push(Section::Asphalt);
        }
        if toggles.materials {
            out.push(Section::Materials);
        }
        if toggles.material_usage {
            out.push(Section::MaterialUsage);
        }
        if toggles.hours {
            out.push(Section::Hours);
        }
        if toggles.vehicle {
            out.push(Section::Trips);
        }
        out
    }
}

enum SectionData {
    Asphalt(Vec<AsphaltDelivery>, f64, BTreeMap<AsphaltClass, f64>),
    Materials(Vec<Material>, BTreeMap<MaterialType, f64>),
    MaterialUsage(Vec<MaterialUsage>, UsageTotals),
    Hours(Vec<WorkerHours>, HoursTotals, Vec<Worker>),
    Trips(Vec<Trip>, f64),
}

fn fetch(conn: &Connection, section: Section, project_id: &str, r: DateRange) -> AppResult<SectionData> {
    let data = match section {
        Section::Asphalt => SectionData::Asphalt(
            asphalt::list_deliveries_range(conn, project_id, r.from, r.to)?,
            asphalt::total_tons_range(conn, project_id, r.from, r.to)?,
            asphalt::tons_by_class_range(conn, project_id, r.from, r.to)?,
        ),
        Section::Materials => SectionData::Materials(
            materials::list_materials_range(conn, project_id, r.from, r.to)?,
            materials::totals_by_type_range(conn, project_id, r.from, r.to)?,
        ),
        Section::MaterialUsage => SectionData::MaterialUsage(
            material_usage::list_usage_range(conn, project_id, r.from, r.to)?,
            material_usage::usage_totals_range(conn, project_id, r.from, r.to)?,
        ),
        Section::Hours => SectionData::Hours(
            worker_hours::list_hours_range(conn, project_id, r.from, r.to)?,
            worker_hours::total_hours_range(conn, project_id, r.from, r.to)?,
            workers::list_active_workers(conn)?,
        ),
        Section::Trips => SectionData::Trips(
            trips::list_trips_range(conn, project_id, r.from, r.to)?,
            trips::total_km_range(conn, project_id, r.from, r.to)?,
        ),
    };
    Ok(data)
}

/// Each section on its own read-only connection, in parallel. Sections do
/// not depend on each other.
fn fetch_parallel(
    path: &str,
    sections: &[Section],
    project_id: &str,
    range: DateRange,
) -> AppResult<Vec<SectionData>> {
    thread::scope(|s| {
        let handles: Vec<_> = sections
            .iter()
            .map(|&section| {
                s.spawn(move || -> AppResult<SectionData> {
                    let conn = open_read_only(path)?;
                    fetch(&conn, section, project_id, range)
                })
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        for h in handles {
            let data = h
                .join()
                .map_err(|_| AppError::Other("report fetch thread panicked".into()))??;
            out.push(data);
        }
        Ok(out)
    })
}

/// Hours rows with the roster name; workers no longer on the active roster
/// keep their raw id.
pub fn join_worker_names(rows: Vec<WorkerHours>, roster: &[Worker]) -> Vec<WorkerHourRow> {
    let names: HashMap<&str, String> = roster
        .iter()
        .map(|w| (w.id.as_str(), w.full_name()))
        .collect();

    rows.into_iter()
        .map(|hours| {
            let worker_name = names
                .get(hours.worker_id.as_str())
                .cloned()
                .unwrap_or_else(|| hours.worker_id.clone());
            WorkerHourRow { hours, worker_name }
        })
        .collect()
}

pub struct ReportService;

impl ReportService {
    /// Build the report for the active project. Fails with `NoActiveProject`
    /// before touching any section when none is selected.
    pub fn build(
        pool: &DbPool,
        range: DateRange,
        toggles: &SectionToggles,
        polier_name: &str,
    ) -> AppResult<Report> {
        let project = require_active_project(&pool.conn)?;

        let mut report = Report::empty(
            &project.name,
            project.location.clone(),
            polier_name,
            range.from,
            range.to,
            range.label(),
        );

        report.vehicle_name = vehicles::get_active_vehicle(&pool.conn)?.map(|v| v.display_name());

        let sections = Section::enabled(toggles);
        let results = match pool.file_path() {
            Some(path) if sections.len() > 1 => {
                fetch_parallel(&path, &sections, &project.id, range)?
            }
            // in-memory databases cannot be shared between connections
            _ => {
                let mut out = Vec::with_capacity(sections.len());
                for section in &sections {
                    out.push(fetch(&pool.conn, *section, &project.id, range)?);
                }
                out
            }
        };

        for data in results {
            match data {
                SectionData::Asphalt(rows, total, by_class) => {
                    report.asphalt_deliveries = rows;
                    report.asphalt_total = total;
                    report.asphalt_by_class = by_class;
                }
                SectionData::Materials(rows, summary) => {
                    report.materials = rows;
                    report.materials_summary = summary;
                }
                SectionData::MaterialUsage(rows, totals) => {
                    report.material_usage = rows;
                    report.usage_totals = totals;
                }
                SectionData::Hours(rows, totals, roster) => {
                    report.worker_hours = join_worker_names(rows, &roster);
                    report.total_hours = totals.total_hours;
                    report.workers_count = totals.workers_count;
                }
                SectionData::Trips(rows, km) => {
                    report.trips = rows;
                    report.total_km = km;
                }
            }
        }

        Ok(report)
    }
}
