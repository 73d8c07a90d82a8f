// src/export/model.rs

use crate::models::{
    AsphaltClass, AsphaltDelivery, Material, MaterialType, MaterialUsage, Trip, UsageTotals,
    WorkerHours,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which report sections are fetched and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionToggles {
    pub asphalt: bool,
    pub materials: bool,
    pub material_usage: bool,
    pub hours: bool,
    pub vehicle: bool,
}

impl SectionToggles {
    pub fn all() -> Self {
        Self {
            asphalt: true,
            materials: true,
            material_usage: true,
            hours: true,
            vehicle: true,
        }
    }

    pub fn none() -> Self {
        Self {
            asphalt: false,
            materials: false,
            material_usage: false,
            hours: false,
            vehicle: false,
        }
    }

    pub fn any(&self) -> bool {
        self.asphalt || self.materials || self.material_usage || self.hours || self.vehicle
    }

    /// `"asphalt,hours"`; `"all"` enables everything.
    pub fn from_list(list: &str) -> Option<Self> {
        let mut t = Self::none();
        for part in list.split(',').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "" => {}
                "all" => t = Self::all(),
                "asphalt" => t.asphalt = true,
                "materials" | "material" => t.materials = true,
                "usage" | "material_usage" | "material-usage" => t.material_usage = true,
                "hours" => t.hours = true,
                "vehicle" | "trips" => t.vehicle = true,
                _ => return None,
            }
        }
        Some(t)
    }
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Hours row joined to the worker's display name.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerHourRow {
    #[serde(flatten)]
    pub hours: WorkerHours,
    pub worker_name: String,
}

/// Everything the renderers need, already aggregated. Disabled sections are
/// present but empty, with zero totals.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub project_name: String,
    pub project_location: Option<String>,
    pub polier_name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub date_label: String,

    pub asphalt_deliveries: Vec<AsphaltDelivery>,
    pub asphalt_total: f64,
    pub asphalt_by_class: BTreeMap<AsphaltClass, f64>,

    pub materials: Vec<Material>,
    pub materials_summary: BTreeMap<MaterialType, f64>,

    pub material_usage: Vec<MaterialUsage>,
    pub usage_totals: UsageTotals,

    pub worker_hours: Vec<WorkerHourRow>,
    pub workers_count: i64,
    pub total_hours: f64,

    pub trips: Vec<Trip>,
    pub total_km: f64,
    pub vehicle_name: Option<String>,
}

impl Report {
    /// Empty report for a project and range; sections are filled in by the
    /// aggregation service.
    pub fn empty(
        project_name: &str,
        project_location: Option<String>,
        polier_name: &str,
        from: NaiveDate,
        to: NaiveDate,
        date_label: String,
    ) -> Self {
        Self {
            project_name: project_name.to_string(),
            project_location,
            polier_name: polier_name.to_string(),
            from,
            to,
            date_label,
            asphalt_deliveries: Vec::new(),
            asphalt_total: 0.0,
            asphalt_by_class: BTreeMap::new(),
            materials: Vec::new(),
            materials_summary: BTreeMap::new(),
            material_usage: Vec::new(),
            usage_totals: UsageTotals::default(),
            worker_hours: Vec::new(),
            workers_count: 0,
            total_hours: 0.0,
            trips: Vec::new(),
            total_km: 0.0,
            vehicle_name: None,
        }
    }
}
