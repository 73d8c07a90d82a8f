use super::material_unit::MaterialUnit;
use crate::core::calculator::Conversion;
use chrono::NaiveDate;
use serde::Serialize;

/// Priced material definition.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogMaterial {
    pub id: String,
    pub name: String,
    pub unit: MaterialUnit,
    pub price_per_unit: f64,
    /// t/m³, only meaningful for mass-priced materials laid as a layer.
    pub density: Option<f64>,
    pub category: Option<String>,
    pub created_at: String,
}

impl CatalogMaterial {
    pub fn conversion(&self) -> Conversion {
        Conversion::for_catalog(self.unit, self.density)
    }
}

#[derive(Debug, Clone)]
pub struct NewCatalogMaterial {
    pub name: String,
    pub unit: MaterialUnit,
    pub price_per_unit: f64,
    pub density: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogMaterialUpdate {
    pub name: Option<String>,
    pub unit: Option<MaterialUnit>,
    pub price_per_unit: Option<f64>,
    pub density: Option<Option<f64>>,
    pub category: Option<Option<String>>,
}

/// Consumption of a catalog material on a project. The price is a snapshot
/// of the catalog price at entry time.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialUsage {
    pub id: String,
    pub project_id: String,
    pub material_id: String,
    /// Joined from the catalog when read.
    pub material_name: String,
    pub date: NaiveDate,
    pub input_quantity: f64,
    pub input_unit: MaterialUnit,
    pub thickness_cm: Option<f64>,
    pub final_quantity: f64,
    pub cost: f64,
    pub price_per_unit_at_time: f64,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMaterialUsage {
    pub project_id: String,
    pub material_id: String,
    pub date: NaiveDate,
    pub input_quantity: f64,
    pub input_unit: MaterialUnit,
    pub thickness_cm: Option<f64>,
    pub final_quantity: f64,
    pub cost: f64,
    pub price_per_unit_at_time: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageTotals {
    pub total_quantity: f64,
    pub total_cost: f64,
}
