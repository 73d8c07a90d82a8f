use super::material_type::MaterialType;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Length-based work item. `meters` is either typed in directly or derived
/// from the `from_km`/`to_km` chainage pair.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: String,
    pub project_id: String,
    pub material_type: MaterialType,
    pub from_km: Option<String>,
    pub to_km: Option<String>,
    pub meters: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub project_id: String,
    pub material_type: MaterialType,
    pub from_km: Option<String>,
    pub to_km: Option<String>,
    pub meters: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialUpdate {
    pub material_type: Option<MaterialType>,
    pub from_km: Option<Option<String>>,
    pub to_km: Option<Option<String>>,
    pub meters: Option<f64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub notes: Option<Option<String>>,
    pub photo_uri: Option<Option<String>>,
}
