use crate::core::calculator::chainage::{chainage_distance, normalize_chainage, require_chainage};
use crate::db::materials as store;
use crate::errors::{AppError, AppResult};
use crate::models::{Material, MaterialType, NewMaterial};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

/// How the length of a work item was entered.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialLength {
    Meters(f64),
    Chainage { from: String, to: String },
}

#[derive(Debug, Clone)]
pub struct MaterialEntry {
    pub project_id: String,
    pub material_type: MaterialType,
    pub length: MaterialLength,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
}

pub struct MaterialLogic;

impl MaterialLogic {
    /// Meters plus the (normalised) chainage pair to store.
    pub fn resolve_length(
        length: &MaterialLength,
    ) -> AppResult<(f64, Option<String>, Option<String>)> {
        match length {
            MaterialLength::Meters(m) => {
                if !m.is_finite() || *m <= 0.0 {
                    return Err(AppError::validation("length must be greater than 0 m"));
                }
                Ok((*m, None, None))
            }
            MaterialLength::Chainage { from, to } => {
                let from = normalize_chainage(from.trim());
                let to = normalize_chainage(to.trim());
                require_chainage(&from)?;
                require_chainage(&to)?;

                let meters = chainage_distance(&from, &to);
                if meters <= 0 {
                    return Err(AppError::validation(format!(
                        "chainage {} → {} gives {} m; 'to' must lie after 'from'",
                        from, to, meters
                    )));
                }
                Ok((meters as f64, Some(from), Some(to)))
            }
        }
    }

    pub fn record(conn: &Connection, entry: &MaterialEntry) -> AppResult<Material> {
        let (meters, from_km, to_km) = Self::resolve_length(&entry.length)?;

        let new = NewMaterial {
            project_id: entry.project_id.clone(),
            material_type: entry.material_type,
            from_km,
            to_km,
            meters,
            date: entry.date,
            time: entry.time,
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
            photo_uri: entry.photo_uri.clone(),
        };
        store::create_material(conn, &new)
    }
}
