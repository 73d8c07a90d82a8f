use crate::core::calculator::paving::{UsageQuote, quote_usage};
use crate::db::{catalog, material_usage as store};
use crate::errors::AppResult;
use crate::models::{CatalogMaterial, MaterialUsage, NewMaterialUsage};
use chrono::NaiveDate;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub project_id: String,
    pub material_id: String,
    pub date: NaiveDate,
    pub input_quantity: f64,
    pub thickness_cm: Option<f64>,
    pub notes: Option<String>,
}

pub struct UsageLogic;

impl UsageLogic {
    /// Quantity and cost at the current catalog price, nothing is stored.
    pub fn preview(
        material: &CatalogMaterial,
        input_quantity: f64,
        thickness_cm: Option<f64>,
    ) -> AppResult<UsageQuote> {
        let conversion = material.conversion();
        let thickness = if conversion.needs_thickness() {
            thickness_cm
        } else {
            None
        };
        quote_usage(conversion, input_quantity, thickness, material.price_per_unit)
    }

    /// Store a usage with the catalog price frozen into the row.
    pub fn record(conn: &Connection, entry: &UsageEntry) -> AppResult<MaterialUsage> {
        let material = catalog::get_catalog_entry(conn, &entry.material_id)?;
        let conversion = material.conversion();
        let quote = Self::preview(&material, entry.input_quantity, entry.thickness_cm)?;

        let new = NewMaterialUsage {
            project_id: entry.project_id.clone(),
            material_id: material.id.clone(),
            date: entry.date,
            input_quantity: entry.input_quantity,
            input_unit: conversion.input_unit(),
            thickness_cm: if conversion.needs_thickness() {
                entry.thickness_cm
            } else {
                None
            },
            final_quantity: quote.final_quantity,
            cost: quote.cost,
            price_per_unit_at_time: material.price_per_unit,
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
        };
        store::create_usage(conn, &new)
    }
}
