use crate::cli::commands::{date_or_today, open};
use crate::cli::parser::{Commands, UsageCmd};
use crate::config::Config;
use crate::core::context::require_active_project;
use crate::core::usage::{UsageEntry, UsageLogic};
use crate::db::catalog;
use crate::db::material_usage as store;
use crate::errors::{AppError, AppResult};
use crate::models::CatalogMaterial;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{fmt_money, format_date, format_number};
use crate::utils::table::{Column, Table};
use rusqlite::Connection;

/// Catalog entry by id, or by unique case-insensitive name.
pub(crate) fn resolve_material(conn: &Connection, key: &str) -> AppResult<CatalogMaterial> {
    match catalog::get_catalog_entry(conn, key) {
        Ok(m) => return Ok(m),
        Err(AppError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    let wanted = key.trim().to_lowercase();
    let mut matches: Vec<CatalogMaterial> = catalog::list_catalog(conn)?
        .into_iter()
        .filter(|m| m.name.to_lowercase() == wanted)
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(AppError::not_found("catalog material", key)),
        n => Err(AppError::validation(format!(
            "'{}' matches {} catalog materials; use the id",
            key, n
        ))),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Usage { action } = cmd else {
        return Ok(());
    };
    let pool = open(cfg)?;

    match action {
        UsageCmd::Add {
            material,
            quantity,
            thickness,
            date,
            notes,
        } => {
            let project = require_active_project(&pool.conn)?;
            let material = resolve_material(&pool.conn, material)?;
            let entry = UsageEntry {
                project_id: project.id.clone(),
                material_id: material.id.clone(),
                date: date_or_today(date.as_ref())?,
                input_quantity: *quantity,
                thickness_cm: *thickness,
                notes: notes.clone(),
            };
            let u = UsageLogic::record(&pool.conn, &entry)?;
            success(format!(
                "{}: {} {} = {} € ({})",
                u.material_name,
                format_number(u.final_quantity, 2),
                material.unit.symbol(),
                fmt_money(u.cost),
                u.id
            ));
        }

        UsageCmd::List { date } => {
            let project = require_active_project(&pool.conn)?;
            let day = date_or_today(date.as_ref())?;
            let rows = store::list_usage(&pool.conn, &project.id, day)?;
            if rows.is_empty() {
                info(format!("No material usage on {}.", format_date(day)));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Material"),
                Column::right("Input"),
                Column::right("Quantity"),
                Column::right("€/unit"),
                Column::right("Cost €"),
            ]);
            let mut total = 0.0;
            for u in &rows {
                total += u.cost;
                table.add_row(vec![
                    u.id.clone(),
                    u.material_name.clone(),
                    format!("{} {}", format_number(u.input_quantity, 2), u.input_unit.symbol()),
                    format_number(u.final_quantity, 2),
                    fmt_money(u.price_per_unit_at_time),
                    fmt_money(u.cost),
                ]);
            }
            print!("{}", table.render());
            println!("\nTotal: {} €", fmt_money(total));
        }

        UsageCmd::Delete { id } => {
            store::delete_usage(&pool.conn, id)?;
            success(format!("Usage {} deleted", id));
        }
    }
    Ok(())
}
