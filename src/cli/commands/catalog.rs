use crate::cli::commands::{clearable, open, or_dash};
use crate::cli::parser::{CatalogCmd, Commands};
use crate::config::Config;
use crate::db::catalog as store;
use crate::errors::{AppError, AppResult};
use crate::models::{CatalogMaterialUpdate, MaterialUnit, NewCatalogMaterial};
use crate::ui::messages::{info, success};
use crate::utils::formatting::{fmt_money, format_number};
use crate::utils::table::{Column, Table};

pub(crate) fn parse_unit(code: &str) -> AppResult<MaterialUnit> {
    MaterialUnit::from_code(code).ok_or_else(|| {
        AppError::validation(format!("unknown unit '{}' (expected m2, mb or t)", code))
    })
}

fn parse_density(raw: &str) -> AppResult<f64> {
    let v: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::validation(format!("invalid density '{}'", raw)))?;
    if !v.is_finite() || v <= 0.0 {
        return Err(AppError::validation("density must be greater than 0"));
    }
    Ok(v)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Catalog { action } = cmd else {
        return Ok(());
    };
    let mut pool = open(cfg)?;

    match action {
        CatalogCmd::Add {
            name,
            unit,
            price,
            density,
            category,
        } => {
            let new = NewCatalogMaterial {
                name: name.clone(),
                unit: parse_unit(unit)?,
                price_per_unit: *price,
                density: *density,
                category: category.clone().filter(|c| !c.trim().is_empty()),
            };
            let m = store::create_catalog_entry(&pool.conn, &new)?;
            success(format!(
                "{} added at {} €/{} ({})",
                m.name,
                fmt_money(m.price_per_unit),
                m.unit.symbol(),
                m.id
            ));
        }

        CatalogCmd::List => {
            let list = store::list_catalog(&pool.conn)?;
            if list.is_empty() {
                info("The material catalog is empty.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Name"),
                Column::left("Unit"),
                Column::right("€/unit"),
                Column::right("t/m³"),
                Column::left("Category"),
            ]);
            for m in list {
                table.add_row(vec![
                    m.id.clone(),
                    m.name.clone(),
                    m.unit.symbol().to_string(),
                    fmt_money(m.price_per_unit),
                    m.density
                        .map(|d| format_number(d, 2))
                        .unwrap_or_else(|| "-".into()),
                    or_dash(&m.category),
                ]);
            }
            print!("{}", table.render());
        }

        CatalogCmd::Update {
            id,
            name,
            unit,
            price,
            density,
            category,
        } => {
            let density = match clearable(density.as_ref()) {
                None => None,
                Some(None) => Some(None),
                Some(Some(raw)) => Some(Some(parse_density(&raw)?)),
            };
            let upd = CatalogMaterialUpdate {
                name: name.clone(),
                unit: unit.as_deref().map(parse_unit).transpose()?,
                price_per_unit: *price,
                density,
                category: clearable(category.as_ref()),
            };
            store::update_catalog_entry(&pool.conn, id, &upd)?;
            success(format!("Catalog material {} updated", id));
        }

        CatalogCmd::Delete { id } => {
            store::delete_catalog_entry(&mut pool.conn, id)?;
            success(format!("Catalog material {} deleted", id));
        }
    }
    Ok(())
}
