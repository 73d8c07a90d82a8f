use crate::db::db_utils::{UpdateBuilder, collect, enum_col, opt_text_col};
use crate::db::log::audit;
use crate::db::pool::{with_shared_transaction, with_transaction};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CatalogMaterial, CatalogMaterialUpdate, MaterialUnit, NewCatalogMaterial, new_id,
};
use crate::utils::date::timestamp;
use crate::utils::validators::require_non_blank;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_catalog(row: &Row) -> rusqlite::Result<CatalogMaterial> {
    Ok(CatalogMaterial {
        id: row.get("id")?,
        name: row.get("name")?,
        unit: enum_col(row, "unit", MaterialUnit::from_db_str)?,
        price_per_unit: row.get("price_per_unit")?,
        density: row.get("density")?,
        category: opt_text_col(row, "category")?,
        created_at: row.get("created_at")?,
    })
}

fn check_values(price: Option<f64>, density: Option<f64>) -> AppResult<()> {
    if let Some(p) = price
        && (!p.is_finite() || p < 0.0)
    {
        return Err(AppError::validation("price per unit must be 0 or more"));
    }
    if let Some(d) = density
        && (!d.is_finite() || d <= 0.0)
    {
        return Err(AppError::validation("density must be greater than 0"));
    }
    Ok(())
}

/// Catalog ordered by category, then name.
pub fn list_catalog(conn: &Connection) -> AppResult<Vec<CatalogMaterial>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM materials_catalog
         ORDER BY IFNULL(category, '') ASC, name ASC",
    )?;
    let rows = stmt.query_map([], map_catalog)?;
    collect(rows)
}

pub fn get_catalog_entry(conn: &Connection, id: &str) -> AppResult<CatalogMaterial> {
    conn.query_row(
        "SELECT * FROM materials_catalog WHERE id = ?1",
        [id],
        map_catalog,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("catalog material", id))
}

pub fn create_catalog_entry(
    conn: &Connection,
    new: &NewCatalogMaterial,
) -> AppResult<CatalogMaterial> {
    with_shared_transaction(conn, |tx| {
        require_non_blank("name", &new.name)?;
        check_values(Some(new.price_per_unit), new.density)?;

        let id = new_id();
        tx.execute(
            "INSERT INTO materials_catalog
                (id, name, unit, price_per_unit, density, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                new.name.trim(),
                new.unit.to_db_str(),
                new.price_per_unit,
                new.density,
                new.category,
                timestamp(),
            ],
        )?;

        audit(
            tx,
            "create",
            &id,
            &format!(
                "catalog material '{}' at {} per {}",
                new.name.trim(),
                new.price_per_unit,
                new.unit.symbol()
            ),
        )?;
        get_catalog_entry(tx, &id)
    })
}

/// Price edits do not touch existing usage rows, which keep their snapshot.
pub fn update_catalog_entry(
    conn: &Connection,
    id: &str,
    upd: &CatalogMaterialUpdate,
) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        if let Some(name) = &upd.name {
            require_non_blank("name", name)?;
        }
        check_values(upd.price_per_unit, upd.density.flatten())?;

        let mut b = UpdateBuilder::new("materials_catalog", "catalog material");
        b.set("name", upd.name.as_ref().map(|n| n.trim().to_string()))
            .set("unit", upd.unit.map(|u| u.to_db_str().to_string()))
            .set("price_per_unit", upd.price_per_unit)
            .set_nullable("density", upd.density)
            .set_nullable("category", upd.category.clone());
        let changed = b.len();
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, &format!("catalog material: {} field(s)", changed))?;
        }
        Ok(())
    })
}

pub fn count_usages(conn: &Connection, material_id: &str) -> AppResult<i64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM material_usage WHERE material_id = ?1",
        [material_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Delete a catalog entry unless usage rows still reference it.
pub fn delete_catalog_entry(conn: &mut Connection, id: &str) -> AppResult<()> {
    with_transaction(conn, |tx| {
        let entry = get_catalog_entry(tx, id)?;

        let usages = count_usages(tx, id)?;
        if usages > 0 {
            return Err(AppError::MaterialInUse {
                id: id.to_string(),
                usages,
            });
        }

        tx.execute("DELETE FROM materials_catalog WHERE id = ?1", [id])?;
        audit(tx, "delete", id, &format!("catalog material '{}'", entry.name))?;
        Ok(())
    })
}
