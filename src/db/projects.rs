use crate::db::db_utils::{UpdateBuilder, bool_col, collect, opt_date_col, opt_text_col};
use crate::db::log::audit;
use crate::db::pool::{with_shared_transaction, with_transaction};
use crate::errors::{AppError, AppResult};
use crate::models::{NewProject, Project, ProjectUpdate, new_id};
use crate::utils::date::{timestamp, to_db};
use crate::utils::validators::require_non_blank;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Tables whose rows belong to exactly one project.
const PROJECT_SCOPED_TABLES: [&str; 5] = [
    "asphalt_deliveries",
    "materials",
    "worker_hours",
    "trips",
    "material_usage",
];

pub fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        location: opt_text_col(row, "location")?,
        start_date: opt_date_col(row, "start_date")?,
        end_date: opt_date_col(row, "end_date")?,
        active: bool_col(row, "active")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// All projects, newest first.
pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT * FROM projects ORDER BY created_at DESC, rowid DESC")?;
    let rows = stmt.query_map([], map_project)?;
    collect(rows)
}

pub fn get_project(conn: &Connection, id: &str) -> AppResult<Project> {
    conn.query_row("SELECT * FROM projects WHERE id = ?1", [id], map_project)
        .optional()?
        .ok_or_else(|| AppError::not_found("project", id))
}

/// The project currently selected as default context, if any.
pub fn get_active_project(conn: &Connection) -> AppResult<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT * FROM projects WHERE active = 1 ORDER BY updated_at DESC LIMIT 1",
            [],
            map_project,
        )
        .optional()?;
    Ok(project)
}

/// Insert a project. It only becomes the active one when `activate` is set,
/// in which case every other project is deactivated in the same transaction.
pub fn create_project(conn: &mut Connection, new: &NewProject) -> AppResult<Project> {
    require_non_blank("name", &new.name)?;

    let id = new_id();
    let now = timestamp();

    with_transaction(conn, |tx| {
        if new.activate {
            tx.execute("UPDATE projects SET active = 0 WHERE active = 1", [])?;
        }

        tx.execute(
            "INSERT INTO projects (id, name, location, start_date, end_date, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                id,
                new.name.trim(),
                new.location,
                new.start_date.map(to_db),
                new.end_date.map(to_db),
                new.activate,
                now,
            ],
        )?;

        audit(tx, "create", &id, &format!("project '{}'", new.name.trim()))?;
        get_project(tx, &id)
    })
}

pub fn update_project(conn: &Connection, id: &str, upd: &ProjectUpdate) -> AppResult<()> {
    with_shared_transaction(conn, |tx| {
        if let Some(name) = &upd.name {
            require_non_blank("name", name)?;
        }

        let mut b = UpdateBuilder::new("projects", "project");
        b.set("name", upd.name.as_ref().map(|n| n.trim().to_string()))
            .set_nullable("location", upd.location.clone())
            .set_nullable_date("start_date", upd.start_date)
            .set_nullable_date("end_date", upd.end_date);
        let changed = b.len();
        b.touch("updated_at", timestamp());
        b.execute(tx, id)?;

        if changed > 0 {
            audit(tx, "update", id, &format!("project: {} field(s)", changed))?;
        }
        Ok(())
    })
}

/// Make `id` the only active project.
pub fn set_active_project(conn: &mut Connection, id: &str) -> AppResult<()> {
    with_transaction(conn, |tx| {
        let project = get_project(tx, id)?;
        tx.execute("UPDATE projects SET active = 0 WHERE active = 1", [])?;
        tx.execute(
            "UPDATE projects SET active = 1, updated_at = ?2 WHERE id = ?1",
            params![id, timestamp()],
        )?;
        audit(tx, "activate", id, &format!("project '{}'", project.name))?;
        Ok(())
    })
}

/// Remove a project. Projects that still own records are refused.
pub fn delete_project(conn: &mut Connection, id: &str) -> AppResult<()> {
    with_transaction(conn, |tx| {
        let project = get_project(tx, id)?;
        let records = count_project_records(tx, id)?;
        if records > 0 {
            return Err(AppError::validation(format!(
                "project '{}' still has {} record(s); delete them first",
                project.name, records
            )));
        }
        tx.execute("DELETE FROM projects WHERE id = ?1", [id])?;
        audit(tx, "delete", id, &format!("project '{}'", project.name))?;
        Ok(())
    })
}

/// Rows in every project-scoped table that reference `project_id`.
pub fn count_project_records(conn: &Connection, project_id: &str) -> AppResult<i64> {
    let mut total = 0;
    for table in PROJECT_SCOPED_TABLES {
        let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE project_id = ?1", table),
            [project_id],
            |r| r.get(0),
        )?;
        total += n;
    }
    Ok(total)
}
