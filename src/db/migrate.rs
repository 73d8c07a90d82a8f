use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Domain tables of the site log plus the (project_id, date) indexes used
/// by every range query.
fn create_domain_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            location    TEXT,
            start_date  TEXT,
            end_date    TEXT,
            active      INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS asphalt_deliveries (
            id            TEXT PRIMARY KEY,
            project_id    TEXT NOT NULL REFERENCES projects(id),
            delivery_note TEXT NOT NULL,
            date          TEXT NOT NULL,
            time          TEXT NOT NULL,
            asphalt_class TEXT NOT NULL,
            tons          REAL NOT NULL,
            driver        TEXT,
            truck_number  TEXT,
            notes         TEXT,
            photo_uri     TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS materials (
            id          TEXT PRIMARY KEY,
            project_id  TEXT NOT NULL REFERENCES projects(id),
            type        TEXT NOT NULL,
            from_km     TEXT,
            to_km       TEXT,
            meters      REAL NOT NULL,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            notes       TEXT,
            photo_uri   TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workers (
            id          TEXT PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS worker_hours (
            id          TEXT PRIMARY KEY,
            worker_id   TEXT NOT NULL REFERENCES workers(id),
            project_id  TEXT NOT NULL REFERENCES projects(id),
            date        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            break_hours REAL NOT NULL DEFAULT 0.5,
            total_hours REAL NOT NULL,
            status      TEXT NOT NULL DEFAULT 'present'
                        CHECK(status IN ('present','vacation','sick','absent')),
            overtime    INTEGER NOT NULL DEFAULT 0,
            notes       TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vehicles (
            id                  TEXT PRIMARY KEY,
            make                TEXT NOT NULL,
            model               TEXT NOT NULL,
            registration_number TEXT NOT NULL,
            current_odometer    REAL NOT NULL,
            active              INTEGER NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trips (
            id              TEXT PRIMARY KEY,
            vehicle_id      TEXT NOT NULL REFERENCES vehicles(id),
            project_id      TEXT NOT NULL REFERENCES projects(id),
            date            TEXT NOT NULL,
            start_time      TEXT NOT NULL,
            end_time        TEXT NOT NULL,
            from_location   TEXT NOT NULL,
            to_location     TEXT NOT NULL,
            start_odometer  REAL NOT NULL,
            end_odometer    REAL NOT NULL,
            distance        REAL NOT NULL,
            purpose         TEXT NOT NULL DEFAULT '',
            notes           TEXT,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS materials_catalog (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            unit            TEXT NOT NULL,
            price_per_unit  REAL NOT NULL,
            density         REAL,
            category        TEXT,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS material_usage (
            id                      TEXT PRIMARY KEY,
            project_id              TEXT NOT NULL REFERENCES projects(id),
            material_id             TEXT NOT NULL REFERENCES materials_catalog(id),
            date                    TEXT NOT NULL,
            input_quantity          REAL NOT NULL,
            input_unit              TEXT NOT NULL,
            thickness_cm            REAL,
            final_quantity          REAL NOT NULL,
            cost                    REAL NOT NULL,
            price_per_unit_at_time  REAL NOT NULL,
            notes                   TEXT,
            created_at              TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_asphalt_project_date ON asphalt_deliveries(project_id, date);
        CREATE INDEX IF NOT EXISTS idx_materials_project_date ON materials(project_id, date);
        CREATE INDEX IF NOT EXISTS idx_hours_project_date ON worker_hours(project_id, date);
        CREATE INDEX IF NOT EXISTS idx_trips_project_date ON trips(project_id, date);
        CREATE INDEX IF NOT EXISTS idx_material_usage_project_date ON material_usage(project_id, date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// One record per (worker, project, day). Older databases may hold
/// duplicates written before the key was enforced: the newest row wins.
fn migrate_unique_worker_hours(conn: &Connection) -> AppResult<()> {
    let version = "20240301_0001_unique_worker_hours";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    let duplicates: i64 = conn.query_row(
        "SELECT COUNT(*) FROM (
             SELECT 1 FROM worker_hours
             GROUP BY worker_id, project_id, date
             HAVING COUNT(*) > 1
         )",
        [],
        |row| row.get(0),
    )?;

    if duplicates > 0 {
        warning(format!(
            "Collapsing {} duplicated worker-hours key(s), keeping the newest record.",
            duplicates
        ));
        conn.execute(
            "DELETE FROM worker_hours
             WHERE rowid NOT IN (
                 SELECT MAX(rowid) FROM worker_hours
                 GROUP BY worker_id, project_id, date
             )",
            [],
        )?;
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_hours_natural_key
         ON worker_hours(worker_id, project_id, date);",
    )
    .map_err(|e| AppError::Migration(format!("unique worker_hours key: {}", e)))?;

    mark_applied(
        conn,
        version,
        "Unique (worker_id, project_id, date) on worker_hours",
    )?;
    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Public entry point: create missing tables and run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    create_domain_tables(conn)?;
    migrate_unique_worker_hours(conn)?;
    Ok(())
}

/// Names of the migrations recorded in `log`, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
