use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// All schema creation and upgrades go through the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

/// Open (creating if needed) and migrate the database at `path`.
pub fn open_db(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Migrated in-memory database.
pub fn open_in_memory() -> AppResult<DbPool> {
    let pool = DbPool::in_memory()?;
    init_db(&pool.conn)?;
    Ok(pool)
}
