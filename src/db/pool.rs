//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Path of the main database file, `None` for in-memory databases.
    pub fn file_path(&self) -> Option<String> {
        file_path(&self.conn)
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }
}

fn configure(conn: &Connection) -> AppResult<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    // In-memory databases answer "memory" and stay that way.
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    Ok(())
}

pub fn file_path(conn: &Connection) -> Option<String> {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .ok()
        .filter(|p| !p.is_empty())
}

/// Extra connection for concurrent readers. WAL lets these run next to the
/// writer connection without blocking it.
pub fn open_read_only(path: &str) -> AppResult<Connection> {
    let conn = Connection::open_with_flags(
        Path::new(path),
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Run `f` inside a transaction: commit when it returns `Ok`, roll back
/// otherwise. Dropping an uncommitted `Transaction` rolls back, so an early
/// return or unwind leaves the database untouched as well.
pub fn with_transaction<T, F>(conn: &mut Connection, f: F) -> AppResult<T>
where
    F: FnOnce(&Transaction<'_>) -> AppResult<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

/// [`with_transaction`] for callers holding a shared connection. Used for a
/// single row write plus its audit entry; not for nesting inside another
/// transaction.
pub fn with_shared_transaction<T, F>(conn: &Connection, f: F) -> AppResult<T>
where
    F: FnOnce(&Transaction<'_>) -> AppResult<T>,
{
    let tx = conn.unchecked_transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
