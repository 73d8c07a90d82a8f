use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

/// Tables shown by `db --info`, with the date column used for the span.
const TABLES: [(&str, Option<&str>); 9] = [
    ("projects", None),
    ("asphalt_deliveries", Some("date")),
    ("materials", Some("date")),
    ("workers", None),
    ("worker_hours", Some("date")),
    ("vehicles", None),
    ("trips", Some("date")),
    ("materials_catalog", None),
    ("material_usage", Some("date")),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub table: &'static str,
    pub rows: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn table_stats(conn: &Connection) -> AppResult<Vec<TableStats>> {
    let mut out = Vec::with_capacity(TABLES.len());

    for (table, date_col) in TABLES {
        let rows: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;

        let (first_date, last_date) = match date_col {
            Some(col) => conn.query_row(
                &format!("SELECT MIN({col}), MAX({col}) FROM {table}"),
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?,
            None => (None, None),
        };

        out.push(TableStats {
            table,
            rows,
            first_date,
            last_date,
        });
    }

    Ok(out)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Tables:{}", CYAN, RESET);

    for s in table_stats(&pool.conn)? {
        let span = match (&s.first_date, &s.last_date) {
            (Some(f), Some(l)) => format!("{} → {}", f, l),
            _ => format!("{GREY}--{RESET}"),
        };
        println!(
            "    {:<20} {}{:>6}{}  {}",
            s.table, GREEN, s.rows, RESET, span
        );
    }

    println!();
    Ok(())
}

/// `PRAGMA integrity_check` lines; a healthy file answers a single "ok".
pub fn integrity_check(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    crate::db::db_utils::collect(rows)
}

pub fn vacuum(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("VACUUM;")?;
    Ok(())
}
