//! Shared row decoding and the partial-update statement builder.

use crate::errors::{AppError, AppResult};
use crate::utils::date::to_db;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row, params_from_iter};

fn conversion_failure(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub fn date_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|_| conversion_failure(AppError::InvalidDate(s.clone())))
}

pub fn opt_date_col(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let s: Option<String> = row.get(col)?;
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_failure(AppError::InvalidDate(s.clone()))),
        _ => Ok(None),
    }
}

pub fn time_col(row: &Row, col: &str) -> rusqlite::Result<NaiveTime> {
    let s: String = row.get(col)?;
    NaiveTime::parse_from_str(&s, "%H:%M")
        .map_err(|_| conversion_failure(AppError::InvalidTime(s.clone())))
}

/// Decode a TEXT column into one of the closed enums (`from_db_str`).
pub fn enum_col<T>(row: &Row, col: &str, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let s: String = row.get(col)?;
    parse(&s).ok_or_else(|| {
        conversion_failure(AppError::Validation(format!(
            "unexpected value '{}' in column {}",
            s, col
        )))
    })
}

pub fn bool_col(row: &Row, col: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(col)? != 0)
}

/// Empty strings stored by older rows read back as `None`.
pub fn opt_text_col(row: &Row, col: &str) -> rusqlite::Result<Option<String>> {
    let s: Option<String> = row.get(col)?;
    Ok(s.filter(|v| !v.is_empty()))
}

pub fn collect<T>(rows: impl Iterator<Item = rusqlite::Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Builds `UPDATE <table> SET ... WHERE id = ?` from the fields that were
/// actually supplied. `None` means "leave the column alone"; for nullable
/// columns `Some(None)` writes NULL.
pub struct UpdateBuilder {
    table: &'static str,
    entity: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str, entity: &'static str) -> Self {
        Self {
            table,
            entity,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn set<T: Into<Value>>(&mut self, column: &'static str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.columns.push(column);
            self.values.push(v.into());
        }
        self
    }

    pub fn set_nullable<T: Into<Value>>(
        &mut self,
        column: &'static str,
        value: Option<Option<T>>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.columns.push(column);
            self.values.push(v.map(Into::into).unwrap_or(Value::Null));
        }
        self
    }

    pub fn set_date(&mut self, column: &'static str, value: Option<NaiveDate>) -> &mut Self {
        self.set(column, value.map(to_db))
    }

    pub fn set_nullable_date(
        &mut self,
        column: &'static str,
        value: Option<Option<NaiveDate>>,
    ) -> &mut Self {
        self.set_nullable(column, value.map(|d| d.map(to_db)))
    }

    pub fn set_time(&mut self, column: &'static str, value: Option<NaiveTime>) -> &mut Self {
        self.set(column, value.map(|t| t.format("%H:%M").to_string()))
    }

    /// Number of columns that will be written (not counting `touch`).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Always-written column such as `updated_at`. Only applied when some
    /// other field changes.
    pub fn touch(&mut self, column: &'static str, value: String) -> &mut Self {
        if !self.columns.is_empty() {
            self.columns.push(column);
            self.values.push(Value::Text(value));
        }
        self
    }

    /// Run the update. A missing id is reported as `NotFound` even when no
    /// field was supplied.
    pub fn execute(self, conn: &Connection, id: &str) -> AppResult<usize> {
        if self.columns.is_empty() {
            let exists: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {} WHERE id = ?1", self.table),
                [id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(AppError::not_found(self.entity, id));
            }
            return Ok(0);
        }

        let assignments: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", c, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            self.table,
            assignments.join(", "),
            self.columns.len() + 1
        );

        let mut values = self.values;
        values.push(Value::Text(id.to_string()));

        let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
        if changed == 0 {
            return Err(AppError::not_found(self.entity, id));
        }
        Ok(changed)
    }
}

/// `DELETE FROM <table> WHERE id = ?`, `NotFound` if nothing was removed.
pub fn delete_by_id(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    id: &str,
) -> AppResult<()> {
    let removed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", table), [id])?;
    if removed == 0 {
        return Err(AppError::not_found(entity, id));
    }
    Ok(())
}
