//! Unified application error type.
//! Every layer (calculators, db, core, export, cli) returns AppError so the
//! caller can tell validation, precondition and storage failures apart.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid chainage '{0}' (expected <km>+<mmm>, e.g. 2+350)")]
    InvalidChainage(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    // ---------------------------
    // Preconditions
    // ---------------------------
    #[error("No active project. Create one or select it with `project activate`.")]
    NoActiveProject,

    #[error("No active vehicle. Add one or select it with `vehicle activate`.")]
    NoActiveVehicle,

    #[error("Material {id} is referenced by {usages} usage record(s) and cannot be deleted")]
    MaterialInUse { id: String, usages: i64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(entity: &'static str, id: T) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for the "no active project" precondition, which export callers
    /// report with a dedicated message.
    pub fn is_no_active_project(&self) -> bool {
        matches!(self, AppError::NoActiveProject)
    }
}

pub type AppResult<T> = Result<T, AppError>;
