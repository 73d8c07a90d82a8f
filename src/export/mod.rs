// src/export/mod.rs

pub mod document;
mod fs_utils;
pub mod logic;
pub mod message;
pub mod model;
pub mod pdf;
pub mod range;
pub mod share;
pub mod spreadsheet;
pub mod tables;
pub mod xlsx;

pub use fs_utils::report_file_name;
pub use logic::{ExportLogic, ExportOutcome, ExportRequest};
pub use model::{Report, SectionToggles};
pub use range::{DateRange, RangeKind};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for file exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Html,
    Pdf,
    Xlsx,
    Message,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Message => "txt",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "XLSX",
            ExportFormat::Message => "Message",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Message => "text/plain",
            ExportFormat::Json => "application/json",
        }
    }
}
