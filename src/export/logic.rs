// src/export/logic.rs

use crate::core::report::ReportService;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::document::render_document;
use crate::export::fs_utils::{report_file_name, write_output};
use crate::export::message::render_message;
use crate::export::model::{Report, SectionToggles};
use crate::export::pdf::document_to_pdf;
use crate::export::range::DateRange;
use crate::export::share::Sharer;
use crate::export::spreadsheet::render_spreadsheet;
use crate::export::xlsx::spreadsheet_to_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::ui::messages::info;
use crate::utils::date::timestamp;
use std::path::PathBuf;

/// What to export and where generated files go.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub range: DateRange,
    pub toggles: SectionToggles,
    pub polier_name: String,
    pub out_dir: PathBuf,
    pub force: bool,
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    File(PathBuf),
    Text(String),
}

/// High-level export entry points: build the report, render, hand over.
pub struct ExportLogic;

impl ExportLogic {
    pub fn build_report(pool: &DbPool, req: &ExportRequest) -> AppResult<Report> {
        ReportService::build(pool, req.range, &req.toggles, &req.polier_name)
    }

    fn write_and_share(
        report: &Report,
        req: &ExportRequest,
        format: &ExportFormat,
        bytes: &[u8],
        sharer: &dyn Sharer,
    ) -> AppResult<PathBuf> {
        let name = report_file_name(&report.project_name, req.range.from, format.extension());
        let path = write_output(&req.out_dir, &name, bytes, req.force)?;
        notify_export_success(format.label(), &path);
        sharer.share_file(&path, format.mime_type())?;
        Ok(path)
    }

    /// Printable report, as HTML markup or paginated PDF.
    pub fn export_document(
        pool: &DbPool,
        req: &ExportRequest,
        pdf: bool,
        sharer: &dyn Sharer,
    ) -> AppResult<PathBuf> {
        let report = Self::build_report(pool, req)?;
        let doc = render_document(&report, &req.toggles, &timestamp());

        if pdf {
            info(format!("Rendering PDF for {}", report.date_label));
            let bytes = document_to_pdf(&doc);
            Self::write_and_share(&report, req, &ExportFormat::Pdf, &bytes, sharer)
        } else {
            let html = doc.to_html();
            Self::write_and_share(&report, req, &ExportFormat::Html, html.as_bytes(), sharer)
        }
    }

    pub fn export_spreadsheet(
        pool: &DbPool,
        req: &ExportRequest,
        sharer: &dyn Sharer,
    ) -> AppResult<PathBuf> {
        let report = Self::build_report(pool, req)?;
        let book = render_spreadsheet(&report, &req.toggles);
        let bytes = spreadsheet_to_xlsx(&book)?;
        Self::write_and_share(&report, req, &ExportFormat::Xlsx, &bytes, sharer)
    }

    pub fn export_message(
        pool: &DbPool,
        req: &ExportRequest,
        sharer: &dyn Sharer,
    ) -> AppResult<String> {
        let report = Self::build_report(pool, req)?;
        let text = render_message(&report, &req.toggles);
        sharer.share_text(&text)?;
        Ok(text)
    }

    /// Raw report value as pretty JSON.
    pub fn export_json(
        pool: &DbPool,
        req: &ExportRequest,
        sharer: &dyn Sharer,
    ) -> AppResult<PathBuf> {
        let report = Self::build_report(pool, req)?;
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Export(format!("JSON serialization failed: {e}")))?;
        Self::write_and_share(&report, req, &ExportFormat::Json, json.as_bytes(), sharer)
    }

    pub fn export(
        pool: &DbPool,
        format: &ExportFormat,
        req: &ExportRequest,
        sharer: &dyn Sharer,
    ) -> AppResult<ExportOutcome> {
        let outcome = match format {
            ExportFormat::Html => ExportOutcome::File(Self::export_document(pool, req, false, sharer)?),
            ExportFormat::Pdf => ExportOutcome::File(Self::export_document(pool, req, true, sharer)?),
            ExportFormat::Xlsx => ExportOutcome::File(Self::export_spreadsheet(pool, req, sharer)?),
            ExportFormat::Json => ExportOutcome::File(Self::export_json(pool, req, sharer)?),
            ExportFormat::Message => ExportOutcome::Text(Self::export_message(pool, req, sharer)?),
        };
        Ok(outcome)
    }
}
