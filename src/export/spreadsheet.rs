// src/export/spreadsheet.rs

use crate::export::model::{Report, SectionToggles};
use crate::export::tables::{Cell, section_tables};

/// One worksheet: a row per record, then the summary row(s).
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub summary: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spreadsheet {
    pub sheets: Vec<Sheet>,
}

/// One sheet per enabled, non-empty section.
pub fn render_spreadsheet(report: &Report, toggles: &SectionToggles) -> Spreadsheet {
    let sheets = section_tables(report, toggles)
        .into_iter()
        .map(|t| Sheet {
            name: t.sheet_name.to_string(),
            headers: t.headers.iter().map(|h| h.to_string()).collect(),
            rows: t.rows,
            summary: t.totals,
        })
        .collect();

    Spreadsheet { sheets }
}
