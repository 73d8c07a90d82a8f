// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::spreadsheet::{Sheet, Spreadsheet};
use crate::export::tables::Cell;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

fn num_format(decimals: usize, unit: Option<&str>) -> String {
    let base = if decimals == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(decimals))
    };
    match unit {
        Some(u) => format!("{}\" {}\"", base, u),
        None => base,
    }
}

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    bg: Color,
    bold: bool,
) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    if bold {
        fmt = fmt.set_bold();
    }

    match cell {
        Cell::Empty => {
            ws.write_blank(row, col, &fmt).map_err(to_export_error)?;
        }
        Cell::Text(s) => {
            ws.write_with_format(row, col, s.as_str(), &fmt)
                .map_err(to_export_error)?;
        }
        Cell::Number {
            value,
            decimals,
            unit,
        } => {
            let fmt = fmt
                .set_align(FormatAlign::Right)
                .set_num_format(num_format(*decimals, *unit));
            ws.write_with_format(row, col, *value, &fmt)
                .map_err(to_export_error)?;
        }
    }
    Ok(())
}

fn write_sheet(workbook: &mut Workbook, sheet: &Sheet) -> AppResult<()> {
    let ws = workbook.add_worksheet();
    ws.set_name(&sheet.name).map_err(to_export_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x37474F))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in sheet.headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_export_error)?;
    }
    ws.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = sheet
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xF5F5F5);
    let band2 = Color::RGB(0xFFFFFF);
    let total_bg = Color::RGB(0xE0E0E0);

    let data = sheet.rows.iter().map(|r| (r, false));
    let summary = sheet.summary.iter().map(|r| (r, true));

    for (idx, (cells, is_summary)) in data.chain(summary).enumerate() {
        let row = (idx + 1) as u32;
        let bg = if is_summary {
            total_bg
        } else if idx % 2 == 0 {
            band2
        } else {
            band1
        };

        for (col, cell) in cells.iter().enumerate() {
            write_cell(ws, row, col as u16, cell, bg, is_summary)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(cell.display().as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        ws.set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }
    Ok(())
}

fn build_workbook(book: &Spreadsheet) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();

    if book.sheets.is_empty() {
        let ws = workbook.add_worksheet();
        ws.set_name("Report").map_err(to_export_error)?;
        ws.write(0, 0, "No data for the selected period")
            .map_err(to_export_error)?;
        return Ok(workbook);
    }

    for sheet in &book.sheets {
        write_sheet(&mut workbook, sheet)?;
    }
    Ok(workbook)
}

/// Serialise the workbook to `.xlsx` bytes.
pub fn spreadsheet_to_xlsx(book: &Spreadsheet) -> AppResult<Vec<u8>> {
    let mut workbook = build_workbook(book)?;
    workbook.save_to_buffer().map_err(to_export_error)
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
