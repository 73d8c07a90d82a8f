// src/export/tables.rs
//
// Section tables shared by the document and spreadsheet renderers.

use crate::export::model::{Report, SectionToggles};
use crate::utils::formatting::{format_date, format_number, yes_no};
use crate::utils::time::format_time;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number {
        value: f64,
        decimals: usize,
        unit: Option<&'static str>,
    },
}

impl Cell {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Cell::Text(s.into())
    }

    pub fn opt_text(s: &Option<String>) -> Self {
        match s {
            Some(v) => Cell::Text(v.clone()),
            None => Cell::Empty,
        }
    }

    pub fn num(value: f64, decimals: usize) -> Self {
        Cell::Number {
            value,
            decimals,
            unit: None,
        }
    }

    pub fn total(value: f64, decimals: usize, unit: &'static str) -> Self {
        Cell::Number {
            value,
            decimals,
            unit: Some(unit),
        }
    }

    /// `43,5 t`
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number {
                value,
                decimals,
                unit: Some(u),
            } => format!("{} {}", format_number(*value, *decimals), u),
            Cell::Number {
                value,
                decimals,
                unit: None,
            } => format_number(*value, *decimals),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Number { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionTable {
    /// Numbered heading used in the document.
    pub title: String,
    /// Worksheet name (max 31 chars).
    pub sheet_name: &'static str,
    pub headers: Vec<&'static str>,
    /// Columns holding numbers, right aligned.
    pub numeric: Vec<bool>,
    pub rows: Vec<Vec<Cell>>,
    /// One totals row, or one summary row per group.
    pub totals: Vec<Vec<Cell>>,
}

fn numeric_mask(width: usize, cols: &[usize]) -> Vec<bool> {
    (0..width).map(|i| cols.contains(&i)).collect()
}

fn label_row(width: usize, label: String, at: usize, value: Cell) -> Vec<Cell> {
    let mut row = vec![Cell::Empty; width];
    row[0] = Cell::Text(label);
    row[at] = value;
    row
}

/// Tables for every enabled section that has rows, in report order.
pub fn section_tables(report: &Report, toggles: &SectionToggles) -> Vec<SectionTable> {
    let mut out = Vec::new();
    let mut n = 0;
    let mut next = || {
        n += 1;
        n
    };

    if toggles.asphalt && !report.asphalt_deliveries.is_empty() {
        let headers = vec!["Lieferschein", "Date", "Time", "Class", "Tons", "Driver", "Truck"];
        let rows = report
            .asphalt_deliveries
            .iter()
            .map(|d| {
                vec![
                    Cell::text(&d.delivery_note),
                    Cell::text(format_date(d.date)),
                    Cell::text(format_time(d.time)),
                    Cell::text(d.asphalt_class.label()),
                    Cell::num(d.tons, 1),
                    Cell::opt_text(&d.driver),
                    Cell::opt_text(&d.truck_number),
                ]
            })
            .collect();
        out.push(SectionTable {
            title: format!("{}. Asphalt deliveries", next()),
            sheet_name: "Asphalt",
            numeric: numeric_mask(headers.len(), &[4]),
            totals: vec![label_row(
                headers.len(),
                "TOTAL".into(),
                4,
                Cell::total(report.asphalt_total, 1, "t"),
            )],
            headers,
            rows,
        });
    }

    if toggles.materials && !report.materials.is_empty() {
        let headers = vec!["Type", "Date", "Time", "From km", "To km", "Meters (MB)", "Notes"];
        let rows = report
            .materials
            .iter()
            .map(|m| {
                vec![
                    Cell::text(m.material_type.label()),
                    Cell::text(format_date(m.date)),
                    Cell::text(format_time(m.time)),
                    Cell::opt_text(&m.from_km),
                    Cell::opt_text(&m.to_km),
                    Cell::num(m.meters, 1),
                    Cell::opt_text(&m.notes),
                ]
            })
            .collect();
        let totals = report
            .materials_summary
            .iter()
            .map(|(kind, meters)| {
                label_row(
                    headers.len(),
                    format!("TOTAL: {}", kind.label()),
                    5,
                    Cell::total(*meters, 0, "MB"),
                )
            })
            .collect();
        out.push(SectionTable {
            title: format!("{}. Materials (running meters)", next()),
            sheet_name: "Materials",
            numeric: numeric_mask(headers.len(), &[5]),
            headers,
            rows,
            totals,
        });
    }

    if toggles.material_usage && !report.material_usage.is_empty() {
        let headers = vec!["Date", "Material", "Quantity", "Unit", "Price/unit", "Cost"];
        let rows = report
            .material_usage
            .iter()
            .map(|u| {
                vec![
                    Cell::text(format_date(u.date)),
                    Cell::text(&u.material_name),
                    Cell::num(u.final_quantity, 2),
                    Cell::text(u.input_unit.symbol()),
                    Cell::num(u.price_per_unit_at_time, 2),
                    Cell::num(u.cost, 2),
                ]
            })
            .collect();
        let mut total = label_row(
            headers.len(),
            "TOTAL".into(),
            5,
            Cell::total(report.usage_totals.total_cost, 2, "€"),
        );
        total[2] = Cell::num(report.usage_totals.total_quantity, 2);
        out.push(SectionTable {
            title: format!("{}. Material usage", next()),
            sheet_name: "Material usage",
            numeric: numeric_mask(headers.len(), &[2, 4, 5]),
            headers,
            rows,
            totals: vec![total],
        });
    }

    if toggles.hours && !report.worker_hours.is_empty() {
        let headers = vec![
            "Worker", "Date", "Start", "End", "Break", "Hours", "Status", "Overtime",
        ];
        let rows = report
            .worker_hours
            .iter()
            .map(|r| {
                let h = &r.hours;
                vec![
                    Cell::text(&r.worker_name),
                    Cell::text(format_date(h.date)),
                    Cell::text(format_time(h.start_time)),
                    Cell::text(format_time(h.end_time)),
                    Cell::num(h.break_hours, 1),
                    Cell::num(h.total_hours, 1),
                    Cell::text(h.status.as_str()),
                    Cell::text(yes_no(h.overtime)),
                ]
            })
            .collect();
        out.push(SectionTable {
            title: format!("{}. Worker hours", next()),
            sheet_name: "Hours",
            numeric: numeric_mask(headers.len(), &[4, 5]),
            totals: vec![label_row(
                headers.len(),
                format!("TOTAL: {} workers", report.workers_count),
                5,
                Cell::total(report.total_hours, 1, "h"),
            )],
            headers,
            rows,
        });
    }

    if toggles.vehicle && !report.trips.is_empty() {
        let headers = vec![
            "Date", "Time", "From", "To", "Start km", "End km", "Distance", "Purpose",
        ];
        let rows = report
            .trips
            .iter()
            .map(|t| {
                vec![
                    Cell::text(format_date(t.date)),
                    Cell::text(format!(
                        "{}-{}",
                        format_time(t.start_time),
                        format_time(t.end_time)
                    )),
                    Cell::text(&t.from_location),
                    Cell::text(&t.to_location),
                    Cell::num(t.start_odometer, 0),
                    Cell::num(t.end_odometer, 0),
                    Cell::num(t.distance, 0),
                    Cell::text(&t.purpose),
                ]
            })
            .collect();
        let title = match &report.vehicle_name {
            Some(v) => format!("{}. Vehicle log - {}", next(), v),
            None => format!("{}. Vehicle log", next()),
        };
        out.push(SectionTable {
            title,
            sheet_name: "Trips",
            numeric: numeric_mask(headers.len(), &[4, 5, 6]),
            totals: vec![label_row(
                headers.len(),
                "TOTAL".into(),
                6,
                Cell::total(report.total_km, 0, "km"),
            )],
            headers,
            rows,
        });
    }

    out
}
