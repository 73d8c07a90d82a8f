// src/export/document.rs
//
// Printable report: a typed document model plus its HTML markup. The PDF
// writer consumes the same model.

use crate::export::model::{Report, SectionToggles};
use crate::export::tables::{Cell, section_tables};

#[derive(Debug, Clone, PartialEq)]
pub struct DocSection {
    pub title: String,
    pub headers: Vec<String>,
    pub numeric: Vec<bool>,
    pub rows: Vec<Vec<String>>,
    pub totals: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    /// `(label, value)` lines under the title.
    pub header: Vec<(String, String)>,
    pub sections: Vec<DocSection>,
    /// Footer stamp; the only part allowed to differ between two renders.
    pub generated_at: String,
}

fn cells(row: &[Cell]) -> Vec<String> {
    row.iter().map(Cell::display).collect()
}

/// Render the enabled, non-empty sections of `report`.
pub fn render_document(report: &Report, toggles: &SectionToggles, generated_at: &str) -> Document {
    let mut header = vec![("Project".to_string(), report.project_name.clone())];
    if let Some(loc) = &report.project_location {
        header.push(("Location".to_string(), loc.clone()));
    }
    header.push(("Period".to_string(), report.date_label.clone()));
    header.push(("Polier".to_string(), report.polier_name.clone()));

    let sections = section_tables(report, toggles)
        .into_iter()
        .map(|t| DocSection {
            title: t.title,
            headers: t.headers.iter().map(|h| h.to_string()).collect(),
            numeric: t.numeric,
            rows: t.rows.iter().map(|r| cells(r)).collect(),
            totals: t.totals.iter().map(|r| cells(r)).collect(),
        })
        .collect();

    Document {
        title: "Site report".to_string(),
        header,
        sections,
        generated_at: generated_at.to_string(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;font-size:11px;margin:24px;color:#222}\
h1{font-size:20px;margin:0 0 8px}\
.meta td{padding:1px 12px 1px 0}\
.section{margin-top:18px}\
.section-title{font-size:14px;font-weight:bold;margin-bottom:6px}\
table.data{width:100%;border-collapse:collapse}\
table.data th{background:#37474f;color:#fff;text-align:left;padding:4px}\
table.data td{border-bottom:1px solid #ddd;padding:3px 4px}\
table.data tr:nth-child(even) td{background:#f5f5f5}\
.num{text-align:right}\
tr.total-row td{font-weight:bold;background:#e0e0e0}\
.footer{margin-top:24px;font-size:9px;color:#888}";

fn push_row(html: &mut String, row: &[String], numeric: &[bool], class: Option<&str>) {
    match class {
        Some(c) => html.push_str(&format!("<tr class=\"{}\">", c)),
        None => html.push_str("<tr>"),
    }
    for (i, value) in row.iter().enumerate() {
        if numeric.get(i).copied().unwrap_or(false) {
            html.push_str(&format!("<td class=\"num\">{}</td>", escape(value)));
        } else {
            html.push_str(&format!("<td>{}</td>", escape(value)));
        }
    }
    html.push_str("</tr>\n");
}

impl Document {
    /// Self-contained HTML page.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
        html.push_str(&format!("<h1>{}</h1>\n<table class=\"meta\">\n", escape(&self.title)));
        for (label, value) in &self.header {
            html.push_str(&format!(
                "<tr><td><strong>{}:</strong></td><td>{}</td></tr>\n",
                escape(label),
                escape(value)
            ));
        }
        html.push_str("</table>\n");

        for s in &self.sections {
            html.push_str("<div class=\"section\">\n");
            html.push_str(&format!(
                "<div class=\"section-title\">{}</div>\n",
                escape(&s.title)
            ));
            html.push_str("<table class=\"data\">\n<thead><tr>");
            for (i, h) in s.headers.iter().enumerate() {
                if s.numeric.get(i).copied().unwrap_or(false) {
                    html.push_str(&format!("<th class=\"num\">{}</th>", escape(h)));
                } else {
                    html.push_str(&format!("<th>{}</th>", escape(h)));
                }
            }
            html.push_str("</tr></thead>\n<tbody>\n");
            for row in &s.rows {
                push_row(&mut html, row, &s.numeric, None);
            }
            for row in &s.totals {
                push_row(&mut html, row, &s.numeric, Some("total-row"));
            }
            html.push_str("</tbody>\n</table>\n</div>\n");
        }

        html.push_str(&format!(
            "<div class=\"footer\">Generated {}</div>\n</body>\n</html>\n",
            escape(&self.generated_at)
        ));
        html
    }
}
