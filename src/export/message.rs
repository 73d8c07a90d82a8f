// src/export/message.rs

use crate::export::model::{Report, SectionToggles};
use crate::utils::formatting::{fmt_hours, fmt_money, fmt_tons, fmt_whole};

/// Short chat summary: aggregates only, one block per enabled section.
pub fn render_message(report: &Report, toggles: &SectionToggles) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("*{}*", report.project_name));
    if let Some(loc) = &report.project_location {
        lines.push(loc.clone());
    }
    lines.push(report.date_label.clone());
    lines.push(String::new());

    if toggles.asphalt && !report.asphalt_deliveries.is_empty() {
        lines.push(format!("🚚 *Asphalt:* {} t", fmt_tons(report.asphalt_total)));
        for (class, tons) in &report.asphalt_by_class {
            lines.push(format!("  - {}: {} t", class.label(), fmt_tons(*tons)));
        }
        lines.push(String::new());
    }

    if toggles.materials && !report.materials_summary.is_empty() {
        lines.push("📏 *Materials:*".to_string());
        for (kind, meters) in &report.materials_summary {
            lines.push(format!("  - {}: {} MB", kind.label(), fmt_whole(*meters)));
        }
        lines.push(String::new());
    }

    if toggles.material_usage && !report.material_usage.is_empty() {
        lines.push(format!(
            "🧱 *Material usage:* {} €",
            fmt_money(report.usage_totals.total_cost)
        ));
        lines.push(String::new());
    }

    if toggles.hours && report.total_hours > 0.0 {
        lines.push(format!(
            "⏰ *Hours:* {} h ({} workers)",
            fmt_hours(report.total_hours),
            report.workers_count
        ));
        lines.push(String::new());
    }

    if toggles.vehicle && report.total_km > 0.0 {
        lines.push(format!("🚗 *Km:* {} km", fmt_whole(report.total_km)));
        if let Some(v) = &report.vehicle_name {
            lines.push(format!("  {}", v));
        }
        lines.push(String::new());
    }

    lines.push("_polierlog_".to_string());
    lines.join("\n")
}
