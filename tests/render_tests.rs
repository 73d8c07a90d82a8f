mod common;
use common::{date, time};

use polierlog::export::document::render_document;
use polierlog::export::message::render_message;
use polierlog::export::pdf::document_to_pdf;
use polierlog::export::spreadsheet::render_spreadsheet;
use polierlog::export::tables::section_tables;
use polierlog::export::xlsx::spreadsheet_to_xlsx;
use polierlog::export::{Report, SectionToggles, report_file_name};
use polierlog::models::{AsphaltClass, AsphaltDelivery, MaterialType};
use polierlog::utils::formatting::{fmt_tons, format_number};

fn delivery(note: &str, class: AsphaltClass, tons: f64, at: &str) -> AsphaltDelivery {
    AsphaltDelivery {
        id: format!("id-{note}"),
        project_id: "p1".into(),
        delivery_note: note.into(),
        date: date("2024-03-01"),
        time: time(at),
        asphalt_class: class,
        tons,
        driver: Some("K. Weber".into()),
        truck_number: Some("OF-AB 1234".into()),
        notes: None,
        photo_uri: None,
        created_at: "2024-03-01T07:30:00+01:00".into(),
        updated_at: "2024-03-01T07:30:00+01:00".into(),
    }
}

fn sample_report() -> Report {
    let mut r = Report::empty(
        "A3 Nord",
        Some("Offenbach".into()),
        "M. Braun",
        date("2024-03-01"),
        date("2024-03-01"),
        "01.03.2024".into(),
    );
    r.asphalt_deliveries = vec![
        delivery("100231", AsphaltClass::Ac11DS, 20.0, "07:30"),
        delivery("100232", AsphaltClass::Sma11, 23.5, "09:10"),
    ];
    r.asphalt_total = 43.5;
    r.asphalt_by_class.insert(AsphaltClass::Ac11DS, 20.0);
    r.asphalt_by_class.insert(AsphaltClass::Sma11, 23.5);
    r
}

fn asphalt_only() -> SectionToggles {
    SectionToggles {
        asphalt: true,
        ..SectionToggles::none()
    }
}

#[test]
fn comma_decimal_formatting() {
    assert_eq!(fmt_tons(43.5), "43,5");
    assert_eq!(format_number(1234.567, 2), "1234,57");
    assert_eq!(format_number(-0.01, 1), "0,0");
}

#[test]
fn document_has_one_asphalt_section_with_totals() {
    let doc = render_document(&sample_report(), &asphalt_only(), "01.03.2024 18:00");

    assert_eq!(doc.sections.len(), 1);
    let s = &doc.sections[0];
    assert_eq!(s.title, "1. Asphalt deliveries");
    assert_eq!(s.rows.len(), 2);
    assert_eq!(s.totals.len(), 1);
    assert!(s.totals[0].iter().any(|c| c == "43,5 t"));
    assert!(s.rows[1].iter().any(|c| c == "23,5"));
    assert!(doc.header.iter().any(|(k, v)| k == "Polier" && v == "M. Braun"));
}

#[test]
fn empty_sections_are_skipped() {
    let mut report = sample_report();
    report.materials_summary.insert(MaterialType::Primer, 0.0);

    let tables = section_tables(&report, &SectionToggles::all());
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].sheet_name, "Asphalt");

    let none = section_tables(&report, &SectionToggles::none());
    assert!(none.is_empty());
}

#[test]
fn rendering_is_deterministic() {
    let report = sample_report();
    let a = render_document(&report, &SectionToggles::all(), "stamp");
    let b = render_document(&report, &SectionToggles::all(), "stamp");
    assert_eq!(a, b);
    assert_eq!(a.to_html(), b.to_html());
    assert_eq!(
        render_message(&report, &SectionToggles::all()),
        render_message(&report, &SectionToggles::all())
    );
}

#[test]
fn html_escapes_user_text() {
    let mut report = sample_report();
    report.project_name = "Hof <Nord> & Süd".into();
    let html = render_document(&report, &asphalt_only(), "stamp").to_html();
    assert!(html.contains("Hof &lt;Nord&gt; &amp; Süd"));
    assert!(html.contains("<tr class=\"total-row\">"));
    assert!(html.contains("43,5 t"));
}

#[test]
fn message_lists_tons_per_class() {
    let text = render_message(&sample_report(), &SectionToggles::all());
    assert!(text.starts_with("*A3 Nord*"));
    assert!(text.contains("*Asphalt:* 43,5 t"));
    assert!(text.contains("  - AC 11 D S: 20,0 t"));
    assert!(text.contains("  - SMA 11: 23,5 t"));
    assert!(!text.contains("Hours"));
}

#[test]
fn message_respects_toggles() {
    let toggles = SectionToggles {
        hours: true,
        ..SectionToggles::none()
    };
    let text = render_message(&sample_report(), &toggles);
    assert!(!text.contains("Asphalt"));
}

#[test]
fn spreadsheet_has_summary_row() {
    let book = render_spreadsheet(&sample_report(), &asphalt_only());
    assert_eq!(book.sheets.len(), 1);
    let sheet = &book.sheets[0];
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.summary.len(), 1);
    assert!(sheet.summary[0].iter().any(|c| c.display() == "43,5 t"));
}

#[test]
fn binary_outputs_have_their_signatures() {
    let report = sample_report();

    let pdf = document_to_pdf(&render_document(&report, &SectionToggles::all(), "stamp"));
    assert!(pdf.starts_with(b"%PDF"));

    let xlsx = spreadsheet_to_xlsx(&render_spreadsheet(&report, &SectionToggles::all())).unwrap();
    assert!(xlsx.starts_with(b"PK"));

    let empty = spreadsheet_to_xlsx(&render_spreadsheet(&report, &SectionToggles::none())).unwrap();
    assert!(empty.starts_with(b"PK"));
}

#[test]
fn report_json_keeps_raw_numbers() {
    let json = serde_json::to_string(&sample_report()).unwrap();
    assert!(json.contains("\"asphalt_total\":43.5"));
    assert!(json.contains("\"Ac11DS\":20.0"));
}

#[test]
fn file_names_are_sanitized() {
    assert_eq!(
        report_file_name("Baustelle A3 / Nord", date("2024-03-01"), "pdf"),
        "report_Baustelle_A3___Nord_2024-03-01.pdf"
    );
}

#[test]
fn pdf_keeps_polish_names_readable() {
    let mut report = sample_report();
    report.project_name = "Ulica Wiśniewskiego".into();

    let pdf = document_to_pdf(&render_document(&report, &SectionToggles::all(), "stamp"));
    let contains = |needle: &[u8]| pdf.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"Ulica Wisniewskiego"));
    assert!(!contains(b"Wi?niewskiego"));
}
