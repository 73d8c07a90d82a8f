mod common;
use common::{add_delivery, add_project, date, file_pool, memory_pool, time};

use polierlog::core::material::{MaterialEntry, MaterialLength, MaterialLogic};
use polierlog::core::hours::{HoursEntry, HoursLogic};
use polierlog::core::report::ReportService;
use polierlog::db::{asphalt, workers};
use polierlog::errors::AppError;
use polierlog::export::document::render_document;
use polierlog::export::range::parse_range;
use polierlog::export::{DateRange, RangeKind, SectionToggles};
use polierlog::models::{AsphaltClass, MaterialType, WorkerStatus};

fn add_sealing(pool: &polierlog::db::pool::DbPool, project_id: &str, on: &str, meters: f64) {
    MaterialLogic::record(
        &pool.conn,
        &MaterialEntry {
            project_id: project_id.to_string(),
            material_type: MaterialType::Fugenmasse,
            length: MaterialLength::Meters(meters),
            date: date(on),
            time: time("10:00"),
            notes: None,
            photo_uri: None,
        },
    )
    .expect("record material");
}

#[test]
fn report_needs_an_active_project() {
    let mut pool = memory_pool();
    add_project(&mut pool, "Hofeinfahrt", false);

    let err = ReportService::build(
        &pool,
        DateRange::single(date("2024-03-01")),
        &SectionToggles::all(),
        "M. Braun",
    )
    .unwrap_err();
    assert!(err.is_no_active_project());
}

#[test]
fn report_collects_enabled_sections() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_delivery(&pool, &p.id, "100232", AsphaltClass::Sma11, 23.5, "2024-03-01", "09:10");
    add_sealing(&pool, &p.id, "2024-03-01", 120.0);

    let report = ReportService::build(
        &pool,
        DateRange::single(date("2024-03-01")),
        &SectionToggles::all(),
        "M. Braun",
    )
    .unwrap();

    assert_eq!(report.project_name, "A3 Nord");
    assert_eq!(report.polier_name, "M. Braun");
    assert_eq!(report.date_label, "01.03.2024");
    assert_eq!(report.asphalt_deliveries.len(), 2);
    assert!((report.asphalt_total - 43.5).abs() < 1e-9);
    assert_eq!(report.materials_summary.get(&MaterialType::Fugenmasse), Some(&120.0));
    assert!(report.trips.is_empty());
    assert!(report.vehicle_name.is_none());
}

#[test]
fn single_day_asphalt_document_from_file_database() {
    let mut pool = file_pool("report_single_day");
    let p = add_project(&mut pool, "P", true);
    add_delivery(&pool, &p.id, "200101", AsphaltClass::Binder, 25.5, "2024-03-01", "07:10");
    add_delivery(&pool, &p.id, "200102", AsphaltClass::Binder, 18.0, "2024-03-01", "08:40");
    add_sealing(&pool, &p.id, "2024-03-01", 60.0);

    let day = date("2024-03-01");
    let stored = asphalt::total_tons(&pool.conn, &p.id, day).unwrap();
    assert_eq!(stored, 43.5);

    let toggles = SectionToggles {
        asphalt: true,
        ..SectionToggles::none()
    };
    let report = ReportService::build(&pool, DateRange::single(day), &toggles, "M. Braun").unwrap();
    assert_eq!(report.asphalt_total, stored);
    assert!(report.materials.is_empty());

    let doc = render_document(&report, &toggles, "stamp");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].rows.len(), 2);
    assert_eq!(doc.sections[0].totals.len(), 1);
    assert!(doc.sections[0].totals[0].iter().any(|c| c == "43,5 t"));
}

#[test]
fn all_sections_from_file_database() {
    let mut pool = file_pool("report_all_sections");
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_sealing(&pool, &p.id, "2024-03-01", 450.0);

    let report = ReportService::build(
        &pool,
        DateRange::single(date("2024-03-01")),
        &SectionToggles::all(),
        "M. Braun",
    )
    .unwrap();
    assert_eq!(report.asphalt_deliveries.len(), 1);
    assert_eq!(report.materials.len(), 1);
    assert_eq!(report.materials_summary.get(&MaterialType::Fugenmasse), Some(&450.0));
}

#[test]
fn hours_rows_carry_worker_names() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let keller = workers::create_worker(&pool.conn, "Jonas", "Keller").unwrap();
    let demir = workers::create_worker(&pool.conn, "Ali", "Demir").unwrap();

    for (w, start) in [(&keller, "07:00"), (&demir, "06:00")] {
        HoursLogic::record(
            &mut pool.conn,
            &HoursEntry {
                worker_id: w.id.clone(),
                project_id: p.id.clone(),
                date: date("2024-03-01"),
                start_time: time(start),
                end_time: time("16:00"),
                break_hours: 0.5,
                status: WorkerStatus::Present,
                overtime: false,
                notes: None,
            },
        )
        .unwrap();
    }
    workers::set_worker_active(&pool.conn, &demir.id, false).unwrap();

    let report = ReportService::build(
        &pool,
        DateRange::single(date("2024-03-01")),
        &SectionToggles::all(),
        "M. Braun",
    )
    .unwrap();

    assert_eq!(report.workers_count, 2);
    assert!((report.total_hours - 18.0).abs() < 1e-9);
    let names: Vec<&str> = report.worker_hours.iter().map(|r| r.worker_name.as_str()).collect();
    assert!(names.contains(&"Jonas Keller"));
    assert!(names.contains(&demir.id.as_str()));
}

#[test]
fn disabled_sections_stay_empty() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_sealing(&pool, &p.id, "2024-03-01", 80.0);

    let toggles = SectionToggles {
        materials: true,
        ..SectionToggles::none()
    };
    let report = ReportService::build(
        &pool,
        DateRange::single(date("2024-03-01")),
        &toggles,
        "M. Braun",
    )
    .unwrap();

    assert!(report.asphalt_deliveries.is_empty());
    assert_eq!(report.asphalt_total, 0.0);
    assert_eq!(report.materials.len(), 1);
    assert_eq!(report.materials[0].meters, 80.0);
}

#[test]
fn report_range_excludes_other_days() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_delivery(&pool, &p.id, "100250", AsphaltClass::Ac11DS, 18.0, "2024-03-08", "07:30");

    let range = DateRange {
        from: date("2024-03-04"),
        to: date("2024-03-10"),
    };
    let report = ReportService::build(&pool, range, &SectionToggles::all(), "M. Braun").unwrap();
    assert_eq!(report.asphalt_deliveries.len(), 1);
    assert_eq!(report.asphalt_total, 18.0);
    assert_eq!(report.date_label, "04.03.2024 - 10.03.2024");
}

#[test]
fn section_list_parsing() {
    let t = SectionToggles::from_list("asphalt, hours").unwrap();
    assert!(t.asphalt && t.hours);
    assert!(!t.materials && !t.material_usage && !t.vehicle);

    assert_eq!(SectionToggles::from_list("all"), Some(SectionToggles::all()));
    assert!(SectionToggles::from_list("asphalt,weather").is_none());
    assert!(!SectionToggles::none().any());
}

#[test]
fn range_keywords_resolve_against_today() {
    // a Wednesday
    let today = date("2024-03-06");

    let week = DateRange::resolve(&parse_range("week").unwrap(), today);
    assert_eq!(week.from, date("2024-03-04"));
    assert_eq!(week.to, date("2024-03-10"));

    let yesterday = DateRange::resolve(&RangeKind::Yesterday, today);
    assert_eq!(yesterday, DateRange::single(date("2024-03-05")));

    let t = DateRange::resolve(&parse_range("Today").unwrap(), today);
    assert_eq!(t, DateRange::single(today));
}

#[test]
fn range_periods() {
    let feb = DateRange::resolve(&parse_range("2024-02").unwrap(), date("2024-03-06"));
    assert_eq!(feb.from, date("2024-02-01"));
    assert_eq!(feb.to, date("2024-02-29"));

    let span = parse_range("2024-03-01:2024-03-05").unwrap();
    assert_eq!(
        span,
        RangeKind::Custom {
            from: date("2024-03-01"),
            to: date("2024-03-05"),
        }
    );

    let year = parse_range("2023").unwrap();
    assert_eq!(
        year,
        RangeKind::Custom {
            from: date("2023-01-01"),
            to: date("2023-12-31"),
        }
    );

    assert!(parse_range("2024-13").is_err());
    assert!(parse_range("2024-03:2024-03-05").is_err());
    assert!(parse_range("last month").is_err());
    assert!(parse_range("2024x03").is_err());
}

#[test]
fn non_ascii_range_is_an_invalid_date() {
    for input in ["202é-1", "20é4", "202é-1:202é-1", "2024-03-0é"] {
        let err = parse_range(input).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)), "{input}");
    }
}

#[test]
fn reversed_range_yields_empty_sections() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_sealing(&pool, &p.id, "2024-03-05", 80.0);

    let range = DateRange {
        from: date("2024-03-10"),
        to: date("2024-03-01"),
    };
    let report = ReportService::build(&pool, range, &SectionToggles::all(), "M. Braun").unwrap();

    assert!(report.asphalt_deliveries.is_empty());
    assert_eq!(report.asphalt_total, 0.0);
    assert!(report.asphalt_by_class.is_empty());
    assert!(report.materials.is_empty());
    assert!(report.materials_summary.is_empty());
    assert!(report.material_usage.is_empty());
    assert_eq!(report.usage_totals.total_cost, 0.0);
    assert!(report.worker_hours.is_empty());
    assert_eq!(report.workers_count, 0);
    assert_eq!(report.total_hours, 0.0);
    assert!(report.trips.is_empty());
    assert_eq!(report.total_km, 0.0);
}
