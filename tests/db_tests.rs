mod common;
use common::{add_delivery, add_project, date, memory_pool, time};

use polierlog::core::hours::{HoursEntry, HoursLogic};
use polierlog::core::trip::{TripEntry, TripLogic};
use polierlog::core::usage::{UsageEntry, UsageLogic};
use polierlog::core::asphalt::AsphaltLogic;
use polierlog::db::{
    asphalt, catalog, material_usage, projects, trips, vehicles, worker_hours, workers,
};
use polierlog::errors::AppError;
use polierlog::models::{
    AsphaltClass, AsphaltDeliveryUpdate, MaterialUnit, NewAsphaltDelivery, NewCatalogMaterial,
    NewVehicle, WorkerStatus,
};

fn hours_entry(worker_id: &str, project_id: &str, start: &str, end: &str) -> HoursEntry {
    HoursEntry {
        worker_id: worker_id.to_string(),
        project_id: project_id.to_string(),
        date: date("2024-03-01"),
        start_time: time(start),
        end_time: time(end),
        break_hours: 0.5,
        status: WorkerStatus::Present,
        overtime: false,
        notes: None,
    }
}

#[test]
fn fresh_database_has_no_active_project() {
    let pool = memory_pool();
    assert!(projects::get_active_project(&pool.conn).unwrap().is_none());
    assert!(projects::list_projects(&pool.conn).unwrap().is_empty());
}

#[test]
fn only_one_project_is_active() {
    let mut pool = memory_pool();
    let first = add_project(&mut pool, "A3 Nord", true);
    let second = add_project(&mut pool, "B8 Ortsdurchfahrt", true);
    let third = add_project(&mut pool, "Hofeinfahrt", false);

    let active = projects::get_active_project(&pool.conn).unwrap().unwrap();
    assert_eq!(active.id, second.id);
    assert!(!third.active);

    projects::set_active_project(&mut pool.conn, &first.id).unwrap();
    let flagged: Vec<_> = projects::list_projects(&pool.conn)
        .unwrap()
        .into_iter()
        .filter(|p| p.active)
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, first.id);
}

#[test]
fn activating_unknown_project_keeps_current_selection() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);

    let err = projects::set_active_project(&mut pool.conn, "missing").unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let active = projects::get_active_project(&pool.conn).unwrap().unwrap();
    assert_eq!(active.id, p.id);
}

#[test]
fn delivery_totals_per_day_and_class() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    add_delivery(&pool, &p.id, "100232", AsphaltClass::Sma11, 23.5, "2024-03-01", "09:10");
    add_delivery(&pool, &p.id, "100240", AsphaltClass::Ac11DS, 12.0, "2024-03-02", "08:00");

    let day = date("2024-03-01");
    let total = asphalt::total_tons(&pool.conn, &p.id, day).unwrap();
    assert!((total - 43.5).abs() < 1e-9);

    let rows = asphalt::list_deliveries(&pool.conn, &p.id, day).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].delivery_note, "100232");

    let by_class =
        asphalt::tons_by_class_range(&pool.conn, &p.id, day, date("2024-03-02")).unwrap();
    assert_eq!(by_class.get(&AsphaltClass::Ac11DS), Some(&32.0));
    assert_eq!(by_class.get(&AsphaltClass::Sma11), Some(&23.5));
}

#[test]
fn delivery_validation() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);

    let mut bad = NewAsphaltDelivery {
        project_id: p.id.clone(),
        delivery_note: "12".into(),
        date: date("2024-03-01"),
        time: time("07:00"),
        asphalt_class: AsphaltClass::Binder,
        tons: 150.0,
        driver: None,
        truck_number: None,
        notes: None,
        photo_uri: None,
    };
    assert!(AsphaltLogic::record(&pool.conn, false, &bad).is_err());

    bad.tons = 20.0;
    assert!(AsphaltLogic::record(&pool.conn, true, &bad).is_err());
    assert!(AsphaltLogic::record(&pool.conn, false, &bad).is_ok());
}

#[test]
fn hours_upsert_keeps_one_row_per_worker_and_day() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let w = workers::create_worker(&pool.conn, "Jonas", "Keller").unwrap();

    let first = HoursLogic::record(&mut pool.conn, &hours_entry(&w.id, &p.id, "07:00", "16:00")).unwrap();
    assert!((first.total_hours - 8.5).abs() < 1e-9);

    let second = HoursLogic::record(&mut pool.conn, &hours_entry(&w.id, &p.id, "07:00", "18:00")).unwrap();
    assert_eq!(second.id, first.id);
    assert!((second.total_hours - 10.5).abs() < 1e-9);

    let rows = worker_hours::list_hours(&pool.conn, &p.id, date("2024-03-01")).unwrap();
    assert_eq!(rows.len(), 1);

    let totals = worker_hours::total_hours(&pool.conn, &p.id, date("2024-03-01")).unwrap();
    assert!((totals.total_hours - 10.5).abs() < 1e-9);
    assert_eq!(totals.workers_count, 1);
}

#[test]
fn absent_worker_counts_zero_hours() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let w1 = workers::create_worker(&pool.conn, "Jonas", "Keller").unwrap();
    let w2 = workers::create_worker(&pool.conn, "Ali", "Demir").unwrap();

    HoursLogic::record(&mut pool.conn, &hours_entry(&w1.id, &p.id, "07:00", "16:00")).unwrap();
    let mut sick = hours_entry(&w2.id, &p.id, "07:00", "16:00");
    sick.status = WorkerStatus::Sick;
    let stored = HoursLogic::record(&mut pool.conn, &sick).unwrap();
    assert_eq!(stored.total_hours, 0.0);

    let totals = worker_hours::total_hours(&pool.conn, &p.id, date("2024-03-01")).unwrap();
    assert!((totals.total_hours - 8.5).abs() < 1e-9);
    assert_eq!(totals.workers_count, 1);
}

#[test]
fn inactive_workers_leave_the_roster() {
    let pool = memory_pool();
    let w1 = workers::create_worker(&pool.conn, "Jonas", "Keller").unwrap();
    let w2 = workers::create_worker(&pool.conn, "Ali", "Demir").unwrap();

    workers::set_worker_active(&pool.conn, &w1.id, false).unwrap();
    let roster = workers::list_active_workers(&pool.conn).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, w2.id);
    assert_eq!(workers::list_workers(&pool.conn).unwrap().len(), 2);
}

#[test]
fn trip_moves_vehicle_odometer() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let v = vehicles::create_vehicle(
        &mut pool.conn,
        &NewVehicle {
            make: "Mercedes".into(),
            model: "Sprinter".into(),
            registration_number: "OF-PL 120".into(),
            current_odometer: 12000.0,
            activate: true,
        },
    )
    .unwrap();

    let entry = TripEntry {
        vehicle_id: v.id.clone(),
        project_id: p.id.clone(),
        date: date("2024-03-01"),
        start_time: time("06:15"),
        end_time: time("06:50"),
        from_location: "Yard".into(),
        to_location: "A3 Nord".into(),
        start_odometer: None,
        end_odometer: 12042.0,
        purpose: "Drive to site".into(),
        notes: None,
    };
    let trip = TripLogic::record(&mut pool.conn, &entry).unwrap();
    assert_eq!(trip.start_odometer, 12000.0);
    assert_eq!(trip.distance, 42.0);
    assert_eq!(vehicles::get_vehicle(&pool.conn, &v.id).unwrap().current_odometer, 12042.0);

    // stored as given, even when lower
    vehicles::update_vehicle_odometer(&pool.conn, &v.id, 11000.0).unwrap();
    assert_eq!(vehicles::get_vehicle(&pool.conn, &v.id).unwrap().current_odometer, 11000.0);
}

#[test]
fn failed_trip_leaves_odometer_alone() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let v = vehicles::create_vehicle(
        &mut pool.conn,
        &NewVehicle {
            make: "VW".into(),
            model: "Crafter".into(),
            registration_number: "OF-PL 121".into(),
            current_odometer: 5000.0,
            activate: false,
        },
    )
    .unwrap();

    let entry = TripEntry {
        vehicle_id: v.id.clone(),
        project_id: p.id.clone(),
        date: date("2024-03-01"),
        start_time: time("06:15"),
        end_time: time("06:50"),
        from_location: "Yard".into(),
        to_location: "A3 Nord".into(),
        start_odometer: Some(5000.0),
        end_odometer: 4990.0,
        purpose: "Drive to site".into(),
        notes: None,
    };
    assert!(TripLogic::record(&mut pool.conn, &entry).is_err());
    assert_eq!(vehicles::get_vehicle(&pool.conn, &v.id).unwrap().current_odometer, 5000.0);
    assert!(vehicles::get_active_vehicle(&pool.conn).unwrap().is_none());
}

#[test]
fn catalog_entry_in_use_cannot_be_deleted() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let m = catalog::create_catalog_entry(
        &pool.conn,
        &NewCatalogMaterial {
            name: "AC 11 D S".into(),
            unit: MaterialUnit::Mass,
            price_per_unit: 80.0,
            density: Some(2.4),
            category: Some("Asphalt".into()),
        },
    )
    .unwrap();

    let usage = UsageLogic::record(
        &pool.conn,
        &UsageEntry {
            project_id: p.id.clone(),
            material_id: m.id.clone(),
            date: date("2024-03-01"),
            input_quantity: 100.0,
            thickness_cm: Some(4.0),
            notes: None,
        },
    )
    .unwrap();
    assert!((usage.final_quantity - 9.6).abs() < 1e-9);
    assert_eq!(usage.price_per_unit_at_time, 80.0);
    assert_eq!(usage.material_name, "AC 11 D S");

    let err = catalog::delete_catalog_entry(&mut pool.conn, &m.id).unwrap_err();
    assert!(matches!(err, AppError::MaterialInUse { usages: 1, .. }));

    material_usage::delete_usage(&pool.conn, &usage.id).unwrap();
    catalog::delete_catalog_entry(&mut pool.conn, &m.id).unwrap();
    assert!(catalog::list_catalog(&pool.conn).unwrap().is_empty());
}

#[test]
fn price_change_keeps_usage_snapshot() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let m = catalog::create_catalog_entry(
        &pool.conn,
        &NewCatalogMaterial {
            name: "Bitumen emulsion".into(),
            unit: MaterialUnit::Area,
            price_per_unit: 1.5,
            density: None,
            category: None,
        },
    )
    .unwrap();

    let usage = UsageLogic::record(
        &pool.conn,
        &UsageEntry {
            project_id: p.id.clone(),
            material_id: m.id.clone(),
            date: date("2024-03-01"),
            input_quantity: 200.0,
            thickness_cm: None,
            notes: None,
        },
    )
    .unwrap();

    catalog::update_catalog_entry(
        &pool.conn,
        &m.id,
        &polierlog::models::CatalogMaterialUpdate {
            price_per_unit: Some(2.0),
            ..Default::default()
        },
    )
    .unwrap();

    let stored = material_usage::get_usage(&pool.conn, &usage.id).unwrap();
    assert_eq!(stored.price_per_unit_at_time, 1.5);
    assert!((stored.cost - 300.0).abs() < 1e-9);
}

#[test]
fn project_with_records_cannot_be_deleted() {
    let mut pool = memory_pool();
    let busy = add_project(&mut pool, "A3 Nord", true);
    let empty = add_project(&mut pool, "Hofeinfahrt", false);
    add_delivery(&pool, &busy.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");

    let err = projects::delete_project(&mut pool.conn, &busy.id).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(projects::get_project(&pool.conn, &busy.id).is_ok());

    projects::delete_project(&mut pool.conn, &empty.id).unwrap();
    assert!(projects::get_project(&pool.conn, &empty.id).is_err());
}

#[test]
fn partial_update_clears_only_named_columns() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let d = add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");
    assert_eq!(d.driver.as_deref(), Some("K. Weber"));

    let upd = AsphaltDeliveryUpdate {
        driver: Some(None),
        ..AsphaltDeliveryUpdate::default()
    };
    asphalt::update_delivery(&pool.conn, &d.id, &upd).unwrap();

    let after = asphalt::get_delivery(&pool.conn, &d.id).unwrap();
    assert_eq!(after.driver, None);
    assert_eq!(after.truck_number.as_deref(), Some("OF-AB 1234"));
    assert_eq!(after.tons, 20.0);
    assert_eq!(after.delivery_note, "100231");
    assert_eq!(after.asphalt_class, AsphaltClass::Ac11DS);
}

#[test]
fn delivery_update_is_trimmed_like_a_new_delivery() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let d = add_delivery(&pool, &p.id, "100231", AsphaltClass::Ac11DS, 20.0, "2024-03-01", "07:30");

    let upd = AsphaltDeliveryUpdate {
        delivery_note: Some("  100299 ".into()),
        truck_number: Some(Some(" OF-XY 77 ".into())),
        notes: Some(Some("   ".into())),
        ..AsphaltDeliveryUpdate::default()
    };
    AsphaltLogic::update(&pool.conn, true, &d.id, &upd).unwrap();

    let after = asphalt::get_delivery(&pool.conn, &d.id).unwrap();
    assert_eq!(after.delivery_note, "100299");
    assert_eq!(after.truck_number.as_deref(), Some("OF-XY 77"));
    assert_eq!(after.notes, None);
    assert_eq!(after.driver.as_deref(), Some("K. Weber"));
}

#[test]
fn trip_sets_odometer_even_below_previous_reading() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let v = vehicles::create_vehicle(
        &mut pool.conn,
        &NewVehicle {
            make: "MAN".into(),
            model: "TGS".into(),
            registration_number: "OF-PL 130".into(),
            current_odometer: 12000.0,
            activate: true,
        },
    )
    .unwrap();

    let entry = TripEntry {
        vehicle_id: v.id.clone(),
        project_id: p.id.clone(),
        date: date("2024-03-01"),
        start_time: time("14:00"),
        end_time: time("14:40"),
        from_location: "A3 Nord".into(),
        to_location: "Yard".into(),
        start_odometer: Some(8000.0),
        end_odometer: 8050.0,
        purpose: "Return".into(),
        notes: None,
    };
    let trip = TripLogic::record(&mut pool.conn, &entry).unwrap();
    assert_eq!(trip.distance, 50.0);
    assert_eq!(vehicles::get_vehicle(&pool.conn, &v.id).unwrap().current_odometer, 8050.0);
    assert_eq!(trips::last_odometer(&pool.conn, &v.id).unwrap(), 8050.0);
}

#[test]
fn failed_audit_rolls_back_the_write() {
    let mut pool = memory_pool();
    let p = add_project(&mut pool, "A3 Nord", true);
    let kept = add_delivery(&pool, &p.id, "100231", AsphaltClass::Binder, 20.0, "2024-03-01", "07:30");

    pool.conn.execute("DROP TABLE log", []).unwrap();

    let new = NewAsphaltDelivery {
        project_id: p.id.clone(),
        delivery_note: "100232".into(),
        date: date("2024-03-01"),
        time: time("09:00"),
        asphalt_class: AsphaltClass::Binder,
        tons: 18.0,
        driver: None,
        truck_number: None,
        notes: None,
        photo_uri: None,
    };
    assert!(asphalt::create_delivery(&pool.conn, &new).is_err());
    assert!(asphalt::delete_delivery(&pool.conn, &kept.id).is_err());

    let rows = asphalt::list_deliveries(&pool.conn, &p.id, date("2024-03-01")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, kept.id);
}
