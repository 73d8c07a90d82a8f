use polierlog::core::calculator::chainage::{chainage_meters, normalize_chainage, require_chainage};
use polierlog::core::calculator::{
    Conversion, calculate_hours, chainage_distance, estimate_paving, format_chainage,
    is_valid_chainage, parse_chainage, quote_usage, shift_hours,
};
use polierlog::core::material::{MaterialLength, MaterialLogic};
use polierlog::core::trip::TripLogic;
use polierlog::errors::AppError;
use polierlog::utils::formatting::format_number;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn chainage_distance_in_meters() {
    assert_eq!(parse_chainage("2+350"), 2350);
    assert_eq!(chainage_distance("0+450", "0+900"), 450);
    assert_eq!(chainage_distance("1+200", "0+800"), -400);
}

#[test]
fn chainage_round_trip() {
    for km in [0_i64, 1, 7, 42] {
        for m in [0_i64, 5, 450, 999] {
            let s = format_chainage(km * 1000 + m);
            assert!(is_valid_chainage(&s), "{s}");
            assert_eq!(parse_chainage(&s), km * 1000 + m);
        }
    }
}

#[test]
fn chainage_format_and_validation() {
    assert_eq!(format_chainage(2350), "2+350");
    assert_eq!(format_chainage(-400), "-0+400");
    assert!(is_valid_chainage("12+005"));
    assert!(!is_valid_chainage("12+5"));
    assert!(!is_valid_chainage("abc"));
    assert_eq!(normalize_chainage("1+5"), "1+005");
}

#[test]
fn material_length_from_chainage() {
    let (meters, from, to) = MaterialLogic::resolve_length(&MaterialLength::Chainage {
        from: "0+450".into(),
        to: "0+900".into(),
    })
    .expect("valid chainage");
    assert!(close(meters, 450.0));
    assert_eq!(from.as_deref(), Some("0+450"));
    assert_eq!(to.as_deref(), Some("0+900"));
}

#[test]
fn material_length_rejects_reversed_chainage() {
    let err = MaterialLogic::resolve_length(&MaterialLength::Chainage {
        from: "1+200".into(),
        to: "0+800".into(),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = MaterialLogic::resolve_length(&MaterialLength::Chainage {
        from: "x".into(),
        to: "0+800".into(),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidChainage(_)));
}

#[test]
fn oversized_chainage_is_rejected_not_overflowed() {
    let huge = "9999999999999999+000";
    assert!(is_valid_chainage(huge));
    assert_eq!(chainage_meters(huge), None);
    assert!(matches!(require_chainage(huge), Err(AppError::InvalidChainage(_))));
    assert_eq!(chainage_meters("2+350"), Some(2350));

    let err = MaterialLogic::resolve_length(&MaterialLength::Chainage {
        from: "0+000".into(),
        to: huge.into(),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidChainage(_)));

    assert_eq!(parse_chainage(huge), i64::MAX);
    assert_eq!(chainage_distance("0+000", huge), i64::MAX);
    assert!(format_chainage(i64::MIN).starts_with('-'));
}

#[test]
fn shift_hours_with_break() {
    assert!(close(calculate_hours("07:00", "16:00", 0.5).unwrap(), 8.5));
    assert!(close(calculate_hours("06:30", "15:00", 0.0).unwrap(), 8.5));
}

#[test]
fn shift_hours_clamped_to_zero() {
    assert_eq!(calculate_hours("07:00", "07:00", 0.5).unwrap(), 0.0);

    let reversed = shift_hours("16:00", "07:00", 0.5).unwrap();
    assert!(reversed.was_clamped());
    assert!(close(reversed.hours, 0.0));

    let long_break = shift_hours("08:00", "09:00", 2.0).unwrap();
    assert!(long_break.was_clamped());
    assert!(close(long_break.hours, 0.0));

    let exact = shift_hours("08:00", "09:00", 1.0).unwrap();
    assert!(!exact.was_clamped());
    assert!(close(exact.hours, 0.0));
}

#[test]
fn shift_hours_rejects_bad_times() {
    assert!(matches!(
        calculate_hours("25:00", "16:00", 0.5),
        Err(AppError::InvalidTime(_))
    ));
    assert!(calculate_hours("7", "16:00", 0.5).is_err());
}

#[test]
fn paving_estimate() {
    let est = estimate_paving(100.0, 3.5, 4.0, 2.4).unwrap();
    assert!(close(est.area_m2, 350.0));
    assert!(close(est.volume_m3, 14.0));
    assert!((est.tons - 33.6).abs() < 1e-6);
    assert_eq!(format_number(est.tons, 1), "33,6");

    assert!(estimate_paving(0.0, 3.5, 4.0, 2.4).is_err());
    assert!(estimate_paving(100.0, 3.5, 4.0, -1.0).is_err());
}

#[test]
fn usage_quote_per_ton_with_density() {
    let q = quote_usage(Conversion::MassWithDensity(2.4), 100.0, Some(4.0), 80.0).unwrap();
    assert!((q.final_quantity - 9.6).abs() < 1e-9);
    assert!((q.cost - 768.0).abs() < 1e-6);

    assert!(quote_usage(Conversion::MassWithDensity(2.4), 100.0, None, 80.0).is_err());
}

#[test]
fn usage_quote_direct_units() {
    let q = quote_usage(Conversion::Area, 120.0, None, 2.5).unwrap();
    assert!(close(q.final_quantity, 120.0));
    assert!(close(q.cost, 300.0));

    let q = quote_usage(Conversion::LinearLength, 40.0, Some(3.0), 1.25).unwrap();
    assert!(close(q.final_quantity, 40.0));
    assert!(close(q.cost, 50.0));

    assert!(quote_usage(Conversion::Mass, 0.0, None, 10.0).is_err());
    assert!(quote_usage(Conversion::Mass, 1.0, None, -10.0).is_err());
}

#[test]
fn trip_distance_needs_increasing_odometer() {
    assert!(close(TripLogic::distance(12000.0, 12042.0).unwrap(), 42.0));
    assert!(TripLogic::distance(12042.0, 12042.0).is_err());
    assert!(TripLogic::distance(12042.0, 12000.0).is_err());
}
