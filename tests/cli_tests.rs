use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_with_project, plog_in, setup_home};

#[test]
fn test_init_creates_config_and_database() {
    let home = setup_home("cli_init");

    plog_in(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(home.join("polierlog.conf").exists());
    assert!(home.join("polierlog.sqlite").exists());

    plog_in(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("polier_name").and(contains("default_density")));
}

#[test]
fn test_calc_commands_need_no_database() {
    let home = setup_home("cli_calc");

    plog_in(&home)
        .args(["calc", "chainage", "0+450", "0+900"])
        .assert()
        .success()
        .stdout(contains("450 m"));

    plog_in(&home)
        .args(["calc", "hours", "07:00", "16:00"])
        .assert()
        .success()
        .stdout(contains("8,5 h"));

    plog_in(&home)
        .args(["calc", "hours", "16:00", "07:00"])
        .assert()
        .success()
        .stdout(contains("0,0 h"))
        .stderr(contains("counted as 0 h"));

    plog_in(&home)
        .args(["calc", "paving", "100", "3.5", "4", "--density", "2.4"])
        .assert()
        .success()
        .stdout(contains("33,6 t"));

    assert!(!home.join("polierlog.sqlite").exists());
}

#[test]
fn test_bad_chainage_is_rejected() {
    let home = setup_home("cli_bad_chainage");

    plog_in(&home)
        .args(["calc", "chainage", "abc", "0+900"])
        .assert()
        .failure()
        .stderr(contains("Invalid chainage"));

    plog_in(&home)
        .args(["calc", "chainage", "0+000", "9999999999999999+000"])
        .assert()
        .failure()
        .stderr(contains("Invalid chainage"));
}

#[test]
fn test_asphalt_without_active_project_fails() {
    let home = setup_home("cli_no_project");
    plog_in(&home).arg("init").assert().success();

    plog_in(&home)
        .args(["asphalt", "add", "100231", "AC11DS", "20"])
        .assert()
        .failure()
        .stderr(contains("No active project"));
}

#[test]
fn test_asphalt_flow_and_message_export() {
    let home = setup_home("cli_asphalt_message");
    init_with_project(&home);

    plog_in(&home)
        .args([
            "asphalt", "add", "100231", "AC 11 D S", "20", "--date", "2024-03-01", "--time",
            "07:30", "--truck", "OF-AB 1234",
        ])
        .assert()
        .success()
        .stdout(contains("Lieferschein 100231 recorded: 20,0 t AC 11 D S"));

    plog_in(&home)
        .args([
            "asphalt", "add", "100232", "sma11", "23.5", "--date", "2024-03-01", "--time", "09:10",
        ])
        .assert()
        .success();

    plog_in(&home)
        .args(["asphalt", "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("100231").and(contains("100232")).and(contains("43,5 t")));

    plog_in(&home)
        .args(["export", "--range", "2024-03-01", "--format", "message"])
        .assert()
        .success()
        .stdout(contains("*A3 Nord*").and(contains("43,5 t")));
}

#[test]
fn test_unknown_asphalt_class_is_rejected() {
    let home = setup_home("cli_bad_class");
    init_with_project(&home);

    plog_in(&home)
        .args(["asphalt", "add", "100231", "Gussasphalt", "20"])
        .assert()
        .failure()
        .stderr(contains("unknown asphalt class"));
}

#[test]
fn test_json_export_writes_named_file() {
    let home = setup_home("cli_json_export");
    init_with_project(&home);
    let out = home.join("exports");
    let out_arg = out.to_string_lossy().to_string();

    plog_in(&home)
        .args([
            "asphalt", "add", "100231", "Binder", "20", "--date", "2024-03-01", "--time", "07:30",
        ])
        .assert()
        .success();

    plog_in(&home)
        .args([
            "export",
            "--range",
            "2024-03-01",
            "--format",
            "json",
            "--out",
            &out_arg,
            "--force",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let file = out.join("report_A3_Nord_2024-03-01.json");
    let content = fs::read_to_string(&file).expect("read exported json");
    assert!(content.contains("\"asphalt_total\": 20.0"));
    assert!(content.contains("\"project_name\": \"A3 Nord\""));
}

#[test]
fn test_html_export_with_section_filter() {
    let home = setup_home("cli_html_export");
    init_with_project(&home);
    let out = home.join("exports");
    let out_arg = out.to_string_lossy().to_string();

    plog_in(&home)
        .args([
            "asphalt", "add", "100231", "Binder", "20", "--date", "2024-03-01", "--time", "07:30",
        ])
        .assert()
        .success();
    plog_in(&home)
        .args([
            "material", "add", "Fugenmasse", "--from", "0+450", "--to", "0+900", "--date",
            "2024-03-01",
        ])
        .assert()
        .success();

    plog_in(&home)
        .args([
            "export",
            "--range",
            "2024-03-01",
            "--format",
            "html",
            "--sections",
            "materials",
            "--out",
            &out_arg,
            "--force",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(out.join("report_A3_Nord_2024-03-01.html")).expect("read html");
    assert!(html.contains("1. Materials (running meters)"));
    assert!(html.contains("0+450"));
    assert!(!html.contains("Asphalt deliveries"));
}

#[test]
fn test_invalid_sections_are_rejected() {
    let home = setup_home("cli_bad_sections");
    init_with_project(&home);

    plog_in(&home)
        .args(["export", "--format", "message", "--sections", "weather"])
        .assert()
        .failure()
        .stderr(contains("invalid --sections"));
}

#[test]
fn test_log_records_operations() {
    let home = setup_home("cli_log");
    init_with_project(&home);

    plog_in(&home)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("create")));
}
