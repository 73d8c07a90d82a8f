#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use polierlog::core::asphalt::AsphaltLogic;
use polierlog::db::initialize::{open_db, open_in_memory};
use polierlog::db::pool::DbPool;
use polierlog::db::projects;
use polierlog::models::{AsphaltClass, AsphaltDelivery, NewAsphaltDelivery, NewProject, Project};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn plog() -> Command {
    cargo_bin_cmd!("polierlog")
}

/// Fresh POLIERLOG_HOME inside the system temp dir, removed first if left
/// over from an earlier run.
pub fn setup_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_polierlog_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

/// Command bound to a test home.
pub fn plog_in(home: &PathBuf) -> Command {
    let mut cmd = plog();
    cmd.env("POLIERLOG_HOME", home);
    cmd
}

/// `init` plus an active project called "A3 Nord".
pub fn init_with_project(home: &PathBuf) {
    plog_in(home).arg("init").assert().success();
    plog_in(home)
        .args(["project", "add", "A3 Nord", "--location", "Offenbach", "--activate"])
        .assert()
        .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("test time")
}

pub fn memory_pool() -> DbPool {
    open_in_memory().expect("open in-memory db")
}

/// Migrated SQLite file in the temp dir, WAL side files included in the reset.
pub fn file_pool(name: &str) -> DbPool {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_polierlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{db_path}{suffix}")).ok();
    }
    open_db(&db_path).expect("open file db")
}

pub fn add_project(pool: &mut DbPool, name: &str, activate: bool) -> Project {
    let new = NewProject {
        name: name.to_string(),
        location: Some("Offenbach".to_string()),
        activate,
        ..NewProject::default()
    };
    projects::create_project(&mut pool.conn, &new).expect("create project")
}

pub fn add_delivery(
    pool: &DbPool,
    project_id: &str,
    note: &str,
    class: AsphaltClass,
    tons: f64,
    on: &str,
    at: &str,
) -> AsphaltDelivery {
    let new = NewAsphaltDelivery {
        project_id: project_id.to_string(),
        delivery_note: note.to_string(),
        date: date(on),
        time: time(at),
        asphalt_class: class,
        tons,
        driver: Some("K. Weber".to_string()),
        truck_number: Some("OF-AB 1234".to_string()),
        notes: None,
        photo_uri: None,
    };
    AsphaltLogic::record(&pool.conn, false, &new).expect("record delivery")
}
