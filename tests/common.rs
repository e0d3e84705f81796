#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, SecondsFormat, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cli() -> Command {
    cargo_bin_cmd!("healthtwin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_healthtwin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// RFC 3339 timestamp `days` days in the past.
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Initialize the DB in test mode (no config file written).
pub fn init_db(db_path: &str) {
    cli()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_event(db_path: &str, id: &str, kind: &str, at: &str) {
    cli()
        .args([
            "--db", db_path, "event", "add", "--id", id, "--kind", kind, "--title", id, "--at", at,
        ])
        .assert()
        .success();
}

pub fn add_med(db_path: &str, id: &str, times: &str) {
    cli()
        .args([
            "--db",
            db_path,
            "med",
            "add",
            "--id",
            id,
            "--name",
            "Metformin",
            "--dosage",
            "500mg",
            "--frequency",
            "twice daily",
            "--times",
            times,
        ])
        .assert()
        .success();
}
